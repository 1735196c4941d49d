// Copyright 2025 Anapaya Systems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;

use sha2::{Digest, Sha256};

use super::Path;

/// A fingerprint for a SCION path.
///
/// Computed from the source and destination ISD-AS and the sequence of traversed interfaces.
/// Interface IDs are unique within an AS, so this identifies the path independently of its
/// expiry or MTU, and stays stable when the same path is fetched again.
///
/// Paths without interface metadata are fingerprinted by their endpoints only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathFingerprint([u8; PathFingerprint::LENGTH]);

impl PathFingerprint {
    const LENGTH: usize = 32;
    const DISPLAYED_BYTES: usize = 8;

    /// Returns the fingerprint of the provided path.
    pub fn new(path: &Path) -> PathFingerprint {
        let mut hasher = Sha256::new();
        hasher.update(path.isd_asn.source.to_be_bytes());
        hasher.update(path.isd_asn.destination.to_be_bytes());

        if let Some(interfaces) = path.interfaces() {
            for interface in interfaces {
                hasher.update(interface.isd_asn.to_be_bytes());
                hasher.update(interface.id.to_be_bytes());
            }
        }

        PathFingerprint(hasher.finalize().into())
    }

    /// Writes the first `n_displayed` bytes as lower case hex.
    fn format(&self, f: &mut fmt::Formatter<'_>, n_displayed: usize) -> fmt::Result {
        for byte in &self.0[..n_displayed] {
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

impl AsRef<[u8]> for PathFingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for PathFingerprint {
    fn from(value: [u8; 32]) -> Self {
        Self(value)
    }
}

impl fmt::Display for PathFingerprint {
    /// Formats the first 8 bytes of the fingerprint as lower case hex.
    ///
    /// The alternate flag formats all 32 bytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.format(f, Self::LENGTH)
        } else {
            self.format(f, Self::DISPLAYED_BYTES)
        }
    }
}
