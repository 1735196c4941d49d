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

//! SCION end-to-end paths.
//!
//! A [`Path`] carries the endpoints it connects and, if the control plane provided it, metadata
//! describing the interfaces traversed and when the path expires.

use std::time::SystemTime;

use crate::address::IsdAsn;

pub mod fingerprint;
pub mod test_builder;

pub use fingerprint::PathFingerprint;

/// A value per path endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByEndpoint<T> {
    /// Value for the source endpoint.
    pub source: T,
    /// Value for the destination endpoint.
    pub destination: T,
}

/// An interface traversed by a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathInterface {
    /// The AS the interface belongs to.
    pub isd_asn: IsdAsn,
    /// The AS-local interface identifier.
    pub id: u16,
}

/// Control plane metadata of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMetadata {
    /// Point in time at which the path stops being usable.
    pub expiration: SystemTime,
    /// Path MTU in bytes.
    pub mtu: u16,
    /// Interfaces in traversal order, ingress before egress for every AS on the path.
    ///
    /// `None` if the control plane did not report interfaces.
    pub interfaces: Option<Vec<PathInterface>>,
}

/// A SCION path between two ASes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Source and destination ISD-AS of the path.
    pub isd_asn: ByEndpoint<IsdAsn>,
    /// Metadata, if known.
    pub metadata: Option<PathMetadata>,
}

impl Path {
    /// Creates a new path.
    pub fn new(source: IsdAsn, destination: IsdAsn, metadata: Option<PathMetadata>) -> Self {
        Self {
            isd_asn: ByEndpoint {
                source,
                destination,
            },
            metadata,
        }
    }

    /// Returns the interfaces traversed by the path, if known.
    pub fn interfaces(&self) -> Option<&[PathInterface]> {
        self.metadata.as_ref()?.interfaces.as_deref()
    }

    /// Returns the number of interfaces traversed by the path.
    ///
    /// Returns 0 if the path has no interface metadata.
    pub fn interface_count(&self) -> usize {
        self.interfaces().map(<[PathInterface]>::len).unwrap_or(0)
    }

    /// Returns the expiry time of the path, if known.
    pub fn expiry_time(&self) -> Option<SystemTime> {
        self.metadata.as_ref().map(|m| m.expiration)
    }

    /// Returns true if the path has an expiry time that is not after `now`.
    pub fn is_expired(&self, now: SystemTime) -> bool {
        self.expiry_time().is_some_and(|expiry| expiry <= now)
    }

    /// Returns the fingerprint identifying this path.
    pub fn fingerprint(&self) -> PathFingerprint {
        PathFingerprint::new(self)
    }
}
