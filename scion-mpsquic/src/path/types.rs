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

//! Candidate path state as reported by the path monitor.

use std::time::Duration;

use scion_proto::path::{Path, PathFingerprint};

/// Snapshot of one candidate path's liveness and performance state.
///
/// Entries are created and refreshed by the path monitor of the session. Policies only ever see
/// them through a shared slice and never keep a reference beyond a single call.
#[derive(Debug, Clone)]
pub struct PathInfo {
    /// The underlying SCION path.
    pub path: Path,
    /// The fingerprint of the path.
    pub fingerprint: PathFingerprint,
    /// Most recently measured round-trip time, `None` until the first measurement.
    pub rtt: Option<Duration>,
    /// Set once the path was revoked and must not be used.
    pub revoked: bool,
}

impl PathInfo {
    /// Wraps a path with no RTT measurement, not revoked.
    pub fn new(path: Path) -> Self {
        let fingerprint = path.fingerprint();
        Self {
            path,
            fingerprint,
            rtt: None,
            revoked: false,
        }
    }

    /// Returns this entry with the given RTT measurement.
    pub fn with_rtt(mut self, rtt: Duration) -> Self {
        self.rtt = Some(rtt);
        self
    }

    /// Returns this entry marked as revoked.
    pub fn revoked(mut self) -> Self {
        self.revoked = true;
        self
    }

    /// Records a new RTT measurement, replacing the previous one.
    pub fn record_rtt(&mut self, rtt: Duration) {
        self.rtt = Some(rtt);
    }

    /// Forgets the RTT measurement, e.g. after the path was re-established.
    pub fn clear_rtt(&mut self) {
        self.rtt = None;
    }

    /// Marks the path as revoked or usable again.
    pub fn set_revoked(&mut self, revoked: bool) {
        self.revoked = revoked;
    }

    /// Returns true if the path is revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked
    }

    /// Returns the measured RTT, if any.
    pub fn rtt(&self) -> Option<Duration> {
        self.rtt
    }
}

impl From<Path> for PathInfo {
    fn from(path: Path) -> Self {
        Self::new(path)
    }
}
