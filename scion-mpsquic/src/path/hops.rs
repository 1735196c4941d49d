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

//! Hop counting, used to break ties between otherwise equivalent paths.

use scion_proto::path::Path;

use crate::path::types::PathInfo;

/// Number of forwarding interfaces a path traverses end to end.
pub trait HopCounter {
    /// Returns the hop count.
    ///
    /// A path without interface metadata reports `usize::MAX`, so it never wins a tie-break
    /// against a path of known length.
    fn hop_count(&self) -> usize;
}

impl HopCounter for Path {
    fn hop_count(&self) -> usize {
        self.interfaces().map(|i| i.len()).unwrap_or(usize::MAX)
    }
}

impl HopCounter for PathInfo {
    fn hop_count(&self) -> usize {
        self.path.hop_count()
    }
}
