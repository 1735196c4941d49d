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

//! # Multipath path selection
//!
//! Policies deciding which of several SCION paths between two endpoints carries the traffic of a
//! multipath session, and when that decision should be revisited.
//!
//! The session manager owns the candidate paths and refreshes their state ([`PathInfo`]) from
//! its path monitor. Whenever it needs a decision it hands a snapshot of the candidates to a
//! [`Policy`], which returns the index of the path to use together with a re-evaluation deadline.
//!
//! ```
//! use std::time::{Duration, SystemTime};
//!
//! use scion_mpsquic::{
//!     path::types::PathInfo,
//!     policy::{Policy, PolicyConfig, lowest_rtt::LowestRtt},
//! };
//! use scion_proto::{address::IsdAsn, path::test_builder::TestPathBuilder};
//!
//! let src: IsdAsn = "1-ff00:0:110".parse().unwrap();
//! let dst: IsdAsn = "1-ff00:0:120".parse().unwrap();
//!
//! let paths = vec![
//!     PathInfo::new(TestPathBuilder::linear(src, dst, 3, 0).build())
//!         .with_rtt(Duration::from_millis(50)),
//!     PathInfo::new(TestPathBuilder::linear(src, dst, 5, 1).build())
//!         .with_rtt(Duration::from_millis(20)),
//! ];
//!
//! let policy = LowestRtt::new(PolicyConfig::default()).unwrap();
//! let now = SystemTime::now();
//! let selection = policy.select_at(&paths, now).unwrap();
//!
//! assert_eq!(selection.index, 1);
//! assert_eq!(selection.next_evaluation, now + Duration::from_secs(1));
//! ```
//!
//! [`ActivePathSelector`](selector::ActivePathSelector) wraps a policy for callers that want the
//! deadline and out-of-cycle re-evaluation handled for them.

pub mod path;
pub mod policy;
pub mod selector;

pub use path::types::PathInfo;
pub use policy::{Policy, Selection};
