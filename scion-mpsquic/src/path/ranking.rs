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

//! Path ranking allows expressing preferences between paths.
//!
//! Rankers are small, composable comparisons. Chained in order, the first ranker with a
//! preference decides, see [`RankedPolicy`](crate::policy::ranked::RankedPolicy).

use std::cmp::Ordering;

use crate::path::{hops::HopCounter, types::PathInfo};

/// Path ranking allows expressing preferences between paths.
pub trait PathRanking: 'static + Send + Sync {
    /// Ranks the order of two paths based on preference.
    ///
    /// # Return
    /// Returns the **preference ordering** between two paths.
    ///
    /// - `Ordering::Less` if `this` is preferred over `other`
    /// - `Ordering::Greater` if `other` is preferred over `this`
    /// - `Ordering::Equal` if both paths are equally preferred
    fn rank_order(&self, this: &PathInfo, other: &PathInfo) -> Ordering;
}

// Allow any closure that matches the signature to be a PathRanking.
impl<F> PathRanking for F
where
    F: 'static + Send + Sync + Fn(&PathInfo, &PathInfo) -> Ordering,
{
    fn rank_order(&self, this: &PathInfo, other: &PathInfo) -> Ordering {
        (self)(this, other)
    }
}

/// Prefers paths that are not revoked.
#[derive(Debug, Default, Clone, Copy)]
pub struct Liveness;

impl PathRanking for Liveness {
    fn rank_order(&self, this: &PathInfo, other: &PathInfo) -> Ordering {
        this.revoked.cmp(&other.revoked)
    }
}

/// Prefers paths with a lower measured RTT.
///
/// A path without measurement ranks behind every measured path. Two unmeasured paths are equally
/// preferred.
#[derive(Debug, Default, Clone, Copy)]
pub struct LowestLatency;

impl PathRanking for LowestLatency {
    fn rank_order(&self, this: &PathInfo, other: &PathInfo) -> Ordering {
        match (this.rtt, other.rtt) {
            (Some(this), Some(other)) => this.cmp(&other),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Prefers paths traversing fewer interfaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct FewestHops;

impl PathRanking for FewestHops {
    fn rank_order(&self, this: &PathInfo, other: &PathInfo) -> Ordering {
        this.hop_count().cmp(&other.hop_count())
    }
}
