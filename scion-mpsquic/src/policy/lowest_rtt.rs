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

//! Lowest RTT path selection.

use std::{cmp::Ordering, time::SystemTime};

use crate::{
    path::{
        ranking::{FewestHops, Liveness, LowestLatency, PathRanking},
        types::PathInfo,
    },
    policy::{ConfigError, Policy, PolicyConfig, SelectError, Selection, best_index_by},
};

/// Selects the live path with the lowest measured RTT.
///
/// Paths are compared by, in order:
/// 1. liveness: a non-revoked path beats a revoked one, regardless of RTT or length
/// 2. RTT: lower is better, an unmeasured RTT ranks behind every measured one
/// 3. hop count: fewer interfaces is better
///
/// If all of these are equal, the path earlier in the snapshot is kept. In the absence of any RTT
/// measurements this selects the shortest live path.
#[derive(Debug, Default, Clone, Copy)]
pub struct LowestRtt {
    config: PolicyConfig,
}

impl LowestRtt {
    /// Creates a new policy from the given configuration.
    pub fn new(config: PolicyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration of this policy.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Ranks the order of two paths, `Ordering::Less` if `this` is preferred over `other`.
    ///
    /// This is a total preorder on paths, so it can also be used for sorting.
    pub fn rank_order(this: &PathInfo, other: &PathInfo) -> Ordering {
        Liveness
            .rank_order(this, other)
            .then_with(|| LowestLatency.rank_order(this, other))
            .then_with(|| FewestHops.rank_order(this, other))
    }

    /// Checks whether `a` is strictly better than `b`.
    pub fn better(a: &PathInfo, b: &PathInfo) -> bool {
        Self::rank_order(a, b) == Ordering::Less
    }

    /// Sorts the given paths in place, most preferred first.
    ///
    /// The sort is stable, equally preferred paths keep their relative order.
    pub fn rank_inplace(paths: &mut [PathInfo]) {
        paths.sort_by(Self::rank_order);
    }
}

impl Policy for LowestRtt {
    fn select_at(&self, paths: &[PathInfo], now: SystemTime) -> Result<Selection, SelectError> {
        let index = best_index_by(paths, Self::rank_order)?;
        let next_evaluation = self.config.next_evaluation(now);

        let selected = &paths[index];
        tracing::trace!(
            candidates = paths.len(),
            index,
            fingerprint = %selected.fingerprint,
            rtt = ?selected.rtt,
            "Selected lowest RTT path"
        );

        Ok(Selection {
            index,
            next_evaluation,
        })
    }
}
