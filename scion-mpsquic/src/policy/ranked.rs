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

//! Policies composed from ranking functions.

use std::{cmp::Ordering, sync::Arc, time::SystemTime};

use crate::{
    path::{ranking::PathRanking, types::PathInfo},
    policy::{ConfigError, Policy, PolicyConfig, SelectError, Selection, best_index_by},
};

/// A policy that selects the path preferred by an ordered chain of ranking functions.
///
/// Rankers are consulted in the order they were added; the first one expressing a preference
/// decides. Without any ranker every path is equally preferred and the first path is selected.
///
/// [`LowestRtt`](crate::policy::lowest_rtt::LowestRtt) is equivalent to a ranked policy of
/// [`Liveness`](crate::path::ranking::Liveness),
/// [`LowestLatency`](crate::path::ranking::LowestLatency) and
/// [`FewestHops`](crate::path::ranking::FewestHops).
#[derive(Clone, Default)]
pub struct RankedPolicy {
    config: PolicyConfig,
    /// The path ranking functions to apply.
    pub ranking: Vec<Arc<dyn PathRanking>>,
}

impl RankedPolicy {
    /// Creates a new policy without ranking functions.
    pub fn new(config: PolicyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ranking: Vec::new(),
        })
    }

    /// Appends a path ranking function to the list of ranking functions.
    pub fn add_ranking(&mut self, ranking: impl PathRanking) {
        self.ranking.push(Arc::new(ranking));
    }

    /// Returns this policy with the ranking function appended.
    pub fn with_ranking(mut self, ranking: impl PathRanking) -> Self {
        self.add_ranking(ranking);
        self
    }

    /// Ranks the order of two paths based on preference.
    ///
    /// # Return
    /// Returns the **preference ordering** between two paths.
    ///
    /// - `Ordering::Less` if `this` is preferred over `other`
    /// - `Ordering::Greater` if `other` is preferred over `this`
    /// - `Ordering::Equal` if both paths are equally preferred
    pub fn rank_order(&self, this: &PathInfo, other: &PathInfo) -> Ordering {
        for ranker in &self.ranking {
            match ranker.rank_order(this, other) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Sorts the given paths in place, placing the most preferred paths first.
    ///
    /// Uses the ranking functions in the order they were added. The sort is stable, so if no
    /// ranking functions are added, the paths are not modified.
    pub fn rank_inplace(&self, paths: &mut [PathInfo]) {
        paths.sort_by(|a, b| self.rank_order(a, b));
    }
}

impl std::fmt::Debug for RankedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankedPolicy")
            .field("config", &self.config)
            .field("rankers", &self.ranking.len())
            .finish()
    }
}

impl Policy for RankedPolicy {
    fn select_at(&self, paths: &[PathInfo], now: SystemTime) -> Result<Selection, SelectError> {
        let index = best_index_by(paths, |a, b| self.rank_order(a, b))?;

        tracing::trace!(
            candidates = paths.len(),
            rankers = self.ranking.len(),
            index,
            "Selected ranked path"
        );

        Ok(Selection {
            index,
            next_evaluation: self.config.next_evaluation(now),
        })
    }
}
