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

//! Path selection policies.
//!
//! A [`Policy`] picks the path that carries the traffic of a multipath session out of a
//! non-empty snapshot of candidates, and tells the caller when to ask again. Policies are pure:
//! they do not keep references to the snapshot, perform no I/O and never block. The caller may
//! ask again before the deadline, e.g. when it learns that the selected path was revoked or
//! expired.

use std::{
    cmp::Ordering,
    time::{Duration, SystemTime},
};

use thiserror::Error;

use crate::path::types::PathInfo;

pub mod lowest_rtt;
pub mod ranked;

/// Chooses the active path out of a set of candidates.
pub trait Policy: 'static + Send + Sync {
    /// Selects a path from `paths`, evaluated at `now`.
    ///
    /// On success the returned index is within bounds of `paths`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NoCandidatePaths`] if `paths` is empty.
    fn select_at(&self, paths: &[PathInfo], now: SystemTime) -> Result<Selection, SelectError>;

    /// Selects a path from `paths`, evaluated at the current time.
    fn select(&self, paths: &[PathInfo]) -> Result<Selection, SelectError> {
        self.select_at(paths, SystemTime::now())
    }
}

/// Outcome of a path selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Index of the selected path in the evaluated snapshot.
    pub index: usize,
    /// Time after which the selection should be re-evaluated.
    pub next_evaluation: SystemTime,
}

/// Path selection errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// The snapshot contained no paths.
    #[error("no candidate paths to select from")]
    NoCandidatePaths,
}

/// Policy configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The re-evaluation interval is zero.
    #[error("re-evaluation interval must be greater than zero")]
    ZeroReevaluateInterval,
    /// The re-evaluation interval exceeds [`PolicyConfig::MAX_REEVALUATE_INTERVAL`].
    #[error("re-evaluation interval {0:?} exceeds the maximum of one day")]
    ReevaluateIntervalTooLarge(Duration),
}

/// Configuration shared by the provided policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Interval after which a selection is re-evaluated, absent earlier triggers.
    pub reevaluate_interval: Duration,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            reevaluate_interval: Self::DEFAULT_REEVALUATE_INTERVAL,
        }
    }
}

impl PolicyConfig {
    /// Default re-evaluation interval.
    pub const DEFAULT_REEVALUATE_INTERVAL: Duration = Duration::from_secs(1);
    /// Largest accepted re-evaluation interval.
    pub const MAX_REEVALUATE_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

    /// Returns this config with the given re-evaluation interval.
    pub fn with_reevaluate_interval(mut self, interval: Duration) -> Self {
        self.reevaluate_interval = interval;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reevaluate_interval.is_zero() {
            // The caller would have to re-evaluate continuously
            return Err(ConfigError::ZeroReevaluateInterval);
        }
        if self.reevaluate_interval > Self::MAX_REEVALUATE_INTERVAL {
            return Err(ConfigError::ReevaluateIntervalTooLarge(
                self.reevaluate_interval,
            ));
        }

        Ok(())
    }

    /// Returns the re-evaluation deadline for a selection made at `now`.
    ///
    /// If the deadline is not representable, `now` is returned and the selection is due for
    /// re-evaluation immediately.
    pub fn next_evaluation(&self, now: SystemTime) -> SystemTime {
        now.checked_add(self.reevaluate_interval).unwrap_or(now)
    }
}

/// Returns the index of the most preferred path under `rank_order`.
///
/// Single linear scan; the current best is only replaced by a strictly preferred candidate, so
/// among equally preferred paths the first one wins.
pub(crate) fn best_index_by<F>(paths: &[PathInfo], rank_order: F) -> Result<usize, SelectError>
where
    F: Fn(&PathInfo, &PathInfo) -> Ordering,
{
    if paths.is_empty() {
        return Err(SelectError::NoCandidatePaths);
    }

    let mut best = 0;
    for (i, candidate) in paths.iter().enumerate().skip(1) {
        if rank_order(candidate, &paths[best]) == Ordering::Less {
            best = i;
        }
    }

    if paths[best].revoked {
        tracing::warn!(candidates = paths.len(), "All candidate paths are revoked");
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn default_config_should_reevaluate_every_second() {
        let config = PolicyConfig::default();
        assert_eq!(config.reevaluate_interval, Duration::from_secs(1));
        assert_eq!(config.validate(), Ok(()));

        let now = SystemTime::UNIX_EPOCH;
        assert_eq!(config.next_evaluation(now), now + Duration::from_secs(1));
    }

    #[test_log::test]
    fn should_reject_zero_interval() {
        let config = PolicyConfig::default().with_reevaluate_interval(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroReevaluateInterval));
    }

    #[test_log::test]
    fn should_reject_oversized_interval() {
        let config = PolicyConfig::default().with_reevaluate_interval(Duration::MAX);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ReevaluateIntervalTooLarge(Duration::MAX))
        );

        let max = PolicyConfig::default()
            .with_reevaluate_interval(PolicyConfig::MAX_REEVALUATE_INTERVAL);
        assert_eq!(max.validate(), Ok(()));
    }

    #[test_log::test]
    fn next_evaluation_should_not_overflow() {
        let config = PolicyConfig {
            reevaluate_interval: Duration::MAX,
        };
        let now = SystemTime::now();
        assert_eq!(config.next_evaluation(now), now);
    }

    #[test_log::test]
    fn best_index_should_fail_on_empty_snapshot() {
        assert_eq!(
            best_index_by(&[], |_, _| Ordering::Equal),
            Err(SelectError::NoCandidatePaths)
        );
    }
}
