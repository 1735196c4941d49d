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

//! Active path tracking on top of a [`Policy`].
//!
//! The selector remembers the path chosen by the policy by its fingerprint, so the decision
//! survives the snapshot being rebuilt or reordered by the path monitor. It only consults the
//! policy again when a re-evaluation is due:
//!
//! - no path was selected yet
//! - the re-evaluation deadline returned by the policy has passed
//! - the active path was revoked while a live candidate is available, has expired or is no
//!   longer part of the snapshot

use std::{fmt, sync::Arc, time::SystemTime};

use scion_proto::path::PathFingerprint;

use crate::{
    path::types::PathInfo,
    policy::{Policy, SelectError},
};

/// The currently active path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePath {
    /// Fingerprint of the selected path.
    pub fingerprint: PathFingerprint,
    /// Deadline after which the selection is re-evaluated.
    pub next_evaluation: SystemTime,
}

/// Reason for consulting the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationTrigger {
    /// No path was selected yet.
    NoActivePath,
    /// The re-evaluation deadline has passed.
    DeadlineReached,
    /// The active path was revoked.
    ActivePathRevoked,
    /// The active path has expired.
    ActivePathExpired,
    /// The active path is not part of the snapshot anymore.
    ActivePathMissing,
}

impl fmt::Display for EvaluationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            EvaluationTrigger::NoActivePath => "no active path",
            EvaluationTrigger::DeadlineReached => "re-evaluation deadline reached",
            EvaluationTrigger::ActivePathRevoked => "active path revoked",
            EvaluationTrigger::ActivePathExpired => "active path expired",
            EvaluationTrigger::ActivePathMissing => "active path missing",
        };
        f.write_str(reason)
    }
}

/// Keeps track of the active path of a multipath session.
pub struct ActivePathSelector {
    policy: Arc<dyn Policy>,
    active: Option<ActivePath>,
}

impl ActivePathSelector {
    /// Creates a new selector without an active path.
    pub fn new(policy: impl Policy) -> Self {
        Self::with_shared_policy(Arc::new(policy))
    }

    /// Creates a new selector using a policy shared with other sessions.
    pub fn with_shared_policy(policy: Arc<dyn Policy>) -> Self {
        Self {
            policy,
            active: None,
        }
    }

    /// Returns the active path, if one was selected.
    pub fn active(&self) -> Option<&ActivePath> {
        self.active.as_ref()
    }

    /// Forgets the active path, forcing a re-evaluation on the next call.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Returns why the policy has to be consulted for `paths` at `now`, or `None` if the active
    /// path can be kept.
    pub fn evaluation_trigger(
        &self,
        paths: &[PathInfo],
        now: SystemTime,
    ) -> Option<EvaluationTrigger> {
        self.check(paths, now).err()
    }

    /// Returns the index of the path to use in `paths` at `now`.
    ///
    /// Consults the policy if a re-evaluation is due, otherwise returns the position of the
    /// active path in `paths`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NoCandidatePaths`] if `paths` is empty.
    pub fn active_path(
        &mut self,
        paths: &[PathInfo],
        now: SystemTime,
    ) -> Result<usize, SelectError> {
        if paths.is_empty() {
            return Err(SelectError::NoCandidatePaths);
        }

        let trigger = match self.check(paths, now) {
            Ok(index) => return Ok(index),
            Err(trigger) => trigger,
        };

        let selection = self.policy.select_at(paths, now)?;
        let selected = &paths[selection.index];
        let previous = self.active.replace(ActivePath {
            fingerprint: selected.fingerprint,
            next_evaluation: selection.next_evaluation,
        });

        match previous {
            Some(previous) if previous.fingerprint == selected.fingerprint => {
                tracing::debug!(
                    %trigger,
                    fingerprint = %selected.fingerprint,
                    "Keeping active path"
                );
            }
            Some(previous) => {
                tracing::info!(
                    %trigger,
                    from = %previous.fingerprint,
                    to = %selected.fingerprint,
                    rtt = ?selected.rtt,
                    "Switching active path"
                );
            }
            None => {
                tracing::info!(
                    %trigger,
                    fingerprint = %selected.fingerprint,
                    rtt = ?selected.rtt,
                    "Selected active path"
                );
            }
        }

        Ok(selection.index)
    }

    /// Locates the active path in `paths`, or returns the reason it cannot be kept.
    fn check(&self, paths: &[PathInfo], now: SystemTime) -> Result<usize, EvaluationTrigger> {
        let Some(active) = &self.active else {
            return Err(EvaluationTrigger::NoActivePath);
        };

        let Some(index) = paths
            .iter()
            .position(|p| p.fingerprint == active.fingerprint)
        else {
            return Err(EvaluationTrigger::ActivePathMissing);
        };

        let entry = &paths[index];
        // With every candidate revoked, the policy would pick a revoked path again
        if entry.revoked && paths.iter().any(|p| !p.revoked) {
            return Err(EvaluationTrigger::ActivePathRevoked);
        }
        if entry.path.is_expired(now) {
            return Err(EvaluationTrigger::ActivePathExpired);
        }
        if now >= active.next_evaluation {
            return Err(EvaluationTrigger::DeadlineReached);
        }

        Ok(index)
    }
}

impl fmt::Debug for ActivePathSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivePathSelector")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
