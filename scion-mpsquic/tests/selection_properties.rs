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

//! Properties of path selection over arbitrary candidate snapshots.
//!
//! 1. The selected index is always within bounds
//! 2. A revoked path is never selected while a live one exists
//! 3. Among live paths the selected one has the lowest RTT
//! 4. Ties are broken by hop count, then by position in the snapshot
//! 5. Selection is idempotent on an unchanged snapshot
//! 6. The comparator is a total preorder, so it can be used for sorting

use std::{
    cmp::Ordering,
    sync::Arc,
    time::{Duration, SystemTime},
};

use proptest::{collection::vec, prelude::*, proptest};
use proptest_derive::Arbitrary;
use scion_mpsquic::{
    path::{
        hops::HopCounter,
        ranking::{FewestHops, Liveness, LowestLatency, PathRanking},
        types::PathInfo,
    },
    policy::{Policy, PolicyConfig, SelectError, lowest_rtt::LowestRtt, ranked::RankedPolicy},
};
use scion_proto::{
    address::{Asn, Isd, IsdAsn},
    path::test_builder::TestPathBuilder,
};

const SRC: IsdAsn = IsdAsn::new(Isd(1), Asn::new(0xff00_0000_0110));
const DST: IsdAsn = IsdAsn::new(Isd(2), Asn::new(0xff00_0000_0220));
const NOW: SystemTime = SystemTime::UNIX_EPOCH;

/// Candidate description; small value ranges make ties likely.
#[derive(Debug, Clone, Arbitrary)]
struct CandidateOptions {
    #[proptest(strategy = "prop::option::of(0u64..4)")]
    rtt_ms: Option<u64>,
    revoked: bool,
    #[proptest(strategy = "1u16..5")]
    as_count: u16,
}

fn candidate(rtt_ms: Option<u64>, revoked: bool, as_count: u16, seed: u32) -> PathInfo {
    let mut info = PathInfo::new(TestPathBuilder::linear(SRC, DST, as_count, seed).build());
    info.rtt = rtt_ms.map(Duration::from_millis);
    info.set_revoked(revoked);
    info
}

fn to_path_infos(options: &[CandidateOptions]) -> Vec<PathInfo> {
    options
        .iter()
        .enumerate()
        .map(|(seed, opts)| candidate(opts.rtt_ms, opts.revoked, opts.as_count, seed as u32))
        .collect()
}

fn snapshot(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<PathInfo>> {
    vec(any::<CandidateOptions>(), len).prop_map(|opts| to_path_infos(&opts))
}

#[test]
fn selection_should_be_within_bounds_and_prefer_live_paths() {
    proptest!(|(paths in snapshot(1..12))| {
        let index = LowestRtt::default().select_at(&paths, NOW).unwrap().index;
        prop_assert!(index < paths.len());

        if paths.iter().any(|p| !p.revoked) {
            prop_assert!(!paths[index].revoked);
        }
    });
}

#[test]
fn selection_should_have_lowest_rtt_among_equally_live_paths() {
    proptest!(|(paths in snapshot(1..12))| {
        let index = LowestRtt::default().select_at(&paths, NOW).unwrap().index;
        let selected = &paths[index];

        for other in paths.iter().filter(|p| p.revoked == selected.revoked) {
            prop_assert_ne!(LowestLatency.rank_order(selected, other), Ordering::Greater);
        }
    });
}

#[test]
fn ties_should_be_broken_by_hops_then_position() {
    proptest!(|(paths in snapshot(1..12))| {
        let index = LowestRtt::default().select_at(&paths, NOW).unwrap().index;
        let selected = &paths[index];

        for (i, other) in paths.iter().enumerate() {
            if other.revoked == selected.revoked && other.rtt == selected.rtt {
                prop_assert!(selected.hop_count() <= other.hop_count());
            }
            if i < index {
                // Every earlier path is strictly worse
                prop_assert_eq!(LowestRtt::rank_order(other, selected), Ordering::Greater);
            }
        }
    });
}

#[test]
fn selection_should_be_idempotent() {
    proptest!(|(paths in snapshot(1..12))| {
        let policy = LowestRtt::default();
        let first = policy.select_at(&paths, NOW).unwrap();
        let second = policy.select_at(&paths, NOW).unwrap();
        prop_assert_eq!(first, second);
    });
}

#[test]
fn comparator_should_be_a_total_preorder() {
    proptest!(|(paths in snapshot(3..4))| {
        let (a, b, c) = (&paths[0], &paths[1], &paths[2]);

        prop_assert_eq!(LowestRtt::rank_order(a, b), LowestRtt::rank_order(b, a).reverse());
        prop_assert_eq!(LowestRtt::rank_order(a, a), Ordering::Equal);

        if LowestRtt::rank_order(a, b) != Ordering::Greater
            && LowestRtt::rank_order(b, c) != Ordering::Greater
        {
            prop_assert_ne!(LowestRtt::rank_order(a, c), Ordering::Greater);
        }
        if LowestRtt::better(a, b) && LowestRtt::better(b, c) {
            prop_assert!(LowestRtt::better(a, c));
        }
    });
}

#[test]
fn sorted_snapshot_should_start_with_selected_path() {
    proptest!(|(paths in snapshot(1..12))| {
        let index = LowestRtt::default().select_at(&paths, NOW).unwrap().index;

        let mut sorted = paths.clone();
        LowestRtt::rank_inplace(&mut sorted);

        prop_assert_eq!(sorted[0].fingerprint, paths[index].fingerprint);
    });
}

#[test]
fn lowest_rtt_should_match_equivalent_ranked_policy() {
    let ranked = RankedPolicy::new(PolicyConfig::default())
        .unwrap()
        .with_ranking(Liveness)
        .with_ranking(LowestLatency)
        .with_ranking(FewestHops);

    proptest!(|(paths in snapshot(1..12))| {
        prop_assert_eq!(
            LowestRtt::default().select_at(&paths, NOW),
            ranked.select_at(&paths, NOW)
        );
    });
}

mod examples {
    use super::*;

    fn select(paths: &[PathInfo]) -> usize {
        let policy: Arc<dyn Policy> = Arc::new(LowestRtt::default());
        policy.select(paths).unwrap().index
    }

    #[test_log::test]
    fn lower_rtt_wins_over_fewer_hops() {
        let paths = [
            candidate(Some(50), false, 3, 0),
            candidate(Some(20), false, 5, 1),
        ];
        assert!(paths[0].hop_count() < paths[1].hop_count());
        assert_eq!(select(&paths), 1);
    }

    #[test_log::test]
    fn liveness_dominates_rtt() {
        let paths = [
            candidate(Some(10), true, 2, 0),
            candidate(Some(80), false, 4, 1),
        ];
        assert_eq!(select(&paths), 1);
    }

    #[test_log::test]
    fn fewer_hops_wins_rtt_tie() {
        let paths = [
            candidate(Some(30), false, 4, 0),
            candidate(Some(30), false, 2, 1),
        ];
        assert_eq!(select(&paths), 1);
    }

    #[test_log::test]
    fn single_candidate_is_selected() {
        assert_eq!(select(&[candidate(Some(30), true, 4, 0)]), 0);
        assert_eq!(select(&[candidate(None, false, 4, 0)]), 0);
    }

    #[test_log::test]
    fn empty_snapshot_is_rejected() {
        let policy: Arc<dyn Policy> = Arc::new(LowestRtt::default());
        assert_eq!(policy.select(&[]), Err(SelectError::NoCandidatePaths));
    }

    #[test_log::test]
    fn deadline_follows_configured_interval() {
        let interval = Duration::from_millis(250);
        let policy =
            LowestRtt::new(PolicyConfig::default().with_reevaluate_interval(interval)).unwrap();

        let before = SystemTime::now();
        let selection = policy
            .select(&[candidate(Some(30), false, 2, 0)])
            .unwrap();
        let after = SystemTime::now();

        assert!(selection.next_evaluation >= before + interval);
        assert!(selection.next_evaluation <= after + interval);
    }
}
