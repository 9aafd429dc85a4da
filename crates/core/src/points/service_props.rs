//! Property-based tests for PointsLedger.
//!
//! - Additivity: the total equals the sum of accepted awards
//! - Level invariant: level == floor(total / 1000) + 1 after every award
//! - Level-up detection matches boundary crossings

use std::sync::Arc;

use kapsa_shared::types::UserId;
use proptest::prelude::*;

use super::level::{POINTS_PER_LEVEL, level_for};
use super::memory::MemoryPointsStore;
use super::service::PointsLedger;
use super::store::PointsStore;

/// Strategy for a single positive award.
fn award() -> impl Strategy<Value = i64> {
    1i64..=1500
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_total_is_sum_of_awards(awards in prop::collection::vec(award(), 1..40)) {
        let store = Arc::new(MemoryPointsStore::new());
        let ledger = PointsLedger::new(Arc::clone(&store) as Arc<dyn PointsStore>);
        let user_id = UserId::new();

        block_on(async {
            for &points in &awards {
                ledger.try_award_points(user_id, points).await.unwrap();
            }
        });

        let record = block_on(store.get(user_id)).unwrap().unwrap();
        prop_assert_eq!(record.total_points, awards.iter().sum::<i64>());
    }

    #[test]
    fn prop_level_invariant_holds_after_every_award(
        awards in prop::collection::vec(award(), 1..40)
    ) {
        let ledger = PointsLedger::new(Arc::new(MemoryPointsStore::new()));
        let user_id = UserId::new();

        let outcomes = block_on(async {
            let mut outcomes = Vec::with_capacity(awards.len());
            for &points in &awards {
                outcomes.push(ledger.try_award_points(user_id, points).await.unwrap());
            }
            outcomes
        });

        for outcome in outcomes {
            prop_assert_eq!(outcome.level, level_for(outcome.total_points));
            prop_assert_eq!(
                i64::from(outcome.level),
                outcome.total_points / POINTS_PER_LEVEL + 1
            );
        }
    }

    #[test]
    fn prop_level_up_iff_boundary_crossed(start in 0i64..50_000, points in award()) {
        let store = Arc::new(MemoryPointsStore::new());
        let ledger = PointsLedger::new(Arc::clone(&store) as Arc<dyn PointsStore>);
        let user_id = UserId::new();

        if start > 0 {
            block_on(ledger.try_award_points(user_id, start)).unwrap();
        }
        let outcome = block_on(ledger.try_award_points(user_id, points)).unwrap();

        let crossed = start / POINTS_PER_LEVEL != (start + points) / POINTS_PER_LEVEL;
        prop_assert_eq!(outcome.leveled_up, crossed);
        prop_assert_eq!(outcome.total_points, start + points);
    }

    #[test]
    fn prop_non_positive_awards_never_change_total(points in -1000i64..=0) {
        let store = Arc::new(MemoryPointsStore::new());
        let ledger = PointsLedger::new(Arc::clone(&store) as Arc<dyn PointsStore>);
        let user_id = UserId::new();

        block_on(ledger.try_award_points(user_id, 50)).unwrap();
        prop_assert!(block_on(ledger.try_award_points(user_id, points)).is_err());

        let record = block_on(store.get(user_id)).unwrap().unwrap();
        prop_assert_eq!(record.total_points, 50);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_scenarios_from_existing_totals() {
        for (start, award, total, level, leveled_up) in [
            (995, 10, 1005, 2, true),
            (1005, 10, 1015, 2, false),
            (1990, 10, 2000, 3, true),
        ] {
            let ledger = PointsLedger::new(Arc::new(MemoryPointsStore::new()));
            let user_id = UserId::new();
            block_on(ledger.try_award_points(user_id, start)).unwrap();

            let outcome = block_on(ledger.try_award_points(user_id, award)).unwrap();
            assert_eq!(outcome.total_points, total);
            assert_eq!(outcome.level, level);
            assert_eq!(outcome.leveled_up, leveled_up);
        }
    }
}
