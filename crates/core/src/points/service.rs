//! Points ledger service.
//!
//! The ledger is the only writer of point totals. Awards are best-effort: a
//! storage failure is logged and reported as `None`, never propagated into the
//! financial write that triggered the award.

use std::sync::Arc;

use kapsa_shared::types::UserId;
use tracing::{debug, error, info, warn};

use super::error::PointsError;
use super::level::PointAction;
use super::store::PointsStore;
use super::types::{AwardOutcome, LeaderboardEntry, LevelProgress};

/// Default number of leaderboard rows.
pub const DEFAULT_LEADERBOARD_LIMIT: u64 = 10;

/// Upper bound on leaderboard rows per request.
pub const MAX_LEADERBOARD_LIMIT: u64 = 100;

/// Per-user points ledger over an injected store.
#[derive(Clone)]
pub struct PointsLedger {
    store: Arc<dyn PointsStore>,
}

impl std::fmt::Debug for PointsLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointsLedger").finish_non_exhaustive()
    }
}

impl PointsLedger {
    /// Creates a ledger over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn PointsStore>) -> Self {
        Self { store }
    }

    /// Awards `points` to a user.
    ///
    /// Non-positive awards are rejected before the store is touched. The
    /// returned outcome's level always equals `floor(total / 1000) + 1`.
    ///
    /// # Errors
    ///
    /// Returns `PointsError::InvalidAward` for `points <= 0`, or the store's
    /// error if the increment fails.
    pub async fn try_award_points(
        &self,
        user_id: UserId,
        points: i64,
    ) -> Result<AwardOutcome, PointsError> {
        if points <= 0 {
            return Err(PointsError::InvalidAward(points));
        }

        let record = self.store.upsert_increment(user_id, points).await?;
        let outcome = AwardOutcome::from_record(&record, points);

        if outcome.leveled_up {
            info!(
                user_id = %user_id,
                previous_level = outcome.previous_level,
                new_level = outcome.level,
                total_points = outcome.total_points,
                "User leveled up"
            );
        } else {
            debug!(
                user_id = %user_id,
                points,
                total_points = outcome.total_points,
                "Points awarded"
            );
        }

        Ok(outcome)
    }

    /// Awards `points`, logging and swallowing any failure.
    pub async fn award_points(&self, user_id: UserId, points: i64) -> Option<AwardOutcome> {
        match self.try_award_points(user_id, points).await {
            Ok(outcome) => Some(outcome),
            Err(e @ PointsError::InvalidAward(_)) => {
                warn!(user_id = %user_id, error = %e, "Rejected point award");
                None
            }
            Err(e) => {
                error!(user_id = %user_id, points, error = %e, "Failed to award points");
                None
            }
        }
    }

    /// Awards the points defined for `action`.
    pub async fn award(&self, user_id: UserId, action: PointAction) -> Option<AwardOutcome> {
        self.award_points(user_id, action.points()).await
    }

    /// Returns a user's progress toward the next level.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the record cannot be read.
    pub async fn progress(&self, user_id: UserId) -> Result<LevelProgress, PointsError> {
        let record = self.store.get(user_id).await?;
        Ok(LevelProgress::from_record(record.as_ref()))
    }

    /// Returns the top users by total points.
    ///
    /// `limit` is clamped to `1..=MAX_LEADERBOARD_LIMIT`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the records cannot be read.
    pub async fn leaderboard(&self, limit: u64) -> Result<Vec<LeaderboardEntry>, PointsError> {
        let limit = limit.clamp(1, MAX_LEADERBOARD_LIMIT);
        let records = self.store.top(limit).await?;

        Ok(records
            .into_iter()
            .zip(1u32..)
            .map(|(record, rank)| LeaderboardEntry {
                rank,
                user_id: record.user_id,
                level: record.level,
                total_points: record.total_points,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::points::memory::MemoryPointsStore;
    use crate::points::types::PointsRecord;

    /// Store whose writes fail while `failing` is set.
    struct FlakyStore {
        inner: MemoryPointsStore,
        failing: AtomicBool,
    }

    #[async_trait]
    impl PointsStore for FlakyStore {
        async fn get(&self, user_id: UserId) -> Result<Option<PointsRecord>, PointsError> {
            self.inner.get(user_id).await
        }

        async fn upsert_increment(
            &self,
            user_id: UserId,
            points: i64,
        ) -> Result<PointsRecord, PointsError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PointsError::Persistence("connection reset".into()));
            }
            self.inner.upsert_increment(user_id, points).await
        }

        async fn top(&self, limit: u64) -> Result<Vec<PointsRecord>, PointsError> {
            self.inner.top(limit).await
        }
    }

    fn ledger_with(store: Arc<MemoryPointsStore>) -> PointsLedger {
        PointsLedger::new(store)
    }

    fn seed(store: &MemoryPointsStore, total_points: i64) -> UserId {
        let user_id = UserId::new();
        store.seed(PointsRecord {
            user_id,
            total_points,
            level: 1,
            current_streak: 0,
            longest_streak: 0,
            last_activity_at: None,
            updated_at: Utc::now(),
        });
        user_id
    }

    #[tokio::test]
    async fn test_new_user_first_award() {
        let ledger = ledger_with(Arc::new(MemoryPointsStore::new()));
        let outcome = ledger.try_award_points(UserId::new(), 10).await.unwrap();

        assert_eq!(outcome.total_points, 10);
        assert_eq!(outcome.level, 1);
        assert!(!outcome.leveled_up);
    }

    #[tokio::test]
    async fn test_award_crossing_boundary_levels_up() {
        let store = Arc::new(MemoryPointsStore::new());
        let user_id = seed(&store, 995);
        let ledger = ledger_with(store);

        let outcome = ledger.try_award_points(user_id, 10).await.unwrap();

        assert_eq!(outcome.total_points, 1005);
        assert_eq!(outcome.level, 2);
        assert_eq!(outcome.previous_level, 1);
        assert!(outcome.leveled_up);
    }

    #[tokio::test]
    async fn test_award_within_level_does_not_level_up() {
        let store = Arc::new(MemoryPointsStore::new());
        let user_id = seed(&store, 1005);
        let ledger = ledger_with(store);

        let outcome = ledger.try_award_points(user_id, 10).await.unwrap();

        assert_eq!(outcome.total_points, 1015);
        assert_eq!(outcome.level, 2);
        assert!(!outcome.leveled_up);
    }

    #[tokio::test]
    async fn test_large_first_award_uses_level_formula() {
        let ledger = ledger_with(Arc::new(MemoryPointsStore::new()));
        let outcome = ledger.try_award_points(UserId::new(), 2500).await.unwrap();

        assert_eq!(outcome.level, 3);
        assert_eq!(outcome.previous_level, 1);
        assert!(outcome.leveled_up);
    }

    #[tokio::test]
    async fn test_zero_and_negative_awards_rejected() {
        let store = Arc::new(MemoryPointsStore::new());
        let user_id = seed(&store, 50);
        let ledger = ledger_with(Arc::clone(&store));

        assert_eq!(
            ledger.try_award_points(user_id, 0).await,
            Err(PointsError::InvalidAward(0))
        );
        assert_eq!(
            ledger.try_award_points(user_id, -5).await,
            Err(PointsError::InvalidAward(-5))
        );
        assert!(ledger.award_points(user_id, 0).await.is_none());

        let record = store.get(user_id).await.unwrap().unwrap();
        assert_eq!(record.total_points, 50);
    }

    #[tokio::test]
    async fn test_zero_award_for_unknown_user_creates_nothing() {
        let store = Arc::new(MemoryPointsStore::new());
        let ledger = ledger_with(Arc::clone(&store));

        assert!(ledger.award_points(UserId::new(), 0).await.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_returns_none_and_keeps_record() {
        let store = Arc::new(FlakyStore {
            inner: MemoryPointsStore::new(),
            failing: AtomicBool::new(false),
        });
        let ledger = PointsLedger::new(Arc::clone(&store) as Arc<dyn PointsStore>);
        let user_id = UserId::new();

        ledger.award_points(user_id, 120).await.unwrap();

        store.failing.store(true, Ordering::SeqCst);
        assert!(ledger.award_points(user_id, 10).await.is_none());
        assert!(matches!(
            ledger.try_award_points(user_id, 10).await,
            Err(PointsError::Persistence(_))
        ));

        let record = store.get(user_id).await.unwrap().unwrap();
        assert_eq!(record.total_points, 120);
        assert_eq!(record.level, 1);

        store.failing.store(false, Ordering::SeqCst);
        let outcome = ledger.award_points(user_id, 10).await.unwrap();
        assert_eq!(outcome.total_points, 130);
    }

    #[tokio::test]
    async fn test_award_by_action() {
        let ledger = ledger_with(Arc::new(MemoryPointsStore::new()));
        let user_id = UserId::new();

        ledger.award(user_id, PointAction::AddTransaction).await.unwrap();
        let outcome = ledger.award(user_id, PointAction::GoalCreated).await.unwrap();

        assert_eq!(outcome.points_awarded, 50);
        assert_eq!(outcome.total_points, 60);
    }

    #[tokio::test]
    async fn test_concurrent_awards_do_not_lose_updates() {
        let store = Arc::new(MemoryPointsStore::new());
        let ledger = Arc::new(ledger_with(Arc::clone(&store)));
        let user_id = UserId::new();

        let tasks: Vec<_> = (0..200)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move { ledger.try_award_points(user_id, 10).await })
            })
            .collect();

        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        let record = store.get(user_id).await.unwrap().unwrap();
        assert_eq!(record.total_points, 2000);
        assert_eq!(record.level, 3);
    }

    #[tokio::test]
    async fn test_progress_for_unknown_user() {
        let ledger = ledger_with(Arc::new(MemoryPointsStore::new()));
        let progress = ledger.progress(UserId::new()).await.unwrap();

        assert_eq!(progress.level, 1);
        assert_eq!(progress.total_points, 0);
    }

    #[tokio::test]
    async fn test_leaderboard_ranks_and_clamps() {
        let store = Arc::new(MemoryPointsStore::new());
        let first = seed(&store, 3000);
        let second = seed(&store, 1200);
        seed(&store, 40);
        let ledger = ledger_with(store);

        let board = ledger.leaderboard(2).await.unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].user_id, first);
        assert_eq!(board[0].level, 4);
        assert_eq!(board[1].rank, 2);
        assert_eq!(board[1].user_id, second);

        let board = ledger.leaderboard(0).await.unwrap();
        assert_eq!(board.len(), 1);
    }
}
