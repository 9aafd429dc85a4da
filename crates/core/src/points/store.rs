//! Storage seam for point records.

use async_trait::async_trait;
use kapsa_shared::types::UserId;

use super::error::PointsError;
use super::types::PointsRecord;

/// Persistence operations the ledger needs.
///
/// Implementations must make `upsert_increment` atomic per user: concurrent
/// increments for the same user may not lose updates, and a failed call must
/// leave the stored record untouched.
///
/// Both bounds behave the same in every backend:
/// - an increment that would push the total past `i64::MAX` fails with
///   `PointsError::Overflow` and changes nothing;
/// - the level follows `level_for` and saturates at `i32::MAX`.
#[async_trait]
pub trait PointsStore: Send + Sync {
    /// Fetches a user's record, if one exists.
    async fn get(&self, user_id: UserId) -> Result<Option<PointsRecord>, PointsError>;

    /// Creates the record with `points` or adds `points` to the existing
    /// total, recomputing the level in the same operation.
    async fn upsert_increment(
        &self,
        user_id: UserId,
        points: i64,
    ) -> Result<PointsRecord, PointsError>;

    /// Returns up to `limit` records ordered by total points (highest first),
    /// ties broken by user id.
    async fn top(&self, limit: u64) -> Result<Vec<PointsRecord>, PointsError>;
}
