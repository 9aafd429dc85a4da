//! Postgres backend for the points ledger.

use async_trait::async_trait;
use chrono::Utc;
use kapsa_core::points::{POINTS_PER_LEVEL, PointsError, PointsRecord, PointsStore};
use kapsa_shared::types::UserId;
use sea_orm::{
    DatabaseConnection, DbBackend, DbErr, EntityTrait, QueryOrder, QuerySelect, Statement,
};
use tracing::debug;

use crate::entities::user_points;

/// Creates the row on first award, otherwise adds to the stored total.
///
/// The level is recomputed from the new total inside the same statement, so
/// concurrent awards for one user serialize on the row lock and none are lost.
/// `$3` is the level width; the level saturates at the `INTEGER` maximum.
/// An increment that would overflow `BIGINT` skips the update and returns no row.
const UPSERT_INCREMENT_SQL: &str = r"
INSERT INTO user_points (user_id, total_points, level, last_activity_at, created_at, updated_at)
VALUES ($1, $2, LEAST($2::BIGINT / $3 + 1, 2147483647)::INTEGER, now(), now(), now())
ON CONFLICT (user_id) DO UPDATE SET
    total_points = user_points.total_points + EXCLUDED.total_points,
    level = LEAST((user_points.total_points + EXCLUDED.total_points) / $3 + 1, 2147483647)::INTEGER,
    last_activity_at = EXCLUDED.last_activity_at,
    updated_at = EXCLUDED.updated_at
WHERE user_points.total_points <= 9223372036854775807 - EXCLUDED.total_points
RETURNING *
";

/// Points store backed by the `user_points` table.
#[derive(Debug, Clone)]
pub struct PointsRepository {
    db: DatabaseConnection,
}

impl PointsRepository {
    /// Creates a new points repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn persistence(e: DbErr) -> PointsError {
    PointsError::Persistence(e.to_string())
}

fn to_record(model: user_points::Model) -> PointsRecord {
    PointsRecord {
        user_id: UserId::from_uuid(model.user_id),
        total_points: model.total_points,
        level: model.level,
        current_streak: model.current_streak,
        longest_streak: model.longest_streak,
        last_activity_at: model.last_activity_at.map(|t| t.with_timezone(&Utc)),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

#[async_trait]
impl PointsStore for PointsRepository {
    async fn get(&self, user_id: UserId) -> Result<Option<PointsRecord>, PointsError> {
        user_points::Entity::find_by_id(user_id.into_inner())
            .one(&self.db)
            .await
            .map(|row| row.map(to_record))
            .map_err(persistence)
    }

    async fn upsert_increment(
        &self,
        user_id: UserId,
        points: i64,
    ) -> Result<PointsRecord, PointsError> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            UPSERT_INCREMENT_SQL,
            [
                user_id.into_inner().into(),
                points.into(),
                POINTS_PER_LEVEL.into(),
            ],
        );

        let row = user_points::Entity::find()
            .from_raw_sql(stmt)
            .one(&self.db)
            .await
            .map_err(persistence)?
            .ok_or(PointsError::Overflow)?;

        debug!(user_id = %user_id, total_points = row.total_points, "Points row upserted");
        Ok(to_record(row))
    }

    async fn top(&self, limit: u64) -> Result<Vec<PointsRecord>, PointsError> {
        user_points::Entity::find()
            .order_by_desc(user_points::Column::TotalPoints)
            .order_by_asc(user_points::Column::UserId)
            .limit(limit)
            .all(&self.db)
            .await
            .map(|rows| rows.into_iter().map(to_record).collect())
            .map_err(persistence)
    }
}
