//! In-process points store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use kapsa_shared::types::UserId;

use super::error::PointsError;
use super::level::level_for;
use super::store::PointsStore;
use super::types::PointsRecord;

/// Points store backed by a concurrent map.
///
/// The map's per-key entry lock makes each increment atomic. Records live only
/// as long as the process.
#[derive(Debug, Default)]
pub struct MemoryPointsStore {
    records: DashMap<UserId, PointsRecord>,
}

impl MemoryPointsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record; the level is recomputed from the total.
    pub fn seed(&self, mut record: PointsRecord) {
        record.level = level_for(record.total_points);
        self.records.insert(record.user_id, record);
    }

    /// Number of users with a record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no user has a record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl PointsStore for MemoryPointsStore {
    async fn get(&self, user_id: UserId) -> Result<Option<PointsRecord>, PointsError> {
        Ok(self.records.get(&user_id).map(|r| r.clone()))
    }

    async fn upsert_increment(
        &self,
        user_id: UserId,
        points: i64,
    ) -> Result<PointsRecord, PointsError> {
        let now = Utc::now();

        match self.records.entry(user_id) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                let total = record
                    .total_points
                    .checked_add(points)
                    .ok_or(PointsError::Overflow)?;

                record.total_points = total;
                record.level = level_for(total);
                record.last_activity_at = Some(now);
                record.updated_at = now;
                Ok(record.clone())
            }
            Entry::Vacant(vacant) => {
                let record = PointsRecord::first_award(user_id, points, now);
                vacant.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn top(&self, limit: u64) -> Result<Vec<PointsRecord>, PointsError> {
        let mut records: Vec<PointsRecord> = self.records.iter().map(|r| r.clone()).collect();
        records.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        records.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(records)
    }
}
