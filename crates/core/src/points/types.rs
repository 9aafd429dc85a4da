//! Points ledger data types.

use chrono::{DateTime, Utc};
use kapsa_shared::types::UserId;
use serde::{Deserialize, Serialize};

use super::level::{POINTS_PER_LEVEL, level_for};

/// Stored points state for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsRecord {
    /// Owner of the record.
    pub user_id: UserId,
    /// Cumulative points; never decreases.
    pub total_points: i64,
    /// Derived level, always `level_for(total_points)`.
    pub level: i32,
    /// Current run of consecutive active days.
    pub current_streak: i32,
    /// Longest run of consecutive active days.
    pub longest_streak: i32,
    /// Time of the most recent award.
    pub last_activity_at: Option<DateTime<Utc>>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl PointsRecord {
    /// Builds the record created by a user's first award.
    #[must_use]
    pub fn first_award(user_id: UserId, points: i64, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            total_points: points,
            level: level_for(points),
            current_streak: 0,
            longest_streak: 0,
            last_activity_at: Some(now),
            updated_at: now,
        }
    }
}

/// Result of a successful award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardOutcome {
    /// Recipient of the award.
    pub user_id: UserId,
    /// Points added by this award.
    pub points_awarded: i64,
    /// Total after the award.
    pub total_points: i64,
    /// Level after the award.
    pub level: i32,
    /// Level before the award (1 for a brand new user).
    pub previous_level: i32,
    /// True if this award crossed at least one level boundary.
    pub leveled_up: bool,
}

impl AwardOutcome {
    /// Derives the outcome from the record written by an award of `points`.
    #[must_use]
    pub fn from_record(record: &PointsRecord, points: i64) -> Self {
        let previous_level = level_for(record.total_points.saturating_sub(points));
        Self {
            user_id: record.user_id,
            points_awarded: points,
            total_points: record.total_points,
            level: record.level,
            previous_level,
            leveled_up: record.level > previous_level,
        }
    }
}

/// Progress toward the next level, as shown on a user's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Current level.
    pub level: i32,
    /// Current total.
    pub total_points: i64,
    /// Total at which the next level starts.
    pub next_level_points: i64,
    /// Points still needed for the next level.
    pub points_to_next_level: i64,
    /// Percentage through the current level (0-99).
    pub progress_percent: u8,
    /// Current streak in days.
    pub current_streak: i32,
    /// Longest streak in days.
    pub longest_streak: i32,
}

impl LevelProgress {
    /// Builds progress from a stored record, or the level 1 baseline when
    /// the user has never been awarded anything.
    #[must_use]
    pub fn from_record(record: Option<&PointsRecord>) -> Self {
        let (total_points, current_streak, longest_streak) = record.map_or((0, 0, 0), |r| {
            (r.total_points, r.current_streak, r.longest_streak)
        });
        let level = level_for(total_points);
        let next_level_points = i64::from(level) * POINTS_PER_LEVEL;
        let into_level = total_points.max(0) % POINTS_PER_LEVEL;

        Self {
            level,
            total_points,
            next_level_points,
            points_to_next_level: next_level_points - total_points,
            progress_percent: u8::try_from(into_level * 100 / POINTS_PER_LEVEL).unwrap_or(99),
            current_streak,
            longest_streak,
        }
    }
}

/// One row of the points leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: u32,
    /// User being ranked.
    pub user_id: UserId,
    /// User's level.
    pub level: i32,
    /// User's total.
    pub total_points: i64,
}
