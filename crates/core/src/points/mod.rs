//! Gamification points and levels.
//!
//! This module implements the points ledger:
//! - Award magnitudes and level arithmetic
//! - The storage seam and an in-memory backend
//! - The ledger service (award, progress, leaderboard)
//! - A post-commit queue that decouples awards from financial writes

pub mod dispatcher;
pub mod error;
pub mod level;
pub mod memory;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod service_props;

pub use dispatcher::{AwardDispatcher, AwardRequest, AwardWorker, WorkerStats};
pub use error::PointsError;
pub use level::{POINTS_PER_LEVEL, PointAction, STREAK_BONUS_PER_DAY, level_for};
pub use memory::MemoryPointsStore;
pub use service::{DEFAULT_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT, PointsLedger};
pub use store::PointsStore;
pub use types::{AwardOutcome, LeaderboardEntry, LevelProgress, PointsRecord};
