//! Point values and level arithmetic.
//!
//! All award magnitudes live in [`PointAction`]; no call site hard-codes a
//! point literal.

use serde::{Deserialize, Serialize};

/// Points required to advance one level.
pub const POINTS_PER_LEVEL: i64 = 1000;

/// Streak bonus per consecutive active day.
pub const STREAK_BONUS_PER_DAY: i64 = 5;

/// A user action that earns points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointAction {
    /// An income or expense was recorded.
    AddTransaction,
    /// A savings goal was created.
    GoalCreated,
    /// A weekly goal was met.
    WeeklyGoalMet,
    /// A monthly goal was met.
    MonthlyGoalMet,
    /// Bonus for a run of consecutive active days.
    StreakBonus {
        /// Length of the streak in days.
        days: u32,
    },
}

impl PointAction {
    /// Returns the number of points this action is worth.
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn points(self) -> i64 {
        match self {
            Self::AddTransaction => 10,
            Self::GoalCreated | Self::WeeklyGoalMet => 50,
            Self::MonthlyGoalMet => 200,
            Self::StreakBonus { days } => STREAK_BONUS_PER_DAY * days as i64,
        }
    }

    /// Returns a stable name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddTransaction => "add_transaction",
            Self::GoalCreated => "goal_created",
            Self::WeeklyGoalMet => "weekly_goal_met",
            Self::MonthlyGoalMet => "monthly_goal_met",
            Self::StreakBonus { .. } => "streak_bonus",
        }
    }
}

impl std::fmt::Display for PointAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes the level for a point total: `floor(total / 1000) + 1`.
///
/// Negative totals are treated as zero.
#[must_use]
pub fn level_for(total_points: i64) -> i32 {
    let level = total_points.max(0) / POINTS_PER_LEVEL + 1;
    i32::try_from(level).unwrap_or(i32::MAX)
}
