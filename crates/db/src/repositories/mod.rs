//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod dashboard;
pub mod error;
pub mod expense;
pub mod fixed_expense;
pub mod goal;
pub mod income;
pub mod points;
pub mod user;

pub use dashboard::{CategoryTotal, DashboardRepository, DashboardSummary, EntryKind, RecentEntry};
pub use error::EntryError;
pub use expense::ExpenseRepository;
pub use fixed_expense::{FixedExpenseRepository, monthly_total_of};
pub use goal::GoalRepository;
pub use income::IncomeRepository;
pub use points::PointsRepository;
pub use user::UserRepository;
