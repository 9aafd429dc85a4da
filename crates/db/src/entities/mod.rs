//! `SeaORM` entity definitions.

pub mod fixed_expenses;
pub mod goals;
pub mod incomes;
pub mod user_points;
pub mod users;
pub mod variable_expenses;
