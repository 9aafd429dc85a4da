//! Core business logic for Kapsa.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `points` - Gamification points ledger and level progression
//! - `finance` - Income, expense, goal, and fixed expense rules
//! - `auth` - Password policy and hashing

pub mod auth;
pub mod finance;
pub mod points;
