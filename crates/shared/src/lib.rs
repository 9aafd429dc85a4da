//! Shared types, errors, and configuration for Kapsa.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and token service

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::{AppConfig, PointsStoreKind};
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
