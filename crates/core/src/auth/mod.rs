//! Authentication and password hashing.
//!
//! This module provides:
//! - Password policy checks
//! - Password hashing and verification with Argon2id
//! - Email normalization for account lookups

mod password;

pub use password::{
    MIN_PASSWORD_LEN, PasswordError, check_password_policy, hash_password, verify_password,
};

/// Normalizes an email address for storage and lookup.
///
/// Returns `None` if the value cannot be an email address.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        return None;
    }

    Some(email)
}
