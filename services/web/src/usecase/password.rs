//! Password validation and hashing.
//!
//! bcrypt is CPU-bound, so both hashing and verification run under
//! `spawn_blocking` to keep the async runtime responsive.

use anyhow::Context as _;

use crate::domain::types::{BCRYPT_COST, PASSWORD_MIN_LEN};
use crate::error::WebServiceError;

/// Check the strength rule: minimum length, at least one lowercase letter,
/// one uppercase letter and one digit.
pub fn validate_strength(password: &str) -> Result<(), WebServiceError> {
    let long_enough = password.chars().count() >= PASSWORD_MIN_LEN;
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if long_enough && has_lower && has_upper && has_digit {
        Ok(())
    } else {
        Err(WebServiceError::WeakPassword)
    }
}

pub async fn hash(password: &str) -> Result<String, WebServiceError> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(&password, BCRYPT_COST))
        .await
        .context("join bcrypt hash task")?
        .context("bcrypt hash")?;
    Ok(hash)
}

pub async fn verify(password: &str, hash: &str) -> Result<bool, WebServiceError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let ok = tokio::task::spawn_blocking(move || bcrypt::verify(&password, &hash))
        .await
        .context("join bcrypt verify task")?
        .context("bcrypt verify")?;
    Ok(ok)
}
