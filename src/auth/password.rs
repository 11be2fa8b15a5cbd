use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

/// Checks `current` against the stored hash and returns the hash for `new`.
///
/// A wrong current password is `Unauthorized`; reusing it as the new one is a
/// `BadRequest`.
pub fn rehash_for_change(current: &str, new: &str, stored_hash: &str) -> Result<String, AppError> {
    if !verify_password(current, stored_hash)? {
        return Err(AppError::Unauthorized("Current password is incorrect".into()));
    }
    if current == new {
        return Err(AppError::BadRequest(
            "New password must differ from the current one".into(),
        ));
    }
    hash_password(new)
}
