use super::TokenBlacklist;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Blacklist backed by the `blacklisted_tokens` table.
///
/// Postgres has no native row expiry, so expired rows linger until
/// `cleanup_expired` runs; lookups ignore them in the meantime.
#[derive(Debug, Clone)]
pub struct PgTokenBlacklist {
    pool: PgPool,
}

impl PgTokenBlacklist {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// A missing row is never an error here, so bypass the RowNotFound mapping.
fn storage_error(error: sqlx::Error) -> AppError {
    log::warn!("Blacklist storage failure: {}", error);
    AppError::StorageError(error.to_string())
}

#[async_trait]
impl TokenBlacklist for PgTokenBlacklist {
    async fn is_blacklisted(&self, token: &str) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM blacklisted_tokens WHERE token = $1 AND expires_at > NOW())",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)
    }

    async fn blacklist(
        &self,
        token: &str,
        user_id: i32,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "INSERT INTO blacklisted_tokens (token, user_id, blacklisted_at, expires_at)
             VALUES ($1, $2, NOW(), $3)
             ON CONFLICT (token) DO NOTHING",
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() > 0 {
            log::info!("Blacklisted token for user {} until {}", user_id, expires_at);
        }
        Ok(())
    }

    async fn cleanup_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM blacklisted_tokens WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        let removed = result.rows_affected();
        if removed > 0 {
            log::info!("Removed {} expired blacklist entries", removed);
        }
        Ok(removed)
    }
}
