use super::{BlacklistedToken, TokenBlacklist};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-local blacklist keyed by token.
///
/// Nothing expires on its own here, so `cleanup_expired` has to be driven by
/// the periodic sweeper started in `main`.
#[derive(Debug, Default)]
pub struct InMemoryTokenBlacklist {
    records: RwLock<HashMap<String, BlacklistedToken>>,
}

impl InMemoryTokenBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held, expired ones included.
    pub fn len(&self) -> Result<usize, AppError> {
        self.records
            .read()
            .map(|records| records.len())
            .map_err(|_| poisoned())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        self.len().map(|len| len == 0)
    }
}

fn poisoned() -> AppError {
    AppError::StorageError("blacklist lock poisoned".into())
}

#[async_trait]
impl TokenBlacklist for InMemoryTokenBlacklist {
    async fn is_blacklisted(&self, token: &str) -> Result<bool, AppError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records
            .get(token)
            .map_or(false, |record| record.is_live_at(Utc::now())))
    }

    async fn blacklist(
        &self,
        token: &str,
        user_id: i32,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records
            .entry(token.to_string())
            .or_insert_with(|| BlacklistedToken {
                token: token.to_string(),
                user_id,
                blacklisted_at: Utc::now(),
                expires_at,
            });
        log::info!("Blacklisted token for user {} until {}", user_id, expires_at);
        Ok(())
    }

    async fn cleanup_expired(&self) -> Result<u64, AppError> {
        let now = Utc::now();
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let before = records.len();
        records.retain(|_, record| record.is_live_at(now));
        let removed = (before - records.len()) as u64;
        if removed > 0 {
            log::info!("Removed {} expired blacklist entries", removed);
        }
        Ok(removed)
    }
}
