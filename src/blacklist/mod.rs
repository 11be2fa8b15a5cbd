//! Storage of revoked authentication tokens.
//!
//! A token lands here on logout or when its owner changes their password, and
//! stays until the moment it would have expired anyway. `AuthMiddleware` asks
//! the store about every bearer token it sees and refuses the request when the
//! lookup fails.

pub mod memory;
pub mod postgres;

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub use memory::InMemoryTokenBlacklist;
pub use postgres::PgTokenBlacklist;

/// A revoked token and the window during which it must be refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistedToken {
    pub token: String,
    pub user_id: i32,
    pub blacklisted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl BlacklistedToken {
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Backend-agnostic token blacklist.
///
/// Implementations must tolerate concurrent calls. Blacklisting a token that is
/// already present succeeds without touching the existing record, and any other
/// failure surfaces as `AppError::StorageError` so callers can fail closed.
#[async_trait]
pub trait TokenBlacklist: Send + Sync {
    /// Whether `token` has a record that has not expired yet.
    async fn is_blacklisted(&self, token: &str) -> Result<bool, AppError>;

    /// Records `token` as revoked until `expires_at`.
    async fn blacklist(
        &self,
        token: &str,
        user_id: i32,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Deletes every record whose expiry is at or before now and returns how
    /// many were removed.
    async fn cleanup_expired(&self) -> Result<u64, AppError>;
}

/// Runs `cleanup_expired` every `every` on the tokio runtime until the handle
/// is aborted. Failures are logged and the next tick tries again.
pub fn spawn_cleanup(store: Arc<dyn TokenBlacklist>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            if let Err(err) = store.cleanup_expired().await {
                log::warn!("Blacklist cleanup failed: {}", err);
            }
        }
    })
}
