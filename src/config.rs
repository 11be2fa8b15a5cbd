use crate::error::AppError;
use std::env;
use std::str::FromStr;

/// Runtime settings read from the environment (and `.env`, via `dotenv`).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    /// Lifetime of issued JWTs, in hours.
    pub token_ttl_hours: i64,
    /// Seconds between blacklist sweeps; 0 disables the sweeper.
    pub blacklist_cleanup_secs: u64,
}

fn var_or<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::InternalServerError(format!("{} must be a number", key))),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| AppError::InternalServerError("DATABASE_URL must be set".into()))?,
            server_port: var_or("SERVER_PORT", 8080)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            token_ttl_hours: var_or("TOKEN_TTL_HOURS", 24)?,
            blacklist_cleanup_secs: var_or("BLACKLIST_CLEANUP_SECS", 3600)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }
}
