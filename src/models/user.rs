use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// What a user is allowed to do.
/// Stored in the `users.role` column as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages users and maintenance operations.
    Admin,
    /// Runs course groups.
    Teacher,
    /// Attends course groups. Default for self-registration.
    Student,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(AppError::InternalServerError(format!(
                "Unknown role in database: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the `users` table, minus the password hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Login lookup row. Role is kept as text until converted.
#[derive(Debug, FromRow)]
pub struct Credentials {
    pub id: i32,
    pub password_hash: String,
    pub role: String,
}

impl Credentials {
    pub fn role(&self) -> Result<Role, AppError> {
        self.role.parse()
    }
}
