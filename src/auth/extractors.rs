use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use chrono::{DateTime, Utc};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::models::Role;

/// The caller behind a request that passed `AuthMiddleware`.
///
/// The middleware inserts this into request extensions after the token has
/// been verified and checked against the blacklist. The raw token is kept so
/// logout and password change can revoke exactly what was presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub role: Role,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn new(claims: &Claims, token: impl Into<String>) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
            token: token.into(),
            expires_at: claims.expires_at(),
        }
    }

    /// Fails with `Forbidden` unless the user holds one of `roles`.
    pub fn require_role(&self, roles: &[Role]) -> Result<(), AppError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Role {} may not perform this action",
                self.role
            )))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>().cloned() {
            Some(user) => ready(Ok(user)),
            None => {
                // Reached only when a route is mounted outside the middleware.
                let err = AppError::Unauthorized(
                    "No authenticated user on request. Ensure AuthMiddleware is active.".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
