#![allow(dead_code)]

use actix_web::body::to_bytes;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use coursedesk::auth::generate_token;
use coursedesk::blacklist::TokenBlacklist;
use coursedesk::models::Role;
use coursedesk::AppError;
use serde_json::Value;
use std::sync::Once;

pub const JWT_SECRET: &str = "integration-test-secret";

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        std::env::set_var("JWT_SECRET", JWT_SECRET);
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub fn token_for(user_id: i32, role: Role) -> String {
    init();
    generate_token(user_id, role, Duration::hours(1)).expect("token generation")
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Status of a request whether the app answered or a middleware bailed out.
pub async fn status_of<S, B>(app: &S, req: actix_http::Request) -> StatusCode
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.error_response().status(),
    }
}

/// Status and JSON body of a request that a middleware refused.
pub async fn rejection_of<S, B>(app: &S, req: actix_http::Request) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => panic!("request went through with {}", resp.status()),
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            let body = to_bytes(resp.into_body()).await.unwrap();
            (status, serde_json::from_slice(&body).unwrap())
        }
    }
}

/// A blacklist whose backend is always down.
pub struct UnreachableBlacklist;

#[async_trait]
impl TokenBlacklist for UnreachableBlacklist {
    async fn is_blacklisted(&self, _token: &str) -> Result<bool, AppError> {
        Err(AppError::StorageError("connection refused".into()))
    }

    async fn blacklist(
        &self,
        _token: &str,
        _user_id: i32,
        _expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        Err(AppError::StorageError("connection refused".into()))
    }

    async fn cleanup_expired(&self) -> Result<u64, AppError> {
        Err(AppError::StorageError("connection refused".into()))
    }
}

/// Builds the API the way `main` does, minus the database pool.
macro_rules! test_app {
    ($store:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from($store))
                .wrap(actix_web::middleware::Logger::default())
                .service(coursedesk::routes::health::health)
                .service(
                    actix_web::web::scope("/api")
                        .wrap(coursedesk::auth::AuthMiddleware)
                        .configure(coursedesk::routes::config),
                ),
        )
        .await
    };
}
