#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{Duration, Utc};
use common::{bearer, rejection_of, status_of, token_for, UnreachableBlacklist};
use coursedesk::blacklist::{InMemoryTokenBlacklist, TokenBlacklist};
use coursedesk::models::Role;
use serde_json::{json, Value};
use std::sync::Arc;

fn categorize_request(token: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/schedule/categorize")
        .append_header(bearer(token))
        .set_json(json!({ "groups": [] }))
        .to_request()
}

#[actix_rt::test]
async fn test_logout_revokes_token() {
    let memory = Arc::new(InMemoryTokenBlacklist::new());
    let store: Arc<dyn TokenBlacklist> = memory.clone();
    let app = test_app!(store);
    let token = token_for(42, Role::Student);

    assert_eq!(status_of(&app, categorize_request(&token)).await, StatusCode::OK);

    let logout = test::TestRequest::post()
        .uri("/api/auth/logout")
        .append_header(bearer(&token))
        .to_request();
    assert_eq!(status_of(&app, logout).await, StatusCode::NO_CONTENT);
    assert!(memory.is_blacklisted(&token).await.unwrap());

    assert_eq!(
        status_of(&app, categorize_request(&token)).await,
        StatusCode::UNAUTHORIZED
    );

    // A second logout with the same token is refused before reaching the store
    let logout_again = test::TestRequest::post()
        .uri("/api/auth/logout")
        .append_header(bearer(&token))
        .to_request();
    assert_eq!(status_of(&app, logout_again).await, StatusCode::UNAUTHORIZED);
    assert_eq!(memory.len().unwrap(), 1);

    // Other sessions of the same user are unaffected
    let other_session = token_for(42, Role::Student);
    assert_eq!(
        status_of(&app, categorize_request(&other_session)).await,
        StatusCode::OK
    );
}

#[actix_rt::test]
async fn test_expired_blacklist_entry_does_not_block() {
    let memory = Arc::new(InMemoryTokenBlacklist::new());
    let store: Arc<dyn TokenBlacklist> = memory.clone();
    let app = test_app!(store);
    let token = token_for(5, Role::Student);

    memory
        .blacklist(&token, 5, Utc::now() - Duration::seconds(1))
        .await
        .unwrap();
    assert_eq!(status_of(&app, categorize_request(&token)).await, StatusCode::OK);
}

#[actix_rt::test]
async fn test_unreachable_blacklist_fails_closed() {
    let store: Arc<dyn TokenBlacklist> = Arc::new(UnreachableBlacklist);
    let app = test_app!(store);
    let token = token_for(9, Role::Admin);

    let (status, body) = rejection_of(&app, categorize_request(&token)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Storage unavailable" }));
}

#[actix_rt::test]
async fn test_revoked_and_unreachable_are_told_apart() {
    let token = token_for(9, Role::Admin);

    let memory = Arc::new(InMemoryTokenBlacklist::new());
    memory
        .blacklist(&token, 9, Utc::now() + Duration::hours(1))
        .await
        .unwrap();
    let store: Arc<dyn TokenBlacklist> = memory;
    let app = test_app!(store);
    let (status, body) = rejection_of(&app, categorize_request(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Token has been revoked" }));

    let store: Arc<dyn TokenBlacklist> = Arc::new(UnreachableBlacklist);
    let app = test_app!(store);
    let (status, _) = rejection_of(&app, categorize_request(&token)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_rt::test]
async fn test_admin_cleanup() {
    let memory = Arc::new(InMemoryTokenBlacklist::new());
    let store: Arc<dyn TokenBlacklist> = memory.clone();
    let app = test_app!(store);

    memory
        .blacklist("stale-1", 1, Utc::now() - Duration::minutes(1))
        .await
        .unwrap();
    memory
        .blacklist("stale-2", 1, Utc::now() - Duration::minutes(2))
        .await
        .unwrap();
    memory
        .blacklist("live", 1, Utc::now() + Duration::minutes(10))
        .await
        .unwrap();

    let student = token_for(1, Role::Student);
    let req = test::TestRequest::post()
        .uri("/api/admin/blacklist/cleanup")
        .append_header(bearer(&student))
        .to_request();
    assert_eq!(status_of(&app, req).await, StatusCode::FORBIDDEN);
    assert_eq!(memory.len().unwrap(), 3);

    let admin = token_for(2, Role::Admin);
    let req = test::TestRequest::post()
        .uri("/api/admin/blacklist/cleanup")
        .append_header(bearer(&admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "removed": 2 }));
    assert_eq!(memory.len().unwrap(), 1);
    assert!(memory.is_blacklisted("live").await.unwrap());
}
