use crate::{auth::AuthenticatedUser, blacklist::TokenBlacklist, error::AppError, models::Role};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;

/// Purge expired blacklist entries now instead of waiting for the sweeper.
///
/// ## Responses:
/// - `200 OK`: `{"removed": n}`.
/// - `403 Forbidden`: caller is not an admin.
#[post("/blacklist/cleanup")]
pub async fn cleanup_blacklist(
    blacklist: web::Data<dyn TokenBlacklist>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    user.require_role(&[Role::Admin])?;
    let removed = blacklist.cleanup_expired().await?;
    Ok(HttpResponse::Ok().json(json!({ "removed": removed })))
}
