use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::CourseGroup,
    schedule::{current_period, next_period, ScheduleClassifier},
};
use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

/// Body of a categorize request.
#[derive(Debug, Deserialize, Validate)]
pub struct CategorizeRequest {
    #[validate(length(max = 500))]
    pub groups: Vec<CourseGroup>,
    /// Local wall-clock instant to classify against. Defaults to the server's
    /// current local time.
    pub now: Option<NaiveDateTime>,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Current and next academic period
///
/// ## Responses:
/// - `200 OK`: `{"current": {...}, "next": {...}}`.
/// - `404 Not Found`: in July and August, when no period is running.
#[get("/period")]
pub async fn period(_user: AuthenticatedUser) -> Result<impl Responder, AppError> {
    let current = current_period(local_now())?;
    Ok(HttpResponse::Ok().json(json!({
        "current": current,
        "next": next_period(current),
    })))
}

/// Sort course groups into current, upcoming and other buckets.
///
/// Outside of an academic period every group lands in `other`.
///
/// ## Responses:
/// - `200 OK`: `{"current": [...], "upcoming": [...], "other": [...]}`.
/// - `400 Bad Request`: a group has a malformed schedule (bad `HH:MM`, inverted window).
/// - `422 Unprocessable Entity`: a group fails validation.
#[post("/categorize")]
pub async fn categorize(
    _user: AuthenticatedUser,
    payload: web::Json<CategorizeRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;
    for group in &payload.groups {
        group.validate()?;
    }

    let CategorizeRequest { groups, now } = payload.into_inner();
    let classifier = ScheduleClassifier::at(now.unwrap_or_else(local_now));
    if classifier.period().is_none() {
        log::debug!("Categorizing outside of an academic period");
    }

    Ok(HttpResponse::Ok().json(classifier.categorize(groups)))
}
