use crate::{
    auth::{
        generate_token, hash_password, rehash_for_change, verify_password, AuthResponse,
        AuthenticatedUser, ChangePasswordRequest, LoginRequest, RegisterRequest,
    },
    blacklist::TokenBlacklist,
    config::Config,
    error::AppError,
    models::{Credentials, Role, User},
};
use actix_web::{get, post, put, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new student account and returns an authentication token.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let existing_user = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE email = $1")
        .bind(&register_data.email)
        .fetch_optional(&**pool)
        .await?;

    if existing_user.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let password_hash = hash_password(&register_data.password)?;

    let user_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (username, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&register_data.username)
    .bind(&register_data.email)
    .bind(password_hash)
    .bind(Role::Student.as_str())
    .fetch_one(&**pool)
    .await?;

    let token = generate_token(user_id, Role::Student, config.token_ttl())?;
    log::info!("Registered user {}", user_id);

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user_id,
        role: Role::Student,
    }))
}

/// Login user
///
/// Authenticates a user and returns an authentication token.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = sqlx::query_as::<_, Credentials>(
        "SELECT id, password_hash, role FROM users WHERE email = $1",
    )
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?;

    match user {
        Some(user) if verify_password(&login_data.password, &user.password_hash)? => {
            let role = user.role()?;
            let token = generate_token(user.id, role, config.token_ttl())?;
            Ok(HttpResponse::Ok().json(AuthResponse {
                token,
                user_id: user.id,
                role,
            }))
        }
        _ => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}

/// Logout
///
/// Revokes the bearer token used for this request until it would have expired.
#[post("/logout")]
pub async fn logout(
    blacklist: web::Data<dyn TokenBlacklist>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    blacklist
        .blacklist(&user.token, user.user_id, user.expires_at)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Change password
///
/// Stores a new password hash and revokes the token used for the request, so
/// the client has to log in again with the new password.
#[put("/password")]
pub async fn change_password(
    pool: web::Data<PgPool>,
    blacklist: web::Data<dyn TokenBlacklist>,
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let stored_hash =
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(user.user_id)
            .fetch_one(&**pool)
            .await?;

    let new_hash = rehash_for_change(
        &payload.current_password,
        &payload.new_password,
        &stored_hash,
    )?;

    sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
        .bind(new_hash)
        .bind(user.user_id)
        .execute(&**pool)
        .await?;

    blacklist
        .blacklist(&user.token, user.user_id, user.expires_at)
        .await?;
    log::info!("User {} changed their password", user.user_id);

    Ok(HttpResponse::NoContent().finish())
}

/// Current user
///
/// Returns the profile of the authenticated caller.
#[get("/me")]
pub async fn me(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let (id, username, email, role, created_at) =
        sqlx::query_as::<_, (i32, String, String, String, DateTime<Utc>)>(
            "SELECT id, username, email, role, created_at FROM users WHERE id = $1",
        )
        .bind(user.user_id)
        .fetch_one(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(User {
        id,
        username,
        email,
        role: role.parse()?,
        created_at,
    }))
}
