pub mod admin;
pub mod auth;
pub mod health;
pub mod schedule;

use actix_web::web;

/// Everything mounted under `/api`. Wrap the scope in `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register)
            .service(auth::logout)
            .service(auth::change_password)
            .service(auth::me),
    )
    .service(
        web::scope("/schedule")
            .service(schedule::period)
            .service(schedule::categorize),
    )
    .service(web::scope("/admin").service(admin::cleanup_blacklist));
}
