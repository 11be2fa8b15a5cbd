use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use coursedesk::auth::AuthMiddleware;
use coursedesk::blacklist::{self, PgTokenBlacklist, TokenBlacklist};
use coursedesk::config::Config;
use coursedesk::routes;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    log::error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;
    let pool = PgPool::connect(&config.database_url)
        .await
        .map_err(|e| startup_error("Failed to connect to database", e))?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| startup_error("Failed to run migrations", e))?;

    let store: Arc<dyn TokenBlacklist> = Arc::new(PgTokenBlacklist::new(pool.clone()));
    let sweeper = (config.blacklist_cleanup_secs > 0).then(|| {
        blacklist::spawn_cleanup(
            store.clone(),
            Duration::from_secs(config.blacklist_cleanup_secs),
        )
    });

    log::info!("Starting coursedesk server at {}", config.server_url());
    let bind = (config.server_host.clone(), config.server_port);
    let pool = web::Data::new(pool);
    let store = web::Data::from(store);
    let config = web::Data::new(config);

    let result = HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(store.clone())
            .app_data(config.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind(bind)?
    .run()
    .await;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }
    result
}
