use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::verify_token;
use crate::blacklist::TokenBlacklist;
use crate::error::AppError;

/// Paths reachable without a bearer token.
const PUBLIC_PATHS: [&str; 3] = ["/health", "/api/auth/login", "/api/auth/register"];

fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|public| *public == path)
}

/// Verifies the bearer token and rejects revoked ones.
///
/// Expects a `web::Data<dyn TokenBlacklist>` in app data. If the blacklist
/// cannot be consulted the request is refused, never let through.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public(req.path()) {
            return Box::pin(self.service.call(req));
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let token = req
                .headers()
                .get("Authorization")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::to_owned)
                .ok_or_else(|| AppError::Unauthorized("Missing token".into()))?;

            let claims = verify_token(&token)?;

            let blacklist = req
                .app_data::<web::Data<dyn TokenBlacklist>>()
                .cloned()
                .ok_or_else(|| {
                    log::error!("AuthMiddleware mounted without a token blacklist");
                    AppError::InternalServerError("Token blacklist not configured".into())
                })?;

            match blacklist.is_blacklisted(&token).await {
                Ok(false) => {}
                Ok(true) => {
                    log::warn!("Rejected revoked token for user {}", claims.sub);
                    return Err(AppError::Unauthorized("Token has been revoked".into()).into());
                }
                Err(err) => {
                    log::warn!("Blacklist lookup failed, refusing request: {}", err);
                    return Err(err.into());
                }
            }

            req.extensions_mut()
                .insert(AuthenticatedUser::new(&claims, token));
            service.call(req).await
        })
    }
}
