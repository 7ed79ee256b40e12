use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use common::{
    env_config::Config,
    error::{AppError, Res},
    jwt,
    user::{AuthOutcome, CurrentUser, Tier},
};
use futures::future::{Ready, ok};
use sqlx::PgPool;

pub struct AuthMiddleware {}

impl AuthMiddleware {
    pub fn new() -> Self {
        Self {}
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Arc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(bearer_token)
            .map(str::to_owned);

        let config = req.app_data::<web::Data<Arc<Config>>>().cloned();
        let pool = req.app_data::<web::Data<Arc<PgPool>>>().cloned();
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            // no token: leave the request anonymous, `CurrentUser` rejects it later
            if let Some(token) = token {
                let outcome = match (config, pool) {
                    (Some(config), Some(pool)) => {
                        authenticate(&token, &config.jwt_config.secret, &pool).await
                    }
                    _ => Err(AppError::Internal(
                        "Auth middleware is missing config or database pool".to_string(),
                    )),
                };
                if let Err(e) = &outcome {
                    log::debug!("Authentication failed: {}", e);
                }
                req.extensions_mut().insert::<AuthOutcome>(outcome);
            }
            srv.call(req).await.map(|res| res.map_into_boxed_body())
        })
    }
}

/// Token of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Decodes the token, mapping every JWT failure to `Unauthorized`.
pub fn verify_token(token: &str, secret: &str) -> Res<jwt::JwtClaims> {
    jwt::validate_jwt(token, secret)
        .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))
}

/// Resolves a token to the user it was issued for.
///
/// Unknown users are `Unauthorized`; database or stored-tier problems are
/// `Internal`.
pub async fn authenticate(token: &str, secret: &str, pool: &PgPool) -> AuthOutcome {
    let claims = verify_token(token, secret)?;

    let user = db::user::get_user_by_id(pool, claims.user_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    Ok(CurrentUser {
        id: user.id,
        tier: user.tier.parse::<Tier>()?,
        email: user.email,
    })
}
