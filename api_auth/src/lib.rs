use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod auth;
}

/// Attaches the outcome of Bearer authentication to every request.
/// Requests are never rejected here; handlers opt in by extracting
/// `common::user::CurrentUser`.
pub fn middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}
