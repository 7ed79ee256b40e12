use std::sync::Arc;

use actix_web::{HttpResponse, Responder, get, web};
use sqlx::PgPool;

/// Liveness and database reachability.
#[get("/health")]
pub async fn get_health(pool: web::Data<Arc<PgPool>>) -> impl Responder {
    match db::ping(&pool).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })),
        Err(e) => {
            log::error!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable()
                .json(serde_json::json!({ "status": "unavailable" }))
        }
    }
}
