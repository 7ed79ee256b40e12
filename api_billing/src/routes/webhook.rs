use std::sync::Arc;

use actix_web::{HttpRequest, Responder, post, web};
use common::{
    env_config::Config,
    error::{AppError, Res},
    http::Success,
};

use crate::{dtos::billing::WebhookResponse, services, store::BillingStore};

/// Handles Stripe webhook events.
///
/// Called by Stripe, not by the web app. Subscription events keep the local
/// subscription mirror and the user's tier in sync with Stripe.
///
/// # Output
/// - Success: `{ received: true }`
/// - Error: 400 for a missing or invalid `Stripe-Signature` header
#[post("/webhook")]
pub async fn post_webhook(
    payload: String,
    req: HttpRequest,
    config: web::Data<Arc<Config>>,
    store: web::Data<dyn BillingStore>,
) -> Res<impl Responder> {
    let signature = req
        .headers()
        .get("Stripe-Signature")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing Stripe-Signature header".to_string()))?;

    if config.stripe.webhook_secret.is_empty() {
        return Err(AppError::Internal(
            "STRIPE_WEBHOOK_SECRET is not configured".to_string(),
        ));
    }

    let event =
        services::webhook::construct_event(&payload, signature, &config.stripe.webhook_secret)?;
    services::webhook::process_webhook_event(store.get_ref(), event).await?;

    Success::ok(WebhookResponse { received: true })
}
