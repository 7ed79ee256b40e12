use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{
    env_config::Config,
    error::{AppError, Res},
    http::Success,
    user::{CurrentUser, Tier},
};

use crate::{
    dtos::billing::{
        CheckoutRequest, PricesResponse, SubscriptionResponse, SuccessResponse, UrlResponse,
    },
    errors,
    gateway::PaymentGateway,
    services,
    services::prices::PriceCache,
    store::BillingStore,
};

/// Lists the purchasable prices of the Fluent product.
///
/// Served from the process-wide price cache; refreshed from Stripe at most
/// once per cache window.
///
/// # Output
/// - Success: `{ prices: [{ id, currency, unitAmount, recurring: { interval, intervalCount } | null }] }`
/// - Error: 500 if Stripe cannot be reached on a cache miss
#[get("/prices")]
pub async fn get_prices(
    cache: web::Data<PriceCache>,
    gateway: web::Data<dyn PaymentGateway>,
) -> Res<impl Responder> {
    let prices = cache.get_product_prices(gateway.get_ref()).await?;
    Success::ok(PricesResponse { prices })
}

/// Starts a Stripe Checkout flow for the chosen price.
///
/// # Input
/// - `user`: the authenticated caller
/// - `body`: `{ priceId }`, parsed only once the tier check has passed
///
/// # Output
/// - Success: `{ url }` of the hosted checkout page
/// - Error: 400 `ALREADY_FLUENT` if the caller is already on the paid tier,
///   whatever the body holds
#[post("/checkout")]
pub async fn post_checkout(
    user: CurrentUser,
    body: web::Bytes,
    config: web::Data<Arc<Config>>,
    gateway: web::Data<dyn PaymentGateway>,
    store: web::Data<dyn BillingStore>,
) -> Res<impl Responder> {
    if user.tier == Tier::Fluent {
        return Err(errors::already_fluent());
    }

    let req: CheckoutRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid checkout request: {}", e)))?;
    let price_id = req.price_id.trim();
    if price_id.is_empty() {
        return Err(AppError::BadRequest("priceId is required".to_string()));
    }

    let url = services::checkout::create_checkout_session(
        gateway.get_ref(),
        store.get_ref(),
        &config.web_url,
        user.id,
        &user.email,
        price_id,
    )
    .await?;

    Success::ok(UrlResponse { url })
}

/// Returns the caller's mirrored subscription, or `null` when there is none.
#[get("/subscription")]
pub async fn get_subscription(
    user: CurrentUser,
    store: web::Data<dyn BillingStore>,
) -> Res<impl Responder> {
    let subscription = services::subscription::get_subscription(store.get_ref(), user.id).await?;
    Success::ok(SubscriptionResponse { subscription })
}

/// Cancels the caller's subscription at the end of the current period.
///
/// # Output
/// - Success: `{ success: true }`
/// - Error: 404 `NO_SUBSCRIPTION` if the caller has no subscription record
#[post("/cancel")]
pub async fn post_cancel(
    user: CurrentUser,
    gateway: web::Data<dyn PaymentGateway>,
    store: web::Data<dyn BillingStore>,
) -> Res<impl Responder> {
    let subscription = services::subscription::get_subscription(store.get_ref(), user.id)
        .await?
        .ok_or_else(errors::no_subscription)?;

    services::subscription::cancel_subscription(
        gateway.get_ref(),
        &subscription.stripe_subscription_id,
    )
    .await?;

    Success::ok(SuccessResponse { success: true })
}

/// Resumes a subscription that was set to cancel at period end.
///
/// # Output
/// - Success: `{ success: true }`
/// - Error: 404 `NO_SUBSCRIPTION` if the caller has no subscription record
#[post("/resume")]
pub async fn post_resume(
    user: CurrentUser,
    gateway: web::Data<dyn PaymentGateway>,
    store: web::Data<dyn BillingStore>,
) -> Res<impl Responder> {
    let subscription = services::subscription::get_subscription(store.get_ref(), user.id)
        .await?
        .ok_or_else(errors::no_subscription)?;

    services::subscription::resume_subscription(
        gateway.get_ref(),
        &subscription.stripe_subscription_id,
    )
    .await?;

    Success::ok(SuccessResponse { success: true })
}

/// Opens the Stripe customer portal for the caller.
///
/// # Output
/// - Success: `{ url }` of the portal session
/// - Error: 400 `NO_BILLING_ACCOUNT` if the caller has never been a Stripe customer
#[post("/portal")]
pub async fn post_portal(
    user: CurrentUser,
    config: web::Data<Arc<Config>>,
    gateway: web::Data<dyn PaymentGateway>,
    store: web::Data<dyn BillingStore>,
) -> Res<impl Responder> {
    let customer_id = store
        .stripe_customer_id(user.id)
        .await?
        .ok_or_else(errors::no_billing_account)?;

    let url = services::portal::create_billing_portal_session(
        gateway.get_ref(),
        &config.web_url,
        &customer_id,
    )
    .await?;

    Success::ok(UrlResponse { url })
}
