use std::sync::Arc;

use chrono::NaiveDateTime;
use db::models::subscription::Subscription;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::models::price::Price;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub price_id: String,
}

#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct PricesResponse {
    #[serde(serialize_with = "serialize_shared")]
    pub prices: Arc<Vec<Price>>,
}

fn serialize_shared<S: Serializer>(prices: &Arc<Vec<Price>>, serializer: S) -> Result<S::Ok, S::Error> {
    prices.as_slice().serialize(serializer)
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub subscription: Option<Subscription>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub received: bool,
}

/// Parameters of a hosted checkout session for a single subscription price.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionRequest {
    pub user_id: Uuid,
    pub customer_id: String,
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// Subscription state carried by a Stripe webhook event.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionSnapshot {
    pub stripe_subscription_id: String,
    pub customer_id: String,
    pub price_id: Option<String>,
    pub status: String,
    pub current_period_end: Option<NaiveDateTime>,
    pub cancel_at_period_end: bool,
}
