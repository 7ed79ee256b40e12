use common::error::{AppError, Res};
use uuid::Uuid;

use crate::{
    dtos::billing::CheckoutSessionRequest, gateway::PaymentGateway, services::customer,
    store::BillingStore,
};

pub fn success_url(web_url: &str) -> String {
    format!("{}/billing?success=true", web_url)
}

pub fn cancel_url(web_url: &str) -> String {
    format!("{}/billing?canceled=true", web_url)
}

/// Creates a subscription checkout session for one unit of `price_id`.
/// Returns the URL of the hosted checkout page.
///
/// Callers must reject users already on the paid tier.
pub async fn create_checkout_session(
    gateway: &dyn PaymentGateway,
    store: &dyn BillingStore,
    web_url: &str,
    user_id: Uuid,
    email: &str,
    price_id: &str,
) -> Res<String> {
    let customer_id = customer::get_or_create_stripe_customer(gateway, store, user_id, email).await?;

    let url = gateway
        .create_checkout_session(CheckoutSessionRequest {
            user_id,
            customer_id,
            price_id: price_id.to_string(),
            success_url: success_url(web_url),
            cancel_url: cancel_url(web_url),
        })
        .await?;

    url.ok_or_else(|| AppError::Internal("Checkout session was created without a URL".to_string()))
}
