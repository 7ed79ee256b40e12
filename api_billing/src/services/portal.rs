use common::error::Res;

use crate::gateway::PaymentGateway;

pub fn return_url(web_url: &str) -> String {
    format!("{}/profile", web_url)
}

/// Creates a Stripe customer portal session and returns its URL.
pub async fn create_billing_portal_session(
    gateway: &dyn PaymentGateway,
    web_url: &str,
    customer_id: &str,
) -> Res<String> {
    gateway
        .create_billing_portal_session(customer_id, &return_url(web_url))
        .await
}
