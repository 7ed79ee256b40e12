use common::error::Res;
use uuid::Uuid;

use crate::{gateway::PaymentGateway, store::BillingStore};

/// Gets the user's Stripe customer ID, creating the customer on first use.
///
/// Not transactional: if the customer is created but the write fails, the
/// Stripe customer is left without a local record. If another request
/// stored a customer first, ours is left orphaned and logged.
pub async fn get_or_create_stripe_customer(
    gateway: &dyn PaymentGateway,
    store: &dyn BillingStore,
    user_id: Uuid,
    email: &str,
) -> Res<String> {
    if let Some(customer_id) = store.stripe_customer_id(user_id).await? {
        log::debug!(
            "Stripe customer already exists: user_id={}, customer_id={}",
            user_id,
            customer_id
        );
        return Ok(customer_id);
    }

    log::info!("Creating new Stripe customer for user_id={}", user_id);
    let customer_id = gateway.create_customer(user_id, email).await?;

    if !store.attach_stripe_customer(user_id, &customer_id).await? {
        log::warn!(
            "Stripe customer {} not stored: user_id={} already has a customer or does not exist",
            customer_id,
            user_id
        );
    }

    Ok(customer_id)
}
