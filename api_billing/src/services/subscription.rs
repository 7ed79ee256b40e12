use common::error::Res;
use db::models::subscription::Subscription;
use uuid::Uuid;

use crate::{gateway::PaymentGateway, store::BillingStore};

/// Gets the user's mirrored subscription, if any.
pub async fn get_subscription(store: &dyn BillingStore, user_id: Uuid) -> Res<Option<Subscription>> {
    store.subscription_for_user(user_id).await
}

/// Stops renewal at the end of the current period. The mirror catches up
/// through the subscription webhook.
pub async fn cancel_subscription(gateway: &dyn PaymentGateway, subscription_id: &str) -> Res<()> {
    log::info!("Canceling subscription {} at period end", subscription_id);
    gateway.set_cancel_at_period_end(subscription_id, true).await
}

/// Undoes a pending cancellation.
pub async fn resume_subscription(gateway: &dyn PaymentGateway, subscription_id: &str) -> Res<()> {
    log::info!("Resuming subscription {}", subscription_id);
    gateway.set_cancel_at_period_end(subscription_id, false).await
}
