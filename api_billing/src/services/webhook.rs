use common::{
    error::{AppError, Res},
    user::Tier,
};
use db::{dtos::subscription::SubscriptionUpsertRequest, models::subscription::Subscription};
use stripe::{Event, EventObject, EventType, Webhook};

use crate::{dtos::billing::SubscriptionSnapshot, store::BillingStore};

/// Creates an event for the webhook based on the request payload and signature.
/// Requires a webhook secret key.
pub fn construct_event(payload: &str, signature: &str, webhook_secret: &str) -> Res<Event> {
    match Webhook::construct_event(payload, signature, webhook_secret) {
        Ok(event) => Ok(event),
        Err(e) => {
            log::error!("Error constructing webhook event: {}", e);
            Err(AppError::BadRequest(format!("Webhook Error: {}", e)))
        }
    }
}

/// Tier granted by a subscription in the given Stripe status.
pub fn tier_for_status(status: &str) -> Tier {
    match status {
        "active" | "trialing" => Tier::Fluent,
        _ => Tier::Free,
    }
}

/// Processes the webhook event.
pub async fn process_webhook_event(store: &dyn BillingStore, event: Event) -> Res<()> {
    log::info!("Processing webhook event: {}", event.type_);

    match event.type_ {
        EventType::CheckoutSessionCompleted => {
            if let EventObject::CheckoutSession(session) = event.data.object {
                log::info!("Checkout session completed: {}", session.id);
            }
        }
        EventType::CustomerSubscriptionCreated
        | EventType::CustomerSubscriptionUpdated
        | EventType::CustomerSubscriptionDeleted => {
            if let EventObject::Subscription(subscription) = event.data.object {
                sync_subscription(store, SubscriptionSnapshot::from(&subscription)).await?;
            }
        }
        _ => {
            log::info!("Unhandled event type: {}", event.type_);
        }
    }

    Ok(())
}

/// Whether an event for `incoming` may replace the mirrored `current` row.
///
/// Each user has one mirror row. A live row is only replaced by its own
/// subscription or by another live one, so the late end of an older
/// subscription cannot shadow the one the user is paying for.
pub fn supersedes(current: Option<&Subscription>, incoming: &SubscriptionSnapshot) -> bool {
    match current {
        None => true,
        Some(current) if current.stripe_subscription_id == incoming.stripe_subscription_id => true,
        Some(current) => {
            tier_for_status(&current.status) == Tier::Free
                || tier_for_status(&incoming.status) == Tier::Fluent
        }
    }
}

/// Mirrors a subscription onto its owner and updates the owner's tier.
/// Returns `None` when no user owns the subscription's customer, or when
/// the event concerns a subscription other than the user's live one.
pub async fn sync_subscription(
    store: &dyn BillingStore,
    snapshot: SubscriptionSnapshot,
) -> Res<Option<Subscription>> {
    let Some(user_id) = store.user_id_for_customer(&snapshot.customer_id).await? else {
        log::warn!(
            "Subscription {} belongs to unknown customer {}",
            snapshot.stripe_subscription_id,
            snapshot.customer_id
        );
        return Ok(None);
    };

    let current = store.subscription_for_user(user_id).await?;
    if !supersedes(current.as_ref(), &snapshot) {
        log::info!(
            "Ignoring subscription {} ({}): user_id={} is live on {}",
            snapshot.stripe_subscription_id,
            snapshot.status,
            user_id,
            current
                .as_ref()
                .map_or("", |s| s.stripe_subscription_id.as_str())
        );
        return Ok(None);
    }

    let tier = tier_for_status(&snapshot.status);
    let subscription = store
        .upsert_subscription(SubscriptionUpsertRequest {
            user_id,
            stripe_subscription_id: snapshot.stripe_subscription_id,
            stripe_price_id: snapshot.price_id,
            status: snapshot.status,
            current_period_end: snapshot.current_period_end,
            cancel_at_period_end: snapshot.cancel_at_period_end,
        })
        .await?;
    store.set_tier(user_id, tier).await?;

    log::info!(
        "Subscription {} synced: user_id={}, status={}, tier={}",
        subscription.stripe_subscription_id,
        user_id,
        subscription.status,
        tier
    );

    Ok(Some(subscription))
}
