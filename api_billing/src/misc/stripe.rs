use chrono::DateTime;

use crate::{
    dtos::billing::SubscriptionSnapshot,
    models::price::{BillingInterval, ListedPrice, Recurring},
};

/// Enables `ListedPrice::from` on Stripe price objects.
impl From<stripe::Price> for ListedPrice {
    fn from(price: stripe::Price) -> Self {
        let recurring = price.recurring.and_then(|recurring| {
            let interval = BillingInterval::parse(recurring.interval.as_str());
            if interval.is_none() {
                log::warn!(
                    "Price {} has unsupported interval {}",
                    price.id,
                    recurring.interval.as_str()
                );
            }
            interval.map(|interval| Recurring {
                interval,
                interval_count: recurring.interval_count,
            })
        });

        ListedPrice {
            id: price.id.to_string(),
            currency: price.currency.map(|c| c.to_string()),
            unit_amount: price.unit_amount,
            recurring,
        }
    }
}

/// Enables `SubscriptionSnapshot::from` on Stripe subscription objects.
impl From<&stripe::Subscription> for SubscriptionSnapshot {
    fn from(sub: &stripe::Subscription) -> Self {
        SubscriptionSnapshot {
            stripe_subscription_id: sub.id.to_string(),
            customer_id: sub.customer.id().to_string(),
            price_id: sub
                .items
                .data
                .first()
                .and_then(|item| item.price.as_ref())
                .map(|price| price.id.to_string()),
            status: sub.status.to_string(),
            current_period_end: DateTime::from_timestamp(sub.current_period_end, 0)
                .map(|dt| dt.naive_utc()),
            cancel_at_period_end: sub.cancel_at_period_end,
        }
    }
}
