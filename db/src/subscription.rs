use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::subscription::SubscriptionUpsertRequest, models::subscription::Subscription};

pub async fn get_subscription_by_user_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<Subscription>> {
    sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE user_id = $1 LIMIT 1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Inserts or refreshes the mirror row of a user. A user holds at most one row,
/// so a new Stripe subscription replaces the previous one.
pub async fn upsert_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: SubscriptionUpsertRequest,
) -> Res<Subscription> {
    sqlx::query_as::<_, Subscription>(
        r#"
        INSERT INTO subscriptions
            (user_id, stripe_subscription_id, stripe_price_id, status, current_period_end, cancel_at_period_end)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id) DO UPDATE SET
            stripe_subscription_id = EXCLUDED.stripe_subscription_id,
            stripe_price_id = EXCLUDED.stripe_price_id,
            status = EXCLUDED.status,
            current_period_end = EXCLUDED.current_period_end,
            cancel_at_period_end = EXCLUDED.cancel_at_period_end,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.stripe_subscription_id)
    .bind(data.stripe_price_id)
    .bind(data.status)
    .bind(data.current_period_end)
    .bind(data.cancel_at_period_end)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
