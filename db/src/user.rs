use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::user::User;

pub async fn get_user_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_stripe_customer_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<String>> {
    sqlx::query_scalar::<_, Option<String>>("SELECT stripe_customer_id FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map(Option::flatten)
        .map_err(AppError::from)
}

pub async fn get_user_id_by_stripe_customer_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    customer_id: &str,
) -> Res<Option<Uuid>> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE stripe_customer_id = $1")
        .bind(customer_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Stores the Stripe customer ID on a user that has none yet.
/// Returns false when the user already had one (or does not exist).
pub async fn set_stripe_customer_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    customer_id: &str,
) -> Res<bool> {
    sqlx::query(
        r#"
        UPDATE users
        SET stripe_customer_id = $2, updated_at = NOW()
        WHERE id = $1 AND stripe_customer_id IS NULL
        "#,
    )
    .bind(user_id)
    .bind(customer_id)
    .execute(executor)
    .await
    .map(|result| result.rows_affected() == 1)
    .map_err(AppError::from)
}

pub async fn update_user_tier<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    tier: &str,
) -> Res<()> {
    sqlx::query("UPDATE users SET tier = $2, updated_at = NOW() WHERE id = $1")
        .bind(user_id)
        .bind(tier)
        .execute(executor)
        .await?;
    Ok(())
}
