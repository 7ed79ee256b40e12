use std::sync::Arc;

use async_trait::async_trait;
use common::{error::Res, user::Tier};
use db::{dtos::subscription::SubscriptionUpsertRequest, models::subscription::Subscription};
use sqlx::PgPool;
use uuid::Uuid;

/// Billing view of the relational store.
#[async_trait]
pub trait BillingStore: Send + Sync {
    async fn stripe_customer_id(&self, user_id: Uuid) -> Res<Option<String>>;

    /// Stores the customer ID unless the user already has one.
    /// Returns whether the value was written.
    async fn attach_stripe_customer(&self, user_id: Uuid, customer_id: &str) -> Res<bool>;

    async fn user_id_for_customer(&self, customer_id: &str) -> Res<Option<Uuid>>;

    async fn subscription_for_user(&self, user_id: Uuid) -> Res<Option<Subscription>>;

    async fn upsert_subscription(&self, data: SubscriptionUpsertRequest) -> Res<Subscription>;

    async fn set_tier(&self, user_id: Uuid, tier: Tier) -> Res<()>;
}

pub struct PgBillingStore {
    pool: Arc<PgPool>,
}

impl PgBillingStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BillingStore for PgBillingStore {
    async fn stripe_customer_id(&self, user_id: Uuid) -> Res<Option<String>> {
        db::user::get_stripe_customer_id(&*self.pool, user_id).await
    }

    async fn attach_stripe_customer(&self, user_id: Uuid, customer_id: &str) -> Res<bool> {
        db::user::set_stripe_customer_id(&*self.pool, user_id, customer_id).await
    }

    async fn user_id_for_customer(&self, customer_id: &str) -> Res<Option<Uuid>> {
        db::user::get_user_id_by_stripe_customer_id(&*self.pool, customer_id).await
    }

    async fn subscription_for_user(&self, user_id: Uuid) -> Res<Option<Subscription>> {
        db::subscription::get_subscription_by_user_id(&*self.pool, user_id).await
    }

    async fn upsert_subscription(&self, data: SubscriptionUpsertRequest) -> Res<Subscription> {
        db::subscription::upsert_subscription(&*self.pool, data).await
    }

    async fn set_tier(&self, user_id: Uuid, tier: Tier) -> Res<()> {
        db::user::update_user_tier(&*self.pool, user_id, tier.as_str()).await
    }
}
