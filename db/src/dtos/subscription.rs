use chrono::NaiveDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionUpsertRequest {
    pub user_id: Uuid,
    pub stripe_subscription_id: String,
    pub stripe_price_id: Option<String>,
    pub status: String,
    pub current_period_end: Option<NaiveDateTime>,
    pub cancel_at_period_end: bool,
}
