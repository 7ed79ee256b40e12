use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Day,
    Week,
    Month,
    Year,
}

impl BillingInterval {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "day" => Some(BillingInterval::Day),
            "week" => Some(BillingInterval::Week),
            "month" => Some(BillingInterval::Month),
            "year" => Some(BillingInterval::Year),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurring {
    pub interval: BillingInterval,
    pub interval_count: u64,
}

/// A purchasable plan price as shown on the billing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub id: String,
    pub currency: String,
    /// Amount in the smallest currency unit.
    pub unit_amount: i64,
    pub recurring: Option<Recurring>,
}

/// A price as listed by the payment processor, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListedPrice {
    pub id: String,
    pub currency: Option<String>,
    pub unit_amount: Option<i64>,
    pub recurring: Option<Recurring>,
}

impl From<ListedPrice> for Price {
    fn from(listed: ListedPrice) -> Self {
        Price {
            id: listed.id,
            currency: listed.currency.unwrap_or_default(),
            unit_amount: listed.unit_amount.unwrap_or(0),
            recurring: listed.recurring,
        }
    }
}
