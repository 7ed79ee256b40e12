use async_trait::async_trait;
use common::error::{AppError, Res};
use stripe::{
    BillingPortalSession, CheckoutSession, CheckoutSessionMode, Client, CreateBillingPortalSession,
    CreateCheckoutSession, CreateCheckoutSessionLineItems, CreateCustomer, Customer, CustomerId,
    IdOrCreate, ListPrices, Metadata, Price, Subscription, SubscriptionId, UpdateSubscription,
};
use uuid::Uuid;

use crate::{dtos::billing::CheckoutSessionRequest, models::price::ListedPrice};

/// Calls the billing services make against the payment processor.
/// Every method is exactly one round trip.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Active prices of a product, in the order the processor lists them.
    async fn list_active_prices(&self, product_id: &str) -> Res<Vec<ListedPrice>>;

    /// Creates a customer tagged with the internal user ID. Returns the customer ID.
    async fn create_customer(&self, user_id: Uuid, email: &str) -> Res<String>;

    /// Creates a subscription-mode checkout session. Returns its hosted URL, if any.
    async fn create_checkout_session(&self, req: CheckoutSessionRequest) -> Res<Option<String>>;

    /// Creates a self-service portal session. Returns its hosted URL.
    async fn create_billing_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Res<String>;

    /// Sets the subscription's `cancel_at_period_end` flag and nothing else.
    async fn set_cancel_at_period_end(
        &self,
        subscription_id: &str,
        cancel_at_period_end: bool,
    ) -> Res<()>;
}

/// `PaymentGateway` backed by the Stripe API.
#[derive(Clone)]
pub struct StripeGateway {
    client: Client,
}

impl StripeGateway {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn parse_customer_id(customer_id: &str) -> Res<CustomerId> {
    customer_id
        .parse::<CustomerId>()
        .map_err(|e| AppError::Internal(format!("Invalid customer ID: {}. {}", customer_id, e)))
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn list_active_prices(&self, product_id: &str) -> Res<Vec<ListedPrice>> {
        let params = ListPrices {
            product: Some(IdOrCreate::Id(product_id)),
            active: Some(true),
            limit: Some(100),
            ..Default::default()
        };

        let prices = Price::list(&self.client, &params).await?;
        Ok(prices.data.into_iter().map(ListedPrice::from).collect())
    }

    async fn create_customer(&self, user_id: Uuid, email: &str) -> Res<String> {
        let metadata: Metadata = [("userId".to_string(), user_id.to_string())]
            .into_iter()
            .collect();

        let params = CreateCustomer {
            email: Some(email),
            metadata: Some(metadata),
            ..Default::default()
        };

        let customer = Customer::create(&self.client, params).await?;
        Ok(customer.id.to_string())
    }

    async fn create_checkout_session(&self, req: CheckoutSessionRequest) -> Res<Option<String>> {
        let customer = parse_customer_id(&req.customer_id)?;
        let metadata: Metadata = [("userId".to_string(), req.user_id.to_string())]
            .into_iter()
            .collect();

        let params = CreateCheckoutSession {
            customer: Some(customer),
            mode: Some(CheckoutSessionMode::Subscription),
            line_items: Some(vec![CreateCheckoutSessionLineItems {
                price: Some(req.price_id.clone()),
                quantity: Some(1),
                ..Default::default()
            }]),
            success_url: Some(req.success_url.as_str()),
            cancel_url: Some(req.cancel_url.as_str()),
            metadata: Some(metadata),
            ..Default::default()
        };

        let session = CheckoutSession::create(&self.client, params).await?;
        Ok(session.url)
    }

    async fn create_billing_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Res<String> {
        let mut params = CreateBillingPortalSession::new(parse_customer_id(customer_id)?);
        params.return_url = Some(return_url);

        let session = BillingPortalSession::create(&self.client, params).await?;
        Ok(session.url)
    }

    async fn set_cancel_at_period_end(
        &self,
        subscription_id: &str,
        cancel_at_period_end: bool,
    ) -> Res<()> {
        let sub_id = subscription_id
            .parse::<SubscriptionId>()
            .map_err(|e| AppError::Internal(format!("Invalid subscription ID: {}", e)))?;

        Subscription::update(
            &self.client,
            &sub_id,
            UpdateSubscription {
                cancel_at_period_end: Some(cancel_at_period_end),
                ..Default::default()
            },
        )
        .await?;

        Ok(())
    }
}
