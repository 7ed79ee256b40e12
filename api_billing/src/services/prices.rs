use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use common::error::Res;
use tokio::sync::RwLock;

use crate::{gateway::PaymentGateway, models::price::Price};

/// How long a fetched price list is served before it is refetched.
pub const PRICE_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

struct PriceCacheEntry {
    prices: Arc<Vec<Price>>,
    fetched_at: Instant,
}

/// Process-wide cache of the active prices of one product.
///
/// The entry is replaced wholesale on refresh. Refreshes are not coalesced:
/// callers that miss at the same time each fetch and each store their result,
/// and the last write wins. Every refresh yields the same data, so this only
/// costs redundant processor calls. The lock is never held across a fetch.
pub struct PriceCache {
    product_id: String,
    ttl: Duration,
    entry: RwLock<Option<PriceCacheEntry>>,
}

impl PriceCache {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self::with_ttl(product_id, PRICE_CACHE_TTL)
    }

    pub fn with_ttl(product_id: impl Into<String>, ttl: Duration) -> Self {
        PriceCache {
            product_id: product_id.into(),
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// Gets the product's active prices, fetching them if the cache is empty or stale.
    pub async fn get_product_prices(&self, gateway: &dyn PaymentGateway) -> Res<Arc<Vec<Price>>> {
        self.get_product_prices_at(gateway, Instant::now()).await
    }

    /// Same as `get_product_prices`, with `now` as the current time when the
    /// call starts.
    pub async fn get_product_prices_at(
        &self,
        gateway: &dyn PaymentGateway,
        now: Instant,
    ) -> Res<Arc<Vec<Price>>> {
        if let Some(entry) = self.entry.read().await.as_ref() {
            if now.saturating_duration_since(entry.fetched_at) < self.ttl {
                return Ok(Arc::clone(&entry.prices));
            }
        }

        log::debug!("Refreshing prices of product {}", self.product_id);
        let started = Instant::now();
        let prices: Vec<Price> = gateway
            .list_active_prices(&self.product_id)
            .await?
            .into_iter()
            .map(Price::from)
            .collect();
        let prices = Arc::new(prices);

        *self.entry.write().await = Some(PriceCacheEntry {
            prices: Arc::clone(&prices),
            // stamped when the fetch returned, not when it was issued
            fetched_at: now + started.elapsed(),
        });

        Ok(prices)
    }
}
