use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{error::SwapResult, prices::cache::PriceCache};

pub mod cache;
pub mod coingecko;
pub mod dexscreener;

pub const PRICE_CACHE_TTL: Duration = Duration::from_secs(60);

pub const DEFAULT_ETH_PRICE_USD: f64 = 3200.0;
pub const DEFAULT_DONUT_PRICE_USD: f64 = 0.001;

pub const ETH_COIN_ID: &str = "ethereum";
pub const DONUT_COIN_ID: &str = "donut-2";

/// USD prices of the native asset and the reward token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotPrices {
    pub eth: f64,
    pub donut: f64,
}

impl Default for SpotPrices {
    fn default() -> Self {
        Self {
            eth: DEFAULT_ETH_PRICE_USD,
            donut: DEFAULT_DONUT_PRICE_USD,
        }
    }
}

/// A spot-price upstream keyed by coin id.
#[async_trait::async_trait]
pub trait UsdPriceSource: Send + Sync {
    /// `Ok(None)` when the upstream answered without a usable price; errors
    /// are reserved for transport failures.
    async fn fetch_usd_price(&self, coin_id: &str) -> SwapResult<Option<f64>>;
}

/// Spot prices behind a TTL cache. Never fails: degraded upstreams fall back
/// to the last observed prices, then to the defaults.
pub struct PriceService {
    source: Arc<dyn UsdPriceSource>,
    cache: PriceCache,
}

impl PriceService {
    pub fn new(source: Arc<dyn UsdPriceSource>, ttl: Duration) -> Self {
        Self {
            source,
            cache: PriceCache::new(ttl),
        }
    }

    pub async fn get_prices(&self) -> SpotPrices {
        if let Some(prices) = self.cache.fresh().await {
            return prices;
        }

        let last = self.cache.last().await;
        let fallback = SpotPrices {
            eth: last.map(|p| p.eth).unwrap_or(DEFAULT_ETH_PRICE_USD),
            donut: last.map(|p| p.donut).unwrap_or(DEFAULT_DONUT_PRICE_USD),
        };

        let (eth, donut) = tokio::join!(
            self.source.fetch_usd_price(ETH_COIN_ID),
            self.source.fetch_usd_price(DONUT_COIN_ID),
        );

        let (eth, donut) = match (eth, donut) {
            (Ok(eth), Ok(donut)) => (eth, donut),
            (eth, donut) => {
                for report in [eth.err(), donut.err()].into_iter().flatten() {
                    tracing::error!("Error fetching spot prices: {report:?}");
                }
                return fallback;
            }
        };

        match (eth, donut) {
            (Some(eth), Some(donut)) => {
                let prices = SpotPrices { eth, donut };
                self.cache.store(prices).await;
                prices
            }
            (eth, donut) => {
                tracing::warn!(
                    "Incomplete spot prices (eth: {eth:?}, donut: {donut:?}), not caching"
                );
                SpotPrices {
                    eth: eth.unwrap_or(fallback.eth),
                    donut: donut.unwrap_or(fallback.donut),
                }
            }
        }
    }
}
