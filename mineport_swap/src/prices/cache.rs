use std::time::Duration;

use tokio::{sync::RwLock, time::Instant};

use crate::prices::SpotPrices;

#[derive(Debug, Clone, Copy)]
struct CachedPrices {
    prices: SpotPrices,
    fetched_at: Instant,
}

/// Last observed spot prices, replaced wholesale on every store.
#[derive(Debug)]
pub struct PriceCache {
    ttl: Duration,
    entry: RwLock<Option<CachedPrices>>,
}

impl PriceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// Cached prices younger than the TTL.
    pub async fn fresh(&self) -> Option<SpotPrices> {
        self.entry
            .read()
            .await
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.prices)
    }

    /// Cached prices regardless of age.
    pub async fn last(&self) -> Option<SpotPrices> {
        self.entry.read().await.map(|entry| entry.prices)
    }

    pub async fn store(&self, prices: SpotPrices) {
        *self.entry.write().await = Some(CachedPrices {
            prices,
            fetched_at: Instant::now(),
        });
    }
}
