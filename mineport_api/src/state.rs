//! Application state shared across API handlers

use std::sync::Arc;

use mineport_swap::{
    config::SwapConfig,
    error::SwapResult,
    prices::{PriceService, coingecko::pricing::CoinGeckoProvider},
    quote::QuoteService,
    routers::kyberswap::kyberswap::KyberSwapClient,
};

/// Services are built once at startup; the price cache lives inside
/// `PriceService` and is shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub quotes: Arc<QuoteService>,
    pub prices: Arc<PriceService>,
}

impl AppState {
    pub fn new(quotes: QuoteService, prices: PriceService) -> Self {
        Self {
            quotes: Arc::new(quotes),
            prices: Arc::new(prices),
        }
    }

    /// Wires KyberSwap and CoinGecko clients from the config.
    pub fn from_config(config: &SwapConfig) -> SwapResult<Self> {
        let aggregator = KyberSwapClient::from_config(config)?;
        let coingecko = CoinGeckoProvider::from_config(config)?;

        tracing::info!(
            "Quoting through {} on {}",
            config.kyber_api_url,
            config.kyber_chain
        );

        Ok(Self::new(
            QuoteService::new(Arc::new(aggregator)),
            PriceService::new(Arc::new(coingecko), config.price_cache_ttl),
        ))
    }
}
