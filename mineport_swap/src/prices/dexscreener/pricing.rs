use error_stack::ResultExt as _;
use mineport_models::{
    constants::chains::ChainId,
    network::{client_rate_limit::Client, http::handle_reqwest_response},
};

use crate::{
    config::SwapConfig,
    error::{Error, SwapResult},
    prices::dexscreener::{
        DexScreenerChain as _,
        responses::{DexScreenerPair, DexScreenerTokensResponse},
    },
};

/// Secondary-market token prices from DEX pair data.
#[derive(Debug, Clone)]
pub struct DexScreenerProvider {
    client: Client,
    base_url: String,
    chain: ChainId,
}

impl DexScreenerProvider {
    pub fn new(client: Client, base_url: impl Into<String>, chain: ChainId) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            chain,
        }
    }

    pub fn from_config(config: &SwapConfig) -> SwapResult<Self> {
        let client = Client::new(None).change_context(Error::ModelsError)?;
        Ok(Self::new(
            client,
            config.dexscreener_api_url.clone(),
            config.kyber_chain,
        ))
    }

    /// USD price of `token_address` from its deepest pair on the configured
    /// chain, `None` when no pair quotes a price.
    pub async fn dexscreener_get_token_price(&self, token_address: &str) -> SwapResult<Option<f64>> {
        let url = format!("{}/latest/dex/tokens/{token_address}", self.base_url);

        let request = self
            .client
            .inner_client()
            .get(&url)
            .header("Accept", "application/json")
            .build()
            .change_context(Error::ReqwestError)
            .attach_printable("Error building DexScreener request")?;

        let response = self
            .client
            .execute(request)
            .await
            .change_context(Error::ReqwestError)
            .attach_printable_lazy(|| format!("Error in DexScreener request {url}"))?;

        let tokens: DexScreenerTokensResponse = handle_reqwest_response(response)
            .await
            .change_context(Error::ModelsError)?;

        Ok(deepest_pair_price(
            tokens.pairs.as_deref().unwrap_or_default(),
            self.chain.to_dexscreener_chain_name(),
        ))
    }
}

pub fn deepest_pair_price(pairs: &[DexScreenerPair], chain_name: &str) -> Option<f64> {
    pairs
        .iter()
        .filter(|pair| pair.chain_id == chain_name)
        .filter_map(|pair| pair.price_usd().map(|price| (pair.liquidity_usd(), price)))
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, price)| price)
}
