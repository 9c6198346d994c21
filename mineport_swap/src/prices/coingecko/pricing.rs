use error_stack::ResultExt as _;
use mineport_models::network::client_rate_limit::Client;
use serde_json::Value;

use crate::{
    config::SwapConfig,
    error::{Error, SwapResult},
    prices::UsdPriceSource,
};

#[derive(Debug, Clone)]
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(config: &SwapConfig) -> SwapResult<Self> {
        let client = Client::new(None).change_context(Error::ModelsError)?;
        Ok(Self::new(
            client,
            config.coingecko_api_url.clone(),
            config.coingecko_api_key.clone(),
        ))
    }

    pub async fn coingecko_get_usd_price(&self, coin_id: &str) -> SwapResult<Option<f64>> {
        let url = format!(
            "{}/simple/price?ids={coin_id}&vs_currencies=usd",
            self.base_url
        );

        let mut request = self
            .client
            .inner_client()
            .get(&url)
            .header("Accept", "application/json");
        if let Some(api_key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", api_key);
        }
        let request = request
            .build()
            .change_context(Error::ReqwestError)
            .attach_printable("Error building CoinGecko request")?;

        let response = self
            .client
            .execute(request)
            .await
            .change_context(Error::ReqwestError)
            .attach_printable_lazy(|| format!("Error in CoinGecko request {url}"))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("CoinGecko answered {status} for {coin_id}");
            return Ok(None);
        }

        let body = response
            .bytes()
            .await
            .change_context(Error::ReqwestError)
            .attach_printable("Failed to read CoinGecko response")?;

        match serde_json::from_slice::<Value>(&body) {
            Ok(body) => Ok(usd_price(&body, coin_id)),
            Err(e) => {
                tracing::warn!("CoinGecko returned invalid JSON for {coin_id}: {e}");
                Ok(None)
            }
        }
    }
}

/// `{ "<coin_id>": { "usd": <number> } }`; anything else is no price.
pub fn usd_price(body: &Value, coin_id: &str) -> Option<f64> {
    body.get(coin_id)?
        .get("usd")
        .filter(|usd| usd.is_number())
        .and_then(Value::as_f64)
        .filter(|usd| usd.is_finite())
}

#[async_trait::async_trait]
impl UsdPriceSource for CoinGeckoProvider {
    async fn fetch_usd_price(&self, coin_id: &str) -> SwapResult<Option<f64>> {
        self.coingecko_get_usd_price(coin_id).await
    }
}
