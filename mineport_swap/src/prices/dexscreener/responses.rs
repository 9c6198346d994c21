use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexScreenerTokensResponse {
    #[serde(default)]
    pub pairs: Option<Vec<DexScreenerPair>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexScreenerPair {
    pub chain_id: String,
    pub pair_address: String,
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub liquidity: Option<DexScreenerLiquidity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexScreenerLiquidity {
    #[serde(default)]
    pub usd: Option<f64>,
}

impl DexScreenerPair {
    pub fn price_usd(&self) -> Option<f64> {
        self.price_usd
            .as_deref()
            .and_then(|price| price.parse::<f64>().ok())
            .filter(|price| price.is_finite() && *price > 0.0)
    }

    pub fn liquidity_usd(&self) -> f64 {
        self.liquidity
            .as_ref()
            .and_then(|liquidity| liquidity.usd)
            .unwrap_or(0.0)
    }
}
