use std::time::Duration;

use error_stack::{ResultExt as _, report};
use mineport_models::{
    constants::chains::{ChainId, EVM_NULL_ADDRESS},
    network::RateLimitWindow,
};

use crate::{
    error::{Error, SwapResult},
    prices::{
        PRICE_CACHE_TTL, coingecko::COINGECKO_API_URL, dexscreener::DEXSCREENER_API_URL,
    },
    routers::kyberswap::KYBERSWAP_API_URL,
};

/// Runtime settings read from the environment (a `.env` file is honoured).
#[derive(Debug, Clone)]
pub struct SwapConfig {
    pub kyber_api_url: String,
    pub kyber_chain: ChainId,
    pub kyber_client_id: Option<String>,
    pub kyber_rate_limit: Option<RateLimitWindow>,
    pub fee_recipient: String,
    pub coingecko_api_url: String,
    pub coingecko_api_key: Option<String>,
    pub price_cache_ttl: Duration,
    pub dexscreener_api_url: String,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            kyber_api_url: KYBERSWAP_API_URL.to_string(),
            kyber_chain: ChainId::Base,
            kyber_client_id: None,
            kyber_rate_limit: None,
            fee_recipient: EVM_NULL_ADDRESS.to_string(),
            coingecko_api_url: COINGECKO_API_URL.to_string(),
            coingecko_api_key: None,
            price_cache_ttl: PRICE_CACHE_TTL,
            dexscreener_api_url: DEXSCREENER_API_URL.to_string(),
        }
    }
}

impl SwapConfig {
    pub fn from_env() -> SwapResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> SwapResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let kyber_chain = match get("KYBER_CHAIN") {
            Some(chain) => ChainId::try_from(chain.as_str())
                .change_context(Error::ConfigError("KYBER_CHAIN".to_string()))?,
            None => defaults.kyber_chain,
        };

        let kyber_rate_limit = match get("KYBER_RATE_LIMIT") {
            Some(limit) => Some(RateLimitWindow::from_string(&limit).ok_or_else(|| {
                report!(Error::ConfigError("KYBER_RATE_LIMIT".to_string()))
                    .attach_printable(format!("Expected <n>s, <n>m, <n>h or <n>d, got {limit}"))
            })?),
            None => None,
        };

        let price_cache_ttl = match get("PRICE_CACHE_TTL_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse::<u64>()
                    .change_context(Error::ConfigError("PRICE_CACHE_TTL_SECS".to_string()))?,
            ),
            None => defaults.price_cache_ttl,
        };

        Ok(Self {
            kyber_api_url: get("KYBER_API_URL").unwrap_or(defaults.kyber_api_url),
            kyber_chain,
            kyber_client_id: get("KYBER_CLIENT_ID"),
            kyber_rate_limit,
            fee_recipient: get("SWAP_FEE_RECIPIENT").unwrap_or(defaults.fee_recipient),
            coingecko_api_url: get("COINGECKO_API_URL").unwrap_or(defaults.coingecko_api_url),
            coingecko_api_key: get("COINGECKO_API_KEY"),
            price_cache_ttl,
            dexscreener_api_url: get("DEXSCREENER_API_URL")
                .unwrap_or(defaults.dexscreener_api_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = SwapConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.kyber_chain, ChainId::Base);
        assert_eq!(config.fee_recipient, EVM_NULL_ADDRESS);
        assert_eq!(config.price_cache_ttl, Duration::from_secs(60));
        assert!(config.kyber_rate_limit.is_none());
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = SwapConfig::from_lookup(lookup(&[
            ("KYBER_CHAIN", "arbitrum"),
            ("SWAP_FEE_RECIPIENT", "0x1111111111111111111111111111111111111111"),
            ("PRICE_CACHE_TTL_SECS", "5"),
            ("KYBER_RATE_LIMIT", "10s"),
            ("KYBER_CLIENT_ID", ""),
        ]))
        .unwrap();
        assert_eq!(config.kyber_chain, ChainId::ArbitrumOne);
        assert_eq!(
            config.fee_recipient,
            "0x1111111111111111111111111111111111111111"
        );
        assert_eq!(config.price_cache_ttl, Duration::from_secs(5));
        assert!(config.kyber_rate_limit.is_some());
        assert!(config.kyber_client_id.is_none());
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = SwapConfig::from_lookup(lookup(&[("PRICE_CACHE_TTL_SECS", "soon")])).unwrap_err();
        assert_eq!(
            err.current_context(),
            &Error::ConfigError("PRICE_CACHE_TTL_SECS".to_string())
        );

        let err = SwapConfig::from_lookup(lookup(&[("KYBER_RATE_LIMIT", "fast")])).unwrap_err();
        assert_eq!(
            err.current_context(),
            &Error::ConfigError("KYBER_RATE_LIMIT".to_string())
        );
    }
}
