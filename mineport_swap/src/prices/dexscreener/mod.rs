use mineport_models::constants::chains::ChainId;

pub mod pricing;
pub mod responses;

// https://docs.dexscreener.com/api/reference
// Rate limit: 300 requests per minute on the token endpoints
pub const DEXSCREENER_API_URL: &str = "https://api.dexscreener.com";

pub trait DexScreenerChain {
    fn to_dexscreener_chain_name(&self) -> &str;
}

impl DexScreenerChain for ChainId {
    fn to_dexscreener_chain_name(&self) -> &str {
        match self {
            ChainId::Ethereum => "ethereum",
            ChainId::Optimism => "optimism",
            ChainId::Bsc => "bsc",
            ChainId::Base => "base",
            ChainId::ArbitrumOne => "arbitrum",
        }
    }
}
