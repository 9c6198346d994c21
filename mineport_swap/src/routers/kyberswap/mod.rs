use mineport_models::constants::chains::ChainId;

#[allow(clippy::module_inception)]
pub mod kyberswap;
pub mod requests;
pub mod responses;

// https://docs.kyberswap.com/kyberswap-solutions/kyberswap-aggregator/aggregator-api-specification/evm-swaps
pub const KYBERSWAP_API_URL: &str = "https://aggregator-api.kyberswap.com";

pub trait KyberSwapChain {
    fn to_kyberswap_chain_name(&self) -> &str;
}

impl KyberSwapChain for ChainId {
    fn to_kyberswap_chain_name(&self) -> &str {
        match self {
            ChainId::Ethereum => "ethereum",
            ChainId::Optimism => "optimism",
            ChainId::Bsc => "bsc",
            ChainId::Base => "base",
            ChainId::ArbitrumOne => "arbitrum",
        }
    }
}
