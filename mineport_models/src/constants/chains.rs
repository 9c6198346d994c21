use error_stack::{Report, report};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::error::Error;

/// Sentinel address aggregators use for the chain-native asset.
pub const NATIVE_TOKEN_EVM_ADDRESS: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";
pub const EVM_NULL_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

pub fn is_native_token_evm_address(address: &str) -> bool {
    same_evm_address(address, NATIVE_TOKEN_EVM_ADDRESS)
}

/// EVM addresses are compared without regard to checksum casing.
pub fn same_evm_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Hash)]
pub enum ChainId {
    Ethereum = 1,
    Optimism = 10,
    Bsc = 56,
    Base = 8453,
    ArbitrumOne = 42161,
}

impl ChainId {
    pub fn supported_chains() -> Vec<ChainId> {
        ChainId::iter().collect()
    }

    pub fn id(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ethereum => write!(f, "Ethereum"),
            Self::Optimism => write!(f, "Optimism"),
            Self::Bsc => write!(f, "BSC"),
            Self::Base => write!(f, "Base"),
            Self::ArbitrumOne => write!(f, "Arbitrum One"),
        }
    }
}

impl TryFrom<&str> for ChainId {
    type Error = Report<Error>;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Ethereum" | "ethereum" | "1" => Ok(Self::Ethereum),
            "Optimism" | "optimism" | "10" => Ok(Self::Optimism),
            "Bsc" | "BSC" | "bsc" | "56" => Ok(Self::Bsc),
            "Base" | "base" | "8453" => Ok(Self::Base),
            "ArbitrumOne" | "Arbitrum One" | "arbitrum" | "42161" => Ok(Self::ArbitrumOne),
            _ => Err(report!(Error::ChainError(format!(
                "Invalid chain name: {value}"
            )))
            .attach_printable(format!(
                "Supported chains: {:?}",
                ChainId::supported_chains()
            ))),
        }
    }
}
