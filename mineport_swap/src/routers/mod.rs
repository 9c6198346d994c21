pub mod constants;
pub mod kyberswap;

use mineport_models::constants::chains::is_native_token_evm_address;
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::SwapResult,
    routers::kyberswap::responses::{BuiltTransaction, RouteSummary},
};

/// Which side of a swap the integrator fee is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeeSide {
    CurrencyIn,
    CurrencyOut,
}

impl FeeSide {
    /// Fees can only be charged reliably on a leg touching the native asset.
    /// Selling native charges on input, buying native charges on output, and
    /// any other pair is fee free.
    pub fn for_pair(token_in: &str, token_out: &str) -> Option<FeeSide> {
        if is_native_token_evm_address(token_in) {
            Some(FeeSide::CurrencyIn)
        } else if is_native_token_evm_address(token_out) {
            Some(FeeSide::CurrencyOut)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub token_in: String,
    pub token_out: String,
    /// Integer amount in the smallest unit of `token_in`.
    pub amount_in: String,
    pub fee_side: Option<FeeSide>,
}

/// A route the aggregator returned together with the payloads needed later.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatorRoute {
    pub summary: RouteSummary,
    /// Route summary exactly as received; building requires it unchanged.
    pub raw_summary: Value,
    /// Full upstream response body, kept for diagnostics.
    pub response: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Found(AggregatorRoute),
    /// The aggregator answered but produced no usable route. Carries the raw body.
    NoRoute(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildRequest {
    pub raw_summary: Value,
    /// Wallet that sends the swap and receives its output.
    pub taker: String,
    pub slippage_bps: u32,
    /// Unix timestamp (seconds).
    pub deadline: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    Built {
        transaction: BuiltTransaction,
        response: Value,
    },
    Rejected(Value),
}

impl BuildOutcome {
    pub fn response(&self) -> &Value {
        match self {
            BuildOutcome::Built { response, .. } => response,
            BuildOutcome::Rejected(response) => response,
        }
    }
}

/// Route discovery and transaction building against a swap aggregator.
///
/// Implementations must report "no route" / "rejected" as data and reserve
/// errors for transport or decoding failures.
#[async_trait::async_trait]
pub trait SwapAggregator: Send + Sync {
    async fn get_route(&self, request: RouteRequest) -> SwapResult<RouteOutcome>;

    async fn build_route(&self, request: BuildRequest) -> SwapResult<BuildOutcome>;
}
