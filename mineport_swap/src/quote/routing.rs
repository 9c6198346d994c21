use error_stack::report;
use mineport_models::constants::chains::is_native_token_evm_address;
use serde_json::{Value, json};

use crate::{
    error::{Error, SwapResult},
    routers::{
        AggregatorRoute, FeeSide, RouteOutcome, RouteRequest, SwapAggregator,
        constants::INTERMEDIATE_TOKEN_ADDRESS, kyberswap::kyberswap::kyberswap_error_message,
    },
    utils::number_conversion::sum_gas,
};

pub const NO_ROUTE_MESSAGE: &str = "No route found";
pub const NO_SECOND_LEG_MESSAGE: &str = "No route found for DONUT->ETH";

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedRoute {
    Direct {
        route: AggregatorRoute,
        fee_side: Option<FeeSide>,
    },
    /// `first` swaps into the intermediate asset, `second` swaps it into the
    /// requested output.
    TwoHop {
        first: AggregatorRoute,
        second: AggregatorRoute,
    },
}

impl ResolvedRoute {
    pub fn buy_amount(&self) -> &str {
        match self {
            ResolvedRoute::Direct { route, .. } => &route.summary.amount_out,
            ResolvedRoute::TwoHop { second, .. } => &second.summary.amount_out,
        }
    }

    pub fn intermediate_amount(&self) -> Option<&str> {
        match self {
            ResolvedRoute::Direct { .. } => None,
            ResolvedRoute::TwoHop { first, .. } => Some(&first.summary.amount_out),
        }
    }

    /// Fee charged by the route. Only the hop touching the native asset
    /// carries one.
    pub fn fee_amount(&self) -> String {
        let route = match self {
            ResolvedRoute::Direct { route, .. } => route,
            ResolvedRoute::TwoHop { second, .. } => second,
        };
        route
            .summary
            .extra_fee
            .as_ref()
            .and_then(|fee| fee.fee_amount.clone())
            .unwrap_or_else(|| "0".to_string())
    }

    pub fn total_gas(&self) -> u128 {
        match self {
            ResolvedRoute::Direct { route, .. } => sum_gas([route.summary.gas.as_deref()]),
            ResolvedRoute::TwoHop { first, second } => sum_gas([
                first.summary.gas.as_deref(),
                second.summary.gas.as_deref(),
            ]),
        }
    }
}

/// Two-hop routing through the intermediate asset only applies when buying
/// the native asset with a non-native one.
pub fn is_two_hop_eligible(sell_token: &str, buy_token: &str) -> bool {
    is_native_token_evm_address(buy_token) && !is_native_token_evm_address(sell_token)
}

fn no_route(message: impl Into<String>, details: Value) -> error_stack::Report<Error> {
    report!(Error::NoRoute {
        message: message.into(),
        details,
    })
}

/// Finds a direct route, falling back to a two-hop route through the
/// intermediate asset when eligible. Each upstream call is made at most once.
pub async fn resolve_route(
    aggregator: &dyn SwapAggregator,
    sell_token: &str,
    buy_token: &str,
    sell_amount: &str,
) -> SwapResult<ResolvedRoute> {
    let fee_side = FeeSide::for_pair(sell_token, buy_token);
    let direct = aggregator
        .get_route(RouteRequest {
            token_in: sell_token.to_string(),
            token_out: buy_token.to_string(),
            amount_in: sell_amount.to_string(),
            fee_side,
        })
        .await?;

    let direct_body = match direct {
        RouteOutcome::Found(route) => return Ok(ResolvedRoute::Direct { route, fee_side }),
        RouteOutcome::NoRoute(body) => body,
    };

    if !is_two_hop_eligible(sell_token, buy_token) {
        let message =
            kyberswap_error_message(&direct_body).unwrap_or_else(|| NO_ROUTE_MESSAGE.to_string());
        return Err(no_route(message, direct_body));
    }

    tracing::info!(
        "No direct route {} -> {}, trying through {}",
        sell_token,
        buy_token,
        INTERMEDIATE_TOKEN_ADDRESS
    );

    let first = match aggregator
        .get_route(RouteRequest {
            token_in: sell_token.to_string(),
            token_out: INTERMEDIATE_TOKEN_ADDRESS.to_string(),
            amount_in: sell_amount.to_string(),
            fee_side: None,
        })
        .await?
    {
        RouteOutcome::Found(route) => route,
        RouteOutcome::NoRoute(step1) => {
            return Err(no_route(
                NO_ROUTE_MESSAGE,
                json!({ "direct": direct_body, "step1": step1 }),
            ));
        }
    };

    let second = match aggregator
        .get_route(RouteRequest {
            token_in: INTERMEDIATE_TOKEN_ADDRESS.to_string(),
            token_out: buy_token.to_string(),
            amount_in: first.summary.amount_out.clone(),
            fee_side: Some(FeeSide::CurrencyOut),
        })
        .await?
    {
        RouteOutcome::Found(route) => route,
        RouteOutcome::NoRoute(step2) => {
            return Err(no_route(
                NO_SECOND_LEG_MESSAGE,
                json!({ "step1": first.response, "step2": step2 }),
            ));
        }
    };

    Ok(ResolvedRoute::TwoHop { first, second })
}
