pub mod routing;
pub mod types;

use std::sync::Arc;

use error_stack::{ResultExt as _, report};
use mineport_models::constants::chains::is_native_token_evm_address;
use serde_json::json;

use crate::{
    error::{Error, SwapResult},
    quote::{
        routing::{ResolvedRoute, resolve_route},
        types::{
            Allowance, ExecutableQuote, ExecutableQuoteParams, Fees, IntegratorFee, Issues,
            PriceQuote, PriceQuoteParams, RouteType, TransactionRequest,
        },
    },
    routers::{
        AggregatorRoute, BuildOutcome, BuildRequest, SwapAggregator,
        constants::{DEADLINE_BUFFER_SECONDS, DEFAULT_SLIPPAGE_BPS, INTERMEDIATE_TOKEN_ADDRESS},
        kyberswap::kyberswap::kyberswap_error_message,
    },
    utils::{
        get_timestamp,
        number_conversion::{parse_integer_amount, ratio_to_decimal_string},
    },
};

pub const MISSING_QUOTE_PARAMETERS: &str =
    "Missing required parameters: sellToken, buyToken, sellAmount";
pub const MISSING_TAKER: &str = "Missing required parameter: taker (wallet address)";
pub const BUILD_FAILED_MESSAGE: &str = "Failed to build transaction";

/// Validated input shared by both quote modes.
#[derive(Debug, Clone, PartialEq)]
struct QuoteRequest {
    sell_token: String,
    buy_token: String,
    sell_amount: String,
    sell_units: u128,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn quote_request(
    sell_token: Option<String>,
    buy_token: Option<String>,
    sell_amount: Option<String>,
) -> SwapResult<QuoteRequest> {
    let (Some(sell_token), Some(buy_token), Some(sell_amount)) = (
        non_empty(sell_token),
        non_empty(buy_token),
        non_empty(sell_amount),
    ) else {
        return Err(report!(Error::MissingParameters(
            MISSING_QUOTE_PARAMETERS.to_string()
        )));
    };

    let sell_units = parse_integer_amount(&sell_amount).change_context(Error::InvalidParameter(
        "Invalid sellAmount: expected an integer amount in the token's smallest unit".to_string(),
    ))?;

    Ok(QuoteRequest {
        sell_token,
        buy_token,
        sell_amount,
        sell_units,
    })
}

fn slippage_bps(raw: Option<String>) -> SwapResult<u32> {
    match non_empty(raw) {
        None => Ok(DEFAULT_SLIPPAGE_BPS),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .change_context(Error::InvalidParameter(
                "Invalid slippageBps: expected a non-negative integer".to_string(),
            ))
            .attach_printable_lazy(|| format!("slippageBps={raw}")),
    }
}

/// Shared numbers of a resolved route, before any transaction is built.
struct QuoteSummary {
    sell_amount: String,
    buy_amount: String,
    price: String,
    fees: Fees,
    intermediate_amount: Option<String>,
    route_type: RouteType,
}

impl QuoteSummary {
    fn new(request: &QuoteRequest, route: &ResolvedRoute) -> Self {
        // A direct quote reports the amount the aggregator actually routed.
        let (sell_amount, sell_units, route_type) = match route {
            ResolvedRoute::Direct { route, .. } => (
                route.summary.amount_in.clone(),
                parse_integer_amount(&route.summary.amount_in).unwrap_or(request.sell_units),
                RouteType::Direct,
            ),
            ResolvedRoute::TwoHop { .. } => (
                request.sell_amount.clone(),
                request.sell_units,
                RouteType::TwoHop,
            ),
        };

        Self {
            sell_amount,
            buy_amount: route.buy_amount().to_string(),
            price: ratio_to_decimal_string(route.buy_amount(), sell_units),
            fees: Fees {
                integrator_fee: IntegratorFee {
                    amount: route.fee_amount(),
                    // Reported against the buy token whichever side was charged.
                    token: request.buy_token.clone(),
                },
            },
            intermediate_amount: route.intermediate_amount().map(str::to_string),
            route_type,
        }
    }
}

/// Builds price-only and executable quotes on top of a swap aggregator.
pub struct QuoteService {
    aggregator: Arc<dyn SwapAggregator>,
}

impl QuoteService {
    pub fn new(aggregator: Arc<dyn SwapAggregator>) -> Self {
        Self { aggregator }
    }

    pub async fn price_quote(&self, params: PriceQuoteParams) -> SwapResult<PriceQuote> {
        let request = quote_request(params.sell_token, params.buy_token, params.sell_amount)?;
        let route = resolve_route(
            self.aggregator.as_ref(),
            &request.sell_token,
            &request.buy_token,
            &request.sell_amount,
        )
        .await?;

        let summary = QuoteSummary::new(&request, &route);
        let (sell_amount_usd, buy_amount_usd, route_summary, route_summary2) = match &route {
            ResolvedRoute::Direct { route, .. } => (
                route.summary.amount_in_usd.clone(),
                route.summary.amount_out_usd.clone(),
                route.raw_summary.clone(),
                None,
            ),
            ResolvedRoute::TwoHop { first, second } => (
                first.summary.amount_in_usd.clone(),
                second.summary.amount_out_usd.clone(),
                first.raw_summary.clone(),
                Some(second.raw_summary.clone()),
            ),
        };

        Ok(PriceQuote {
            sell_amount: summary.sell_amount,
            buy_amount: summary.buy_amount,
            sell_amount_usd: sell_amount_usd.unwrap_or_else(|| "0".to_string()),
            buy_amount_usd: buy_amount_usd.unwrap_or_else(|| "0".to_string()),
            price: summary.price,
            estimated_gas: route.total_gas().to_string(),
            fees: summary.fees,
            route_summary,
            route_summary2,
            intermediate_amount: summary.intermediate_amount,
            route_type: summary.route_type,
        })
    }

    pub async fn executable_quote(
        &self,
        params: ExecutableQuoteParams,
    ) -> SwapResult<ExecutableQuote> {
        let request = quote_request(params.sell_token, params.buy_token, params.sell_amount)?;
        let Some(taker) = non_empty(params.taker) else {
            return Err(report!(Error::MissingParameters(MISSING_TAKER.to_string())));
        };
        let slippage_bps = slippage_bps(params.slippage_bps)?;

        let route = resolve_route(
            self.aggregator.as_ref(),
            &request.sell_token,
            &request.buy_token,
            &request.sell_amount,
        )
        .await?;

        let deadline = get_timestamp() + DEADLINE_BUFFER_SECONDS;
        let build_request = |route: &AggregatorRoute| BuildRequest {
            raw_summary: route.raw_summary.clone(),
            taker: taker.clone(),
            slippage_bps,
            deadline,
        };
        let summary = QuoteSummary::new(&request, &route);

        match &route {
            ResolvedRoute::Direct { route: direct, .. } => {
                let transaction = match self.aggregator.build_route(build_request(direct)).await? {
                    BuildOutcome::Built { transaction, .. } => transaction,
                    BuildOutcome::Rejected(body) => {
                        return Err(report!(Error::BuildFailed {
                            message: kyberswap_error_message(&body)
                                .unwrap_or_else(|| BUILD_FAILED_MESSAGE.to_string()),
                            details: body,
                        }));
                    }
                };

                let estimated_gas = direct
                    .summary
                    .gas
                    .clone()
                    .or_else(|| transaction.gas.clone())
                    .unwrap_or_else(|| "0".to_string());
                let spender = transaction.router_address.clone();
                let transaction =
                    TransactionRequest::from_built(transaction, direct.summary.gas.as_deref());

                Ok(ExecutableQuote {
                    sell_amount: summary.sell_amount,
                    buy_amount: summary.buy_amount,
                    price: summary.price,
                    estimated_gas,
                    fees: summary.fees,
                    transaction,
                    transaction2: None,
                    issues: Issues {
                        allowance: (!is_native_token_evm_address(&request.sell_token))
                            .then_some(Allowance {
                                spender,
                                token: None,
                            }),
                        allowance2: None,
                    },
                    intermediate_amount: None,
                    route_type: summary.route_type,
                })
            }
            ResolvedRoute::TwoHop { first, second } => {
                let (build1, build2) = tokio::join!(
                    self.aggregator.build_route(build_request(first)),
                    self.aggregator.build_route(build_request(second)),
                );
                let (build1, build2) = (build1?, build2?);

                let (tx1, tx2) = match (build1, build2) {
                    (
                        BuildOutcome::Built {
                            transaction: tx1, ..
                        },
                        BuildOutcome::Built {
                            transaction: tx2, ..
                        },
                    ) => (tx1, tx2),
                    (build1, build2) => {
                        return Err(report!(Error::BuildFailed {
                            message: BUILD_FAILED_MESSAGE.to_string(),
                            details: json!({
                                "build1": build1.response(),
                                "build2": build2.response(),
                            }),
                        }));
                    }
                };

                let issues = Issues {
                    allowance: Some(Allowance {
                        spender: tx1.router_address.clone(),
                        token: None,
                    }),
                    allowance2: Some(Allowance {
                        spender: tx2.router_address.clone(),
                        token: Some(INTERMEDIATE_TOKEN_ADDRESS.to_string()),
                    }),
                };

                Ok(ExecutableQuote {
                    sell_amount: summary.sell_amount,
                    buy_amount: summary.buy_amount,
                    price: summary.price,
                    estimated_gas: route.total_gas().to_string(),
                    fees: summary.fees,
                    transaction: TransactionRequest::from_built(
                        tx1,
                        first.summary.gas.as_deref(),
                    ),
                    transaction2: Some(TransactionRequest::from_built(
                        tx2,
                        second.summary.gas.as_deref(),
                    )),
                    issues,
                    intermediate_amount: summary.intermediate_amount,
                    route_type: summary.route_type,
                })
            }
        }
    }
}
