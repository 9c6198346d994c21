use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use mineport_swap::quote::types::{
    ExecutableQuote, ExecutableQuoteParams, PriceQuote, PriceQuoteParams,
};

use crate::{
    AppState,
    error::{ApiResult, swap_error_response},
};

pub const PRICE_FAILED_MESSAGE: &str = "Failed to fetch price from KyberSwap";
pub const QUOTE_FAILED_MESSAGE: &str = "Failed to fetch quote from KyberSwap";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/price", get(get_price))
        .route("/quote", get(get_quote))
}

/// GET /swap/price?sellToken&buyToken&sellAmount
pub async fn get_price(
    State(state): State<AppState>,
    Query(params): Query<PriceQuoteParams>,
) -> ApiResult<PriceQuote> {
    state
        .quotes
        .price_quote(params)
        .await
        .map(Json)
        .map_err(|report| swap_error_response(report, PRICE_FAILED_MESSAGE))
}

/// GET /swap/quote?sellToken&buyToken&sellAmount&taker&slippageBps
pub async fn get_quote(
    State(state): State<AppState>,
    Query(params): Query<ExecutableQuoteParams>,
) -> ApiResult<ExecutableQuote> {
    state
        .quotes
        .executable_quote(params)
        .await
        .map(Json)
        .map_err(|report| swap_error_response(report, QUOTE_FAILED_MESSAGE))
}
