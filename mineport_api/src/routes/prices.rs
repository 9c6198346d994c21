use axum::{Json, extract::State};
use mineport_swap::prices::SpotPrices;

use crate::AppState;

/// GET /prices - USD prices of ETH and DONUT. Always answers; degrades to
/// cached or default values when the upstream is unavailable.
pub async fn get_prices(State(state): State<AppState>) -> Json<SpotPrices> {
    Json(state.prices.get_prices().await)
}
