//! API route handlers

pub mod health;
pub mod prices;
pub mod swap;

use axum::{Router, routing::get};

use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/prices", get(prices::get_prices))
        .nest("/swap", swap::router())
        .with_state(state)
}
