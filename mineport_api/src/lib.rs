//! HTTP surface for swap quotes and spot prices.

pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::AppState;
