pub mod config;
pub mod error;
pub mod prices;
pub mod quote;
pub mod routers;
pub mod slippage;
#[cfg(test)]
pub mod tests;
pub mod utils;
