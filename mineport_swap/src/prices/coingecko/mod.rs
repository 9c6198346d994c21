pub mod pricing;

// https://docs.coingecko.com/v3.0.1/reference/simple-price
// Demo keys are sent in the x-cg-demo-api-key header; the public API works
// without one at a lower rate limit.
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";
