//! Auto-slippage and price-impact estimation for trades between the native
//! asset and a mined token.
//!
//! USD values reported by the aggregator are preferred. When either side is
//! missing they are recomputed from the native USD price and the token's USD
//! price (secondary market first, then the on-chain unit price).

use serde::{Deserialize, Serialize};

use crate::{
    error::SwapResult,
    quote::types::PriceQuote,
    routers::constants::{DEFAULT_SLIPPAGE_BPS, ETH_TOKEN_DECIMALS},
    utils::number_conversion::{parse_integer_amount, slippage_to_bps, u128_to_f64},
};

pub const NO_QUOTE_SLIPPAGE_PERCENT: f64 = 1.0;
pub const MIN_SLIPPAGE_PERCENT: f64 = 2.0;
pub const MAX_SLIPPAGE_PERCENT: f64 = 49.0;
/// Added on top of the price impact to absorb price movement.
pub const SLIPPAGE_BUFFER_PERCENT: f64 = 2.0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TradeDirection {
    /// Native asset in, token out.
    Buy,
    /// Token in, native asset out.
    Sell,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceReferences {
    pub eth_usd: f64,
    pub donut_usd: f64,
    /// Secondary-market USD price of the token.
    pub dex_price_usd: Option<f64>,
    /// On-chain token price denominated in the reward token.
    pub unit_price_donut: Option<f64>,
}

pub fn token_price_usd(references: &PriceReferences) -> f64 {
    if let Some(price) = references.dex_price_usd {
        return price;
    }
    match references.unit_price_donut {
        Some(unit_price) if unit_price > 0.0 => unit_price * references.donut_usd,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlippageEstimate {
    pub input_usd: f64,
    pub output_usd: f64,
    /// Never negative; `None` until it can be computed.
    pub price_impact: Option<f64>,
    pub slippage_percent: f64,
}

impl SlippageEstimate {
    fn without_impact(input_usd: f64, output_usd: f64, slippage_percent: f64) -> Self {
        Self {
            input_usd,
            output_usd,
            price_impact: None,
            slippage_percent,
        }
    }

    pub fn slippage_bps(&self) -> u32 {
        slippage_to_bps(self.slippage_percent).unwrap_or(DEFAULT_SLIPPAGE_BPS)
    }
}

fn usd_field(value: &str) -> f64 {
    value
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// `amount` is the human-readable input amount typed by the user.
pub fn estimate_slippage(
    quote: Option<&PriceQuote>,
    amount: &str,
    direction: TradeDirection,
    references: &PriceReferences,
) -> SlippageEstimate {
    let amount = amount
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0);
    let (Some(quote), Some(amount)) = (quote.filter(|quote| !quote.buy_amount.is_empty()), amount)
    else {
        return SlippageEstimate::without_impact(0.0, 0.0, NO_QUOTE_SLIPPAGE_PERCENT);
    };

    let mut input_usd = usd_field(&quote.sell_amount_usd);
    let mut output_usd = usd_field(&quote.buy_amount_usd);

    if input_usd == 0.0 || output_usd == 0.0 {
        let token_price = token_price_usd(references);
        let output_amount = parse_integer_amount(&quote.buy_amount)
            .map(|units| u128_to_f64(units, ETH_TOKEN_DECIMALS))
            .unwrap_or(0.0);
        let (input_price, output_price) = match direction {
            TradeDirection::Buy => (references.eth_usd, token_price),
            TradeDirection::Sell => (token_price, references.eth_usd),
        };
        input_usd = amount * input_price;
        output_usd = output_amount * output_price;
    }

    if input_usd == 0.0 {
        return SlippageEstimate::without_impact(input_usd, output_usd, MIN_SLIPPAGE_PERCENT);
    }

    let impact = ((input_usd - output_usd) / input_usd * 100.0).max(0.0);
    let slippage_percent =
        (impact.ceil() + SLIPPAGE_BUFFER_PERCENT).clamp(MIN_SLIPPAGE_PERCENT, MAX_SLIPPAGE_PERCENT);

    SlippageEstimate {
        input_usd,
        output_usd,
        price_impact: Some(impact),
        slippage_percent,
    }
}

/// Smallest output accepted at the given slippage, in the buy token's
/// smallest unit.
pub fn minimum_received(buy_amount: &str, slippage_percent: f64) -> SwapResult<u128> {
    let buy_amount = parse_integer_amount(buy_amount)?;
    let bps = u128::from(slippage_to_bps(slippage_percent)?.min(10_000));
    Ok(buy_amount / 10_000 * (10_000 - bps) + buy_amount % 10_000 * (10_000 - bps) / 10_000)
}
