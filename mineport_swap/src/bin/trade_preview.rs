use std::process;
use std::sync::Arc;

use clap::Parser;
use mineport_models::{constants::chains::NATIVE_TOKEN_EVM_ADDRESS, log::init_tracing};
use mineport_swap::{
    config::SwapConfig,
    error::ReportDisplayExt as _,
    prices::{
        PriceService, coingecko::pricing::CoinGeckoProvider,
        dexscreener::pricing::DexScreenerProvider,
    },
    quote::{
        QuoteService,
        types::{ExecutableQuoteParams, PriceQuoteParams},
    },
    routers::{constants::ETH_TOKEN_DECIMALS, kyberswap::kyberswap::KyberSwapClient},
    slippage::{PriceReferences, TradeDirection, estimate_slippage, minimum_received},
    utils::number_conversion::{decimal_string_to_u128, u128_to_f64},
};

/// Quotes a trade between the native asset and a mined token and suggests a
/// slippage bound for it.
#[derive(Parser)]
struct Arguments {
    /// `buy` spends the native asset, `sell` receives it.
    #[clap(long)]
    direction: TradeDirection,

    /// Mined token address.
    #[clap(long)]
    token: String,

    /// Input amount in whole units (18 decimals), e.g. `0.25`.
    #[clap(long)]
    amount: String,

    /// Wallet that would execute the trade. Also requests the executable quote.
    #[clap(long)]
    taker: Option<String>,

    /// On-chain token price denominated in the reward token.
    #[clap(long)]
    unit_price: Option<f64>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("trade_preview error: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let args = Arguments::parse();
    let config = SwapConfig::from_env().map_err(|e| format!("{e:?}"))?;
    init_tracing(false);

    let aggregator = KyberSwapClient::from_config(&config).map_err(|e| format!("{e:?}"))?;
    let quotes = QuoteService::new(Arc::new(aggregator));
    let coingecko = CoinGeckoProvider::from_config(&config).map_err(|e| format!("{e:?}"))?;
    let prices = PriceService::new(Arc::new(coingecko), config.price_cache_ttl);
    let dexscreener = DexScreenerProvider::from_config(&config).map_err(|e| format!("{e:?}"))?;

    let (sell_token, buy_token) = match args.direction {
        TradeDirection::Buy => (NATIVE_TOKEN_EVM_ADDRESS.to_string(), args.token.clone()),
        TradeDirection::Sell => (args.token.clone(), NATIVE_TOKEN_EVM_ADDRESS.to_string()),
    };
    let sell_amount = decimal_string_to_u128(&args.amount, ETH_TOKEN_DECIMALS)
        .map_err(|e| format!("invalid --amount {}: {}", args.amount, e.format()))?
        .to_string();

    let (spot, dex_price) = tokio::join!(
        prices.get_prices(),
        dexscreener.dexscreener_get_token_price(&args.token)
    );
    let dex_price = dex_price.unwrap_or_else(|e| {
        tracing::warn!("No secondary-market price for {}: {e:?}", args.token);
        None
    });
    println!("ETH: ${}  DONUT: ${}", spot.eth, spot.donut);

    let quote = quotes
        .price_quote(PriceQuoteParams {
            sell_token: Some(sell_token.clone()),
            buy_token: Some(buy_token.clone()),
            sell_amount: Some(sell_amount.clone()),
        })
        .await
        .map_err(|e| format!("price quote failed: {}", e.current_context()))?;

    let references = PriceReferences {
        eth_usd: spot.eth,
        donut_usd: spot.donut,
        dex_price_usd: dex_price,
        unit_price_donut: args.unit_price,
    };
    let estimate = estimate_slippage(Some(&quote), &args.amount, args.direction, &references);
    let min_received = minimum_received(&quote.buy_amount, estimate.slippage_percent)
        .map(|units| u128_to_f64(units, ETH_TOKEN_DECIMALS))
        .map_err(|e| format!("{e:?}"))?;

    println!(
        "{} {} -> {} ({} route, price {})",
        args.direction,
        args.amount,
        u128_to_f64(
            quote.buy_amount.parse::<u128>().unwrap_or_default(),
            ETH_TOKEN_DECIMALS
        ),
        quote.route_type,
        quote.price
    );
    match estimate.price_impact {
        Some(impact) => println!("Price impact: {impact:.1}%"),
        None => println!("Price impact: unknown"),
    }
    println!(
        "Slippage: {}%  Min received: {min_received}",
        estimate.slippage_percent
    );

    let Some(taker) = args.taker else {
        return Ok(());
    };

    let executable = quotes
        .executable_quote(ExecutableQuoteParams {
            sell_token: Some(sell_token),
            buy_token: Some(buy_token),
            sell_amount: Some(sell_amount),
            taker: Some(taker),
            slippage_bps: Some(estimate.slippage_bps().to_string()),
        })
        .await
        .map_err(|e| format!("executable quote failed: {}", e.current_context()))?;

    let executable = serde_json::to_string_pretty(&executable).map_err(|e| e.to_string())?;
    println!("{executable}");

    Ok(())
}
