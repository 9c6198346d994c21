use std::process;

use mineport_api::{AppState, listen_address, start_server};
use mineport_models::log::init_tracing_from_env;
use mineport_swap::config::SwapConfig;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("mineport_api error: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let config = SwapConfig::from_env().map_err(|e| format!("{e:?}"))?;
    init_tracing_from_env();

    let addr = listen_address(|key| std::env::var(key).ok())?;
    let state = AppState::from_config(&config).map_err(|e| format!("{e:?}"))?;

    start_server(state, addr).await.map_err(|e| e.to_string())
}
