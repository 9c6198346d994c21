//! HTTP server setup and configuration

use std::net::SocketAddr;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;
use crate::routes::create_router;

pub const DEFAULT_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_API_PORT: u16 = 3000;

/// Create the full application router with middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Listen address from `API_HOST` / `API_PORT`.
pub fn listen_address<F>(lookup: F) -> Result<SocketAddr, String>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    let host = get("API_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_string());
    let port = match get("API_PORT") {
        Some(port) => port
            .parse::<u16>()
            .map_err(|e| format!("Invalid API_PORT {port}: {e}"))?,
        None => DEFAULT_API_PORT,
    };

    format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("Invalid API_HOST {host}: {e}"))
}

pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<(), std::io::Error> {
    let app = create_app(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
