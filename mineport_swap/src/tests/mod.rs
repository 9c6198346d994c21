use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Value, json};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::SwapResult;
use crate::routers::kyberswap::kyberswap::{parse_build_response, parse_route_response};
use crate::routers::{BuildOutcome, BuildRequest, RouteOutcome, RouteRequest, SwapAggregator};

pub const TOKEN: &str = "0x1234567890123456789012345678901234567890";
pub const TAKER: &str = "0x9ecdc9af2a8254dde8bbce8778efae695044cc9f";
pub const ROUTER: &str = "0x6131B5fae19EA4f9D964eAc0408E4408b66337b5";

#[cfg(test)]
pub fn init_tracing_in_tests() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json().pretty().with_ansi(true))
        .try_init()
        .ok();
}

/// Route outcome as the KyberSwap client would parse it.
pub fn found_route(
    token_in: &str,
    token_out: &str,
    amount_in: &str,
    amount_out: &str,
    gas: Option<&str>,
) -> RouteOutcome {
    let mut summary = json!({
        "tokenIn": token_in,
        "amountIn": amount_in,
        "amountInUsd": "12.5",
        "tokenOut": token_out,
        "amountOut": amount_out,
        "amountOutUsd": "12.4",
        "extraFee": { "feeAmount": "40", "chargeFeeBy": "currency_in" },
        "route": [],
        "checksum": format!("{token_in}-{token_out}"),
    });
    if let Some(gas) = gas {
        summary["gas"] = json!(gas);
    }
    parse_route_response(200, json!({ "code": 0, "data": { "routeSummary": summary } }))
}

pub fn built_transaction(data: &str, gas: Option<&str>) -> BuildOutcome {
    let mut tx = json!({
        "routerAddress": ROUTER,
        "data": data,
        "transactionValue": "0",
    });
    if let Some(gas) = gas {
        tx["gas"] = json!(gas);
    }
    parse_build_response(200, json!({ "code": 0, "data": tx }))
}

fn pair_key(token_in: &str, token_out: &str) -> (String, String) {
    (token_in.to_lowercase(), token_out.to_lowercase())
}

/// Scripted aggregator. Unscripted pairs answer "no route"; unscripted builds
/// are rejected. Builds are keyed by the route summary's input token.
#[derive(Default)]
pub struct FakeAggregator {
    routes: HashMap<(String, String), RouteOutcome>,
    builds: HashMap<String, BuildOutcome>,
    route_calls: Mutex<Vec<RouteRequest>>,
    build_calls: Mutex<Vec<BuildRequest>>,
}

impl FakeAggregator {
    pub fn no_route_body() -> Value {
        json!({ "code": 4008, "message": "route not found" })
    }

    pub fn build_rejected_body() -> Value {
        json!({ "code": 4227, "message": "estimate gas failed" })
    }

    pub fn with_route(mut self, token_in: &str, token_out: &str, outcome: RouteOutcome) -> Self {
        self.routes.insert(pair_key(token_in, token_out), outcome);
        self
    }

    pub fn with_build(mut self, token_in: &str, outcome: BuildOutcome) -> Self {
        self.builds.insert(token_in.to_lowercase(), outcome);
        self
    }

    pub fn route_calls(&self) -> Vec<RouteRequest> {
        self.route_calls.lock().unwrap().clone()
    }

    pub fn build_calls(&self) -> Vec<BuildRequest> {
        self.build_calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SwapAggregator for FakeAggregator {
    async fn get_route(&self, request: RouteRequest) -> SwapResult<RouteOutcome> {
        let outcome = self
            .routes
            .get(&pair_key(&request.token_in, &request.token_out))
            .cloned()
            .unwrap_or_else(|| RouteOutcome::NoRoute(Self::no_route_body()));
        self.route_calls.lock().unwrap().push(request);
        Ok(outcome)
    }

    async fn build_route(&self, request: BuildRequest) -> SwapResult<BuildOutcome> {
        let token_in = request
            .raw_summary
            .get("tokenIn")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase();
        let outcome = self
            .builds
            .get(&token_in)
            .cloned()
            .unwrap_or_else(|| BuildOutcome::Rejected(Self::build_rejected_body()));
        self.build_calls.lock().unwrap().push(request);
        Ok(outcome)
    }
}
