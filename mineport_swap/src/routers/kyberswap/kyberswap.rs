use error_stack::ResultExt as _;
use mineport_models::{
    constants::chains::ChainId,
    network::{
        client_rate_limit::Client,
        http::{HttpMethod, read_json_response, value_to_sorted_query_pairs},
    },
};
use serde_json::Value;

use crate::{
    config::SwapConfig,
    error::{Error, SwapResult},
    routers::{
        AggregatorRoute, BuildOutcome, BuildRequest, RouteOutcome, RouteRequest, SwapAggregator,
        kyberswap::{
            KyberSwapChain as _,
            requests::{KyberBuildRouteRequest, route_query},
            responses::{BuiltTransaction, RouteSummary},
        },
    },
};

const ROUTES_URI: &str = "/api/v1/routes";
const BUILD_URI: &str = "/api/v1/route/build";

#[derive(Debug, Clone)]
pub struct KyberSwapClient {
    client: Client,
    base_url: String,
    chain: ChainId,
    client_id: Option<String>,
    fee_recipient: String,
}

impl KyberSwapClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        chain: ChainId,
        client_id: Option<String>,
        fee_recipient: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            chain,
            client_id,
            fee_recipient: fee_recipient.into(),
        }
    }

    pub fn from_config(config: &SwapConfig) -> SwapResult<Self> {
        let client = Client::new(config.kyber_rate_limit).change_context(Error::ModelsError)?;
        Ok(Self::new(
            client,
            config.kyber_api_url.clone(),
            config.kyber_chain,
            config.kyber_client_id.clone(),
            config.fee_recipient.clone(),
        ))
    }

    fn url(&self, uri_path: &str) -> String {
        format!(
            "{}/{}{uri_path}",
            self.base_url,
            self.chain.to_kyberswap_chain_name()
        )
    }

    async fn send_kyberswap_request(
        &self,
        uri_path: &str,
        query: Option<Value>,
        body: Option<Value>,
        method: HttpMethod,
    ) -> SwapResult<(u16, Value)> {
        let url = self.url(uri_path);
        let inner = self.client.inner_client();
        let mut request = match method {
            HttpMethod::GET => inner.get(&url),
            HttpMethod::POST => inner.post(&url),
        }
        .header("Accept", "application/json");

        if let Some(query) = query {
            let pairs = value_to_sorted_query_pairs(&query).change_context(Error::ModelsError)?;
            request = request.query(&pairs);
        }
        if let Some(client_id) = &self.client_id {
            request = request.header("x-client-id", client_id);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let request = request
            .build()
            .change_context(Error::ReqwestError)
            .attach_printable("Error building KyberSwap request")?;

        let response = self
            .client
            .execute(request)
            .await
            .change_context(Error::ReqwestError)
            .attach_printable_lazy(|| format!("Error in KyberSwap request {url}"))?;

        read_json_response(response)
            .await
            .change_context(Error::ModelsError)
            .attach_printable("Invalid KyberSwap response body")
    }

    pub async fn kyberswap_get_route(&self, request: RouteRequest) -> SwapResult<RouteOutcome> {
        let query = route_query(&request, &self.fee_recipient);
        let (status, body) = self
            .send_kyberswap_request(ROUTES_URI, Some(query), None, HttpMethod::GET)
            .await?;

        let outcome = parse_route_response(status, body);
        if let RouteOutcome::NoRoute(body) = &outcome {
            tracing::debug!(
                "No KyberSwap route {} -> {} for {}: {}",
                request.token_in,
                request.token_out,
                request.amount_in,
                body
            );
        }
        Ok(outcome)
    }

    pub async fn kyberswap_build_route(&self, request: BuildRequest) -> SwapResult<BuildOutcome> {
        let body = KyberBuildRouteRequest {
            route_summary: request.raw_summary,
            sender: request.taker.clone(),
            recipient: request.taker,
            slippage_tolerance: request.slippage_bps,
            skip_simulate_tx: false,
            deadline: request.deadline,
        };
        let body = serde_json::to_value(body).change_context(Error::ParseError)?;

        let (status, body) = self
            .send_kyberswap_request(BUILD_URI, None, Some(body), HttpMethod::POST)
            .await?;

        let outcome = parse_build_response(status, body);
        if let BuildOutcome::Rejected(body) = &outcome {
            tracing::warn!("KyberSwap refused to build route: {body}");
        }
        Ok(outcome)
    }
}

#[async_trait::async_trait]
impl SwapAggregator for KyberSwapClient {
    async fn get_route(&self, request: RouteRequest) -> SwapResult<RouteOutcome> {
        self.kyberswap_get_route(request).await
    }

    async fn build_route(&self, request: BuildRequest) -> SwapResult<BuildOutcome> {
        self.kyberswap_build_route(request).await
    }
}

fn is_success(status: u16, body: &Value) -> bool {
    (200..300).contains(&status) && body.get("code").and_then(Value::as_i64) == Some(0)
}

/// Anything short of a 2xx, `code == 0` envelope with a schema-valid route
/// summary is "no route".
pub fn parse_route_response(status: u16, body: Value) -> RouteOutcome {
    if !is_success(status, &body) {
        return RouteOutcome::NoRoute(body);
    }

    let Some(raw_summary) = body
        .get("data")
        .and_then(|data| data.get("routeSummary"))
        .filter(|summary| summary.is_object())
        .cloned()
    else {
        return RouteOutcome::NoRoute(body);
    };

    match serde_json::from_value::<RouteSummary>(raw_summary.clone()) {
        Ok(summary) => RouteOutcome::Found(AggregatorRoute {
            summary,
            raw_summary,
            response: body,
        }),
        Err(e) => {
            tracing::warn!("Malformed KyberSwap route summary: {e}");
            RouteOutcome::NoRoute(body)
        }
    }
}

pub fn parse_build_response(status: u16, body: Value) -> BuildOutcome {
    if !is_success(status, &body) {
        return BuildOutcome::Rejected(body);
    }

    let Some(data) = body.get("data").cloned() else {
        return BuildOutcome::Rejected(body);
    };

    match serde_json::from_value::<BuiltTransaction>(data) {
        Ok(transaction) => BuildOutcome::Built {
            transaction,
            response: body,
        },
        Err(e) => {
            tracing::warn!("Malformed KyberSwap build response: {e}");
            BuildOutcome::Rejected(body)
        }
    }
}

/// Upstream message of a failed call, if it carried one.
pub fn kyberswap_error_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
