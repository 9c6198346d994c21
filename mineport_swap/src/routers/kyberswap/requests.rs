use serde::Serialize;
use serde_json::{Value, json};

use crate::routers::{FeeSide, RouteRequest, constants::SWAP_FEE_BPS};

/// Query parameters of `GET /{chain}/api/v1/routes`.
pub fn route_query(request: &RouteRequest, fee_recipient: &str) -> Value {
    let mut query = json!({
        "tokenIn": request.token_in,
        "tokenOut": request.token_out,
        "amountIn": request.amount_in,
        "saveGas": true,
        "gasInclude": true,
    });

    if let Some(fee_side) = request.fee_side {
        query["feeAmount"] = json!(SWAP_FEE_BPS);
        query["feeReceiver"] = json!(fee_recipient);
        query["isInBps"] = json!(true);
        query["chargeFeeBy"] = json!(fee_side);
    }

    query
}

/// Body of `POST /{chain}/api/v1/route/build`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KyberBuildRouteRequest {
    pub route_summary: Value,
    pub sender: String,
    pub recipient: String,
    /// In bps, 50 = 0.5%.
    pub slippage_tolerance: u32,
    pub skip_simulate_tx: bool,
    pub deadline: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mineport_models::constants::chains::NATIVE_TOKEN_EVM_ADDRESS;

    const RECIPIENT: &str = "0x2222222222222222222222222222222222222222";

    #[test]
    fn test_route_query_with_fee() {
        let request = RouteRequest {
            token_in: NATIVE_TOKEN_EVM_ADDRESS.to_string(),
            token_out: "0xtoken".to_string(),
            amount_in: "1000".to_string(),
            fee_side: Some(FeeSide::CurrencyIn),
        };

        let query = route_query(&request, RECIPIENT);
        assert_eq!(query["feeAmount"], json!(40));
        assert_eq!(query["feeReceiver"], json!(RECIPIENT));
        assert_eq!(query["isInBps"], json!(true));
        assert_eq!(query["chargeFeeBy"], json!("currency_in"));
        assert_eq!(query["saveGas"], json!(true));
    }

    #[test]
    fn test_route_query_without_fee() {
        let request = RouteRequest {
            token_in: "0xtoken".to_string(),
            token_out: "0xdonut".to_string(),
            amount_in: "1000".to_string(),
            fee_side: None,
        };

        let query = route_query(&request, RECIPIENT);
        let object = query.as_object().unwrap();
        assert!(!object.contains_key("feeAmount"));
        assert!(!object.contains_key("feeReceiver"));
        assert!(!object.contains_key("chargeFeeBy"));
        assert_eq!(query["amountIn"], json!("1000"));
    }

    #[test]
    fn test_build_request_wire_names() {
        let request = KyberBuildRouteRequest {
            route_summary: json!({ "amountIn": "1" }),
            sender: RECIPIENT.to_string(),
            recipient: RECIPIENT.to_string(),
            slippage_tolerance: 50,
            skip_simulate_tx: false,
            deadline: 1_700_000_000,
        };

        let value = serde_json::to_value(request).unwrap();
        assert_eq!(value["routeSummary"]["amountIn"], json!("1"));
        assert_eq!(value["slippageTolerance"], json!(50));
        assert_eq!(value["skipSimulateTx"], json!(false));
        assert_eq!(value["deadline"], json!(1_700_000_000u64));
    }
}
