use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::routers::kyberswap::responses::BuiltTransaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RouteType {
    Direct,
    TwoHop,
}

/// Raw query of the price-only endpoint. Empty values count as missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuoteParams {
    pub sell_token: Option<String>,
    pub buy_token: Option<String>,
    pub sell_amount: Option<String>,
}

/// Raw query of the executable quote endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableQuoteParams {
    pub sell_token: Option<String>,
    pub buy_token: Option<String>,
    pub sell_amount: Option<String>,
    /// Wallet address that signs and receives the swap.
    pub taker: Option<String>,
    /// Defaults to 50 (0.5%).
    pub slippage_bps: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegratorFee {
    pub amount: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fees {
    pub integrator_fee: IntegratorFee,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub sell_amount: String,
    pub buy_amount: String,
    pub sell_amount_usd: String,
    pub buy_amount_usd: String,
    pub price: String,
    pub estimated_gas: String,
    pub fees: Fees,
    pub route_summary: Value,
    pub route_summary2: Option<Value>,
    pub intermediate_amount: Option<String>,
    pub route_type: RouteType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub to: String,
    pub data: String,
    pub value: String,
    pub gas: String,
    pub gas_price: String,
}

impl TransactionRequest {
    /// `route_gas` backs up a builder response without a gas estimate.
    pub fn from_built(transaction: BuiltTransaction, route_gas: Option<&str>) -> Self {
        Self {
            to: transaction.router_address,
            data: transaction.data,
            value: transaction.transaction_value.unwrap_or_else(|| "0".to_string()),
            gas: transaction
                .gas
                .or_else(|| route_gas.map(str::to_string))
                .unwrap_or_else(|| "0".to_string()),
            gas_price: transaction.gas_price.unwrap_or_else(|| "0".to_string()),
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allowance {
    pub spender: String,
    /// Only set when the token differs from the quote's sell token.
    pub token: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issues {
    pub allowance: Option<Allowance>,
    pub allowance2: Option<Allowance>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableQuote {
    pub sell_amount: String,
    pub buy_amount: String,
    pub price: String,
    pub estimated_gas: String,
    pub fees: Fees,
    pub transaction: TransactionRequest,
    pub transaction2: Option<TransactionRequest>,
    pub issues: Issues,
    pub intermediate_amount: Option<String>,
    pub route_type: RouteType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn built(gas: Option<&str>) -> BuiltTransaction {
        BuiltTransaction {
            router_address: "0xrouter".to_string(),
            data: "0xdeadbeef".to_string(),
            transaction_value: None,
            gas: gas.map(str::to_string),
            gas_price: None,
        }
    }

    #[test]
    fn test_route_type_wire_names() {
        assert_eq!(json!(RouteType::Direct), json!("direct"));
        assert_eq!(json!(RouteType::TwoHop), json!("two-hop"));
        assert_eq!(RouteType::TwoHop.to_string(), "two-hop");
    }

    #[test]
    fn test_transaction_request_defaults() {
        let tx = TransactionRequest::from_built(built(None), Some("150000"));
        assert_eq!(tx.value, "0");
        assert_eq!(tx.gas, "150000");
        assert_eq!(tx.gas_price, "0");

        let tx = TransactionRequest::from_built(built(Some("210000")), Some("150000"));
        assert_eq!(tx.gas, "210000");

        let tx = TransactionRequest::from_built(built(None), None);
        assert_eq!(tx.gas, "0");
    }

    #[test]
    fn test_issues_skip_absent_allowances() {
        let issues = Issues {
            allowance: None,
            allowance2: Some(Allowance {
                spender: "0xrouter".to_string(),
                token: Some("0xdonut".to_string()),
            }),
        };
        assert_eq!(
            json!(issues),
            json!({ "allowance2": { "spender": "0xrouter", "token": "0xdonut" } })
        );
    }

    #[test]
    fn test_params_from_camel_case() {
        let params: ExecutableQuoteParams = serde_json::from_value(json!({
            "sellToken": "0xa",
            "buyToken": "0xb",
            "sellAmount": "10",
            "taker": "0xc",
        }))
        .unwrap();
        assert_eq!(params.sell_amount.as_deref(), Some("10"));
        assert_eq!(params.slippage_bps, None);
    }
}
