use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Typed view over `data.routeSummary`. The raw value is kept separately.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub token_in: String,
    #[serde(deserialize_with = "string_or_number")]
    pub amount_in: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub amount_in_usd: Option<String>,
    pub token_out: String,
    #[serde(deserialize_with = "string_or_number")]
    pub amount_out: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub amount_out_usd: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub gas: Option<String>,
    #[serde(default)]
    pub extra_fee: Option<ExtraFee>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraFee {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub fee_amount: Option<String>,
    #[serde(default)]
    pub charge_fee_by: Option<String>,
}

/// Typed view over the `data` object of a successful build response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltTransaction {
    pub router_address: String,
    pub data: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub transaction_value: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub gas: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub gas_price: Option<String>,
}

// The aggregator is not consistent about quoting numeric fields, so both
// forms are accepted. Empty strings count as absent.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_to_string))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(value.clone())
        .ok_or_else(|| serde::de::Error::custom(format!("expected amount, got {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_summary_accepts_strings_and_numbers() {
        let summary: RouteSummary = serde_json::from_value(json!({
            "tokenIn": "0xa",
            "amountIn": "1000",
            "amountInUsd": "12.5",
            "tokenOut": "0xb",
            "amountOut": 900,
            "amountOutUsd": 11.9,
            "gas": "150000",
            "extraFee": { "feeAmount": "40", "chargeFeeBy": "currency_out" },
            "route": [[{ "pool": "0xpool" }]],
            "checksum": "123"
        }))
        .unwrap();

        assert_eq!(summary.amount_in, "1000");
        assert_eq!(summary.amount_out, "900");
        assert_eq!(summary.amount_in_usd.as_deref(), Some("12.5"));
        assert_eq!(summary.amount_out_usd.as_deref(), Some("11.9"));
        assert_eq!(summary.gas.as_deref(), Some("150000"));
        assert_eq!(
            summary.extra_fee.unwrap().fee_amount.as_deref(),
            Some("40")
        );
    }

    #[test]
    fn test_route_summary_optional_fields_default_to_none() {
        let summary: RouteSummary = serde_json::from_value(json!({
            "tokenIn": "0xa",
            "amountIn": "1000",
            "amountInUsd": "",
            "tokenOut": "0xb",
            "amountOut": "900",
        }))
        .unwrap();

        assert_eq!(summary.amount_in_usd, None);
        assert_eq!(summary.amount_out_usd, None);
        assert_eq!(summary.gas, None);
        assert_eq!(summary.extra_fee, None);
    }

    #[test]
    fn test_route_summary_requires_amounts() {
        let result = serde_json::from_value::<RouteSummary>(json!({
            "tokenIn": "0xa",
            "tokenOut": "0xb",
            "amountOut": "900",
        }));
        assert!(result.is_err());

        let result = serde_json::from_value::<RouteSummary>(json!({
            "tokenIn": "0xa",
            "amountIn": null,
            "tokenOut": "0xb",
            "amountOut": "900",
        }));
        assert!(result.is_err());
    }
}
