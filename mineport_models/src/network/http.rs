use crate::error::{Error, ModelResult};
use error_stack::{ResultExt, report};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::value::Value;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
}

/// Converts a JSON object into query pairs sorted by key.
///
/// `null` values are skipped. Non-string scalars are rendered with their JSON
/// representation. Pairs are returned unencoded; hand them to
/// `RequestBuilder::query`, which percent-encodes keys and values.
///
/// # Errors
///
/// Returns `Error::ParseError` if the input value is not a JSON object.
pub fn value_to_sorted_query_pairs(value: &Value) -> ModelResult<Vec<(String, String)>> {
    let mut pairs: Vec<(String, String)> = match value {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !matches!(v, Value::Null))
            .map(|(k, v)| {
                let value_str = match v {
                    Value::String(s) => s.to_string(),
                    _ => v.to_string(),
                };
                (k.clone(), value_str)
            })
            .collect(),
        _ => {
            return Err(report!(Error::ParseError)
                .attach_printable(format!("Invalid JSON Object: {value:?}")));
        }
    };

    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(pairs)
}

/// Deserializes a successful response body, failing on any status >= 400.
pub async fn handle_reqwest_response<T: DeserializeOwned>(response: Response) -> ModelResult<T> {
    let response_code: u16 = response.status().as_u16();
    match response_code {
        0..=399 => {
            let body = response.bytes().await.change_context(Error::ReqwestError(
                "Failed to get body from response".to_string(),
            ))?;

            serde_json::from_slice(&body).change_context(Error::SerdeDeserialize(
                "Failed to deserialize JSON".to_string(),
            ))
        }
        _ => {
            let error_body = response.text().await.change_context(Error::ReqwestError(
                "Failed to get text from response".to_string(),
            ))?;

            error!("Error Body: {}", &error_body);

            Err(report!(Error::ReqwestError(error_body)))
        }
    }
}

/// Reads a JSON body whatever the status code.
///
/// Some upstreams report business failures (e.g. "route not found") in a JSON
/// envelope on 4xx responses; those still have to reach the caller as data.
/// Fails only when the body cannot be read or is not JSON.
pub async fn read_json_response(response: Response) -> ModelResult<(u16, Value)> {
    let status = response.status().as_u16();
    let body = response.bytes().await.change_context(Error::ReqwestError(
        "Failed to get body from response".to_string(),
    ))?;

    let value: Value = serde_json::from_slice(&body)
        .change_context(Error::SerdeDeserialize(
            "Response body is not valid JSON".to_string(),
        ))
        .attach_printable_lazy(|| format!("status {status}"))?;

    Ok((status, value))
}
