use axum::{Json, http::StatusCode};
use error_stack::Report;
use mineport_swap::error::{Error as SwapError, ReportDisplayExt as _};

use crate::dto::ApiError;

pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// Maps a quote failure to its HTTP answer. Anything that is not a client or
/// routing problem is logged and answered with `internal_message` only.
pub fn swap_error_response(
    report: Report<SwapError>,
    internal_message: &str,
) -> (StatusCode, Json<ApiError>) {
    match report.current_context() {
        SwapError::MissingParameters(message) | SwapError::InvalidParameter(message) => {
            (StatusCode::BAD_REQUEST, Json(ApiError::new(message.clone())))
        }
        SwapError::NoRoute { message, details } => (
            StatusCode::NOT_FOUND,
            Json(ApiError::with_details(message.clone(), details.clone())),
        ),
        SwapError::BuildFailed { message, details } => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details(message.clone(), details.clone())),
        ),
        _ => {
            tracing::error!(
                "KyberSwap API error: {} {report:?}",
                report.format()
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(internal_message)),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use error_stack::report;
    use serde_json::json;

    #[test]
    fn test_status_mapping() {
        let (status, body) = swap_error_response(
            report!(SwapError::MissingParameters("missing".to_string())),
            "internal",
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0, ApiError::new("missing"));

        let (status, body) = swap_error_response(
            report!(SwapError::NoRoute {
                message: "No route found".to_string(),
                details: json!({ "code": 4008 }),
            }),
            "internal",
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.0.details, Some(json!({ "code": 4008 })));

        let (status, _) = swap_error_response(
            report!(SwapError::BuildFailed {
                message: "Failed to build transaction".to_string(),
                details: json!({}),
            }),
            "internal",
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = swap_error_response(
            report!(SwapError::ReqwestError).attach_printable("connection refused"),
            "Failed to fetch price from KyberSwap",
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0, ApiError::new("Failed to fetch price from KyberSwap"));
    }
}
