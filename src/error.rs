//! # error
//!
//! Centralised application error type.
//!
//! Every handler returns `Result<_, AppError>`.  Axum's `IntoResponse` impl
//! converts these into JSON error bodies (`{ "ok": false, "error": ... }`) so
//! the dashboard always gets a machine-readable response even on failure.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// ─── Upstream ─────────────────────────────────────────────────────────────────

/// Failure talking to the Hyperliquid info API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The API answered, but not with 2xx.
    #[error("Hyperliquid API error: {}", .0.as_u16())]
    Status(reqwest::StatusCode),

    /// Connect / timeout / body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 2xx with a body that is not the expected JSON shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

// ─── AppError ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed query parameter.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested resource (e.g. a depositor) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream answered with a non-success status; relayed as-is.
    #[error("Hyperliquid API error: {status}")]
    Upstream { status: u16 },

    /// Network or parse failure while fetching vault data.
    #[error("Failed to fetch vault data: {0}")]
    FetchFailed(String),

    /// Catch-all for unexpected failures.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status(status) => AppError::Upstream {
                status: status.as_u16(),
            },
            other => AppError::FetchFailed(other.to_string()),
        }
    }
}

/// Malformed query strings (`hidePnl=1`, ...) answer in the same JSON shape
/// as every other error instead of axum's plain-text rejection.
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::FetchFailed(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Upstream { status } => format!("Hyperliquid API error: {status}"),
            AppError::FetchFailed(cause) => {
                tracing::error!(cause = %cause, "Failed to fetch vault data");
                "Failed to fetch vault data".to_string()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                "Internal error".to_string()
            }
        };

        let body = Json(json!({
            "ok":    false,
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_relayed() {
        let err: AppError = UpstreamError::Status(reqwest::StatusCode::TOO_MANY_REQUESTS).into();
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.to_string(), "Hyperliquid API error: 429");
    }

    #[test]
    fn decode_failure_is_generic_500() {
        let err: AppError = UpstreamError::Decode("expected map".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, AppError::FetchFailed(_)));
    }
}
