//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Failure talking to the remote store. Variants exist for logs only; HTTP callers see one failure kind.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store responded {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed store response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("service credential is not a valid header value")]
    InvalidCredential,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("remote store call failed: {0}")]
    Store(#[from] StoreError),
}

pub const STORE_FAILURE_MESSAGE: &str = "remote store call failed";

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Store failures share one fixed message; the cause is only logged.
        let (status, code, message) = match &self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error", self.to_string()),
            AppError::Store(_) => (StatusCode::BAD_GATEWAY, "store_unavailable", STORE_FAILURE_MESSAGE.to_string()),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_store_failure_maps_to_bad_gateway() {
        let errors = [
            StoreError::Status { status: 401, body: "invalid key".into() },
            StoreError::Status { status: 503, body: String::new() },
            StoreError::Decode(serde_json::from_str::<serde_json::Value>("{").unwrap_err()),
            StoreError::InvalidCredential,
        ];
        for err in errors {
            let resp = AppError::from(err).into_response();
            assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn config_failure_is_internal() {
        let resp = AppError::from(ConfigError::Missing("SUPABASE_URL")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
