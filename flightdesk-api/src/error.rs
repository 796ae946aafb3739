use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flightdesk_core::{CoreError, ProviderError};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    ProviderUnavailable(String),
    InvalidProviderResponse(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ProviderUnavailable(detail) => {
                tracing::error!("Flight search request failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Flight search request failed".to_string())
            },
            AppError::InvalidProviderResponse(detail) => {
                tracing::error!("Invalid flight search response: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Invalid flight search response".to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Provider(ProviderError::Transport(detail)) => Self::ProviderUnavailable(detail),
            CoreError::Provider(ProviderError::Decode(detail)) => Self::InvalidProviderResponse(detail),
        }
    }
}
