//! Error types for the server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::inference::PredictError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Predict(#[from] PredictError),

    #[error("{message}")]
    MalformedRequest { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Predict(PredictError::UnknownCategory { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Predict(PredictError::ModelUnavailable(_))
            | ApiError::Predict(PredictError::Failure(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MalformedRequest { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), detail = %message, "Prediction request failed");
        } else {
            tracing::debug!(status = status.as_u16(), detail = %message, "Rejected request");
        }

        // Failure details are passed through to the client unchanged.
        let body = Json(json!({
            "error": true,
            "detail": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
