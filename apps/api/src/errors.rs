use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::models::Task;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Provider key absent from configuration. Raised before any model call.
    #[error("{0} is not set")]
    CredentialMissing(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body could not be decoded. Answered like any other failure.
    #[error("Failed to generate {task}: {detail}")]
    BadBody { task: Task, detail: String },

    #[error("Failed to generate {task}: {source}")]
    Generation {
        task: Task,
        #[source]
        source: LlmError,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::CredentialMissing(var) => {
                tracing::error!("{var} is not set");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{var} is not set"))
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::BadBody { task, detail } => {
                tracing::error!("Unreadable {task} request body: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to generate {task}"),
                )
            }
            AppError::Generation { task, source } => {
                tracing::error!("Error generating {task}: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to generate {task}"),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
