//! How the wizard reaches the generation endpoints.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::generation::models::{GenerationRequest, Task, TaskOutput};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("expected a {expected} response, got {actual}")]
    UnexpectedOutput { expected: Task, actual: Task },
}

/// Invokes one generation endpoint.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    async fn generate(
        &self,
        task: Task,
        request: &GenerationRequest,
    ) -> Result<TaskOutput, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Calls a running API over HTTP: `POST {base_url}/api/<task path>`.
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl GenerationGateway for HttpGateway {
    async fn generate(
        &self,
        task: Task,
        request: &GenerationRequest,
    ) -> Result<TaskOutput, GatewayError> {
        let url = format!("{}/api/{}", self.base_url, task.path());
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{url} returned {status}: {body}");
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let output: TaskOutput = response.json().await?;
        if output.task() != task {
            return Err(GatewayError::UnexpectedOutput {
                expected: task,
                actual: output.task(),
            });
        }
        Ok(output)
    }
}
