//! Generation orchestration, shared by all four endpoints.
//!
//! Flow per invocation (stateless across invocations):
//!   credential check → build prompt → await completion → normalize → respond
//!
//! A missing credential short-circuits before the completion client is touched.
//! A provider failure is returned as-is (no retry, no fallback). Only the
//! normalize step substitutes fallback values.

use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::models::{GenerationRequest, Task, TaskOutput};
use crate::generation::normalizer::{normalize, Origin};
use crate::generation::prompt_builder::build_prompt;
use crate::state::AppState;

/// Checks that the provider bound to `task` has a key configured.
pub fn ensure_credential(state: &AppState, task: Task) -> Result<(), AppError> {
    let provider = task.provider();
    match state.config.credential(provider) {
        Some(_) => Ok(()),
        None => Err(AppError::CredentialMissing(provider.credential_var())),
    }
}

/// Runs one task end to end. The caller is expected to have run
/// [`ensure_credential`] and validated the request.
pub async fn generate(
    state: &AppState,
    task: Task,
    request: &GenerationRequest,
) -> Result<TaskOutput, AppError> {
    let prompt = build_prompt(task, request);
    let model = task.model(&state.config);
    debug!(
        "Built {task} prompt ({} chars) for {}/{}",
        prompt.len(),
        model.provider,
        model.model
    );

    let raw = state
        .llm
        .complete(&model, &prompt)
        .await
        .map_err(|source| AppError::Generation { task, source })?;

    let normalized = normalize(task, raw, request);
    info!(
        "Generated {task} (source: {})",
        match normalized.origin {
            Origin::Model => "model",
            Origin::Fallback => "fallback",
        }
    );

    Ok(normalized.value)
}
