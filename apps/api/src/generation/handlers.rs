//! Axum route handlers for the Generation API.
//!
//! All four endpoints share one pipeline and differ only in their task.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::AppError;
use crate::generation::generator::{ensure_credential, generate};
use crate::generation::models::{GenerationRequest, Task, TaskOutput};
use crate::state::AppState;

type Body = Result<Json<GenerationRequest>, JsonRejection>;

/// POST /api/generate-hooks
pub async fn handle_generate_hooks(
    State(state): State<AppState>,
    body: Body,
) -> Result<Json<TaskOutput>, AppError> {
    run(&state, Task::Hooks, body).await
}

/// POST /api/generate-angles
pub async fn handle_generate_angles(
    State(state): State<AppState>,
    body: Body,
) -> Result<Json<TaskOutput>, AppError> {
    run(&state, Task::Angles, body).await
}

/// POST /api/generate-script
pub async fn handle_generate_script(
    State(state): State<AppState>,
    body: Body,
) -> Result<Json<TaskOutput>, AppError> {
    run(&state, Task::Script, body).await
}

/// POST /api/generate-captions
pub async fn handle_generate_captions(
    State(state): State<AppState>,
    body: Body,
) -> Result<Json<TaskOutput>, AppError> {
    run(&state, Task::Captions, body).await
}

async fn run(state: &AppState, task: Task, body: Body) -> Result<Json<TaskOutput>, AppError> {
    // Credentials first: a misconfigured server answers the same way for any body.
    ensure_credential(state, task)?;

    let Json(request) = body.map_err(|rejection| AppError::BadBody {
        task,
        detail: rejection.body_text(),
    })?;
    request.validate(task).map_err(AppError::Validation)?;

    let output = generate(state, task, &request).await?;
    Ok(Json(output))
}
