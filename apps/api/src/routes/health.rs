use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::Provider;
use crate::state::AppState;

/// GET /health
/// Returns service version and which providers have a key configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let configured = |provider| state.config.credential(provider).is_some();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "content-api",
        "providers": {
            "anthropic": configured(Provider::Anthropic),
            "openai": configured(Provider::OpenAi),
        }
    }))
}
