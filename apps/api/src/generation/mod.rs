// Content generation: prompt templates, the hook library, response
// normalization, and the orchestration behind the four endpoints.
// All model calls go through llm_client, never directly to a provider.

pub mod generator;
pub mod handlers;
pub mod hook_library;
pub mod models;
pub mod normalizer;
pub mod prompt_builder;
pub mod prompts;
