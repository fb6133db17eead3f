//! Response Normalizer: turns raw completion text into a task result.
//!
//! Parsing is strict and typed (`Result<T, MalformedResponse>`). Selecting the
//! fallback is a separate pure step, so a caller never observes a parse error:
//! model output that is the wrong shape is replaced by a fixed value of the
//! right shape. Script output is never parsed.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::generation::hook_library::HOOK_LIBRARY;
use crate::generation::models::{
    Angle, CaptionSet, ContentType, GenerationRequest, Hook, Task, TaskOutput,
};
use crate::llm_client::strip_json_fences;

#[derive(Debug, Error)]
pub enum MalformedResponse {
    #[error("not valid JSON for the expected shape: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON array was empty")]
    Empty,
}

/// Where a normalized value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<T> {
    pub value: T,
    pub origin: Origin,
}

pub fn parse_hooks(raw: &str) -> Result<Vec<Hook>, MalformedResponse> {
    parse_non_empty(raw)
}

pub fn parse_angles(raw: &str) -> Result<Vec<Angle>, MalformedResponse> {
    parse_non_empty(raw)
}

/// A caption set must be a JSON array of exactly three strings.
pub fn parse_captions(raw: &str) -> Result<CaptionSet, MalformedResponse> {
    Ok(serde_json::from_str(strip_json_fences(raw))?)
}

fn parse_non_empty<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, MalformedResponse> {
    let items: Vec<T> = serde_json::from_str(strip_json_fences(raw))?;
    if items.is_empty() {
        return Err(MalformedResponse::Empty);
    }
    Ok(items)
}

/// Keeps a successful parse, otherwise substitutes the fallback.
pub fn or_fallback<T>(
    task: Task,
    parsed: Result<T, MalformedResponse>,
    fallback: impl FnOnce() -> T,
) -> Normalized<T> {
    match parsed {
        Ok(value) => Normalized {
            value,
            origin: Origin::Model,
        },
        Err(e) => {
            warn!("Malformed {task} response, using fallback: {e}");
            Normalized {
                value: fallback(),
                origin: Origin::Fallback,
            }
        }
    }
}

/// Normalizes raw completion text for a task. Never fails.
pub fn normalize(task: Task, raw: String, request: &GenerationRequest) -> Normalized<TaskOutput> {
    match task {
        Task::Hooks => map(or_fallback(task, parse_hooks(&raw), fallback_hooks), TaskOutput::Hooks),
        Task::Angles => map(
            or_fallback(task, parse_angles(&raw), fallback_angles),
            TaskOutput::Angles,
        ),
        Task::Script => Normalized {
            value: TaskOutput::Script(raw),
            origin: Origin::Model,
        },
        Task::Captions => {
            let content_type = request.content_type();
            map(
                or_fallback(task, parse_captions(&raw), || fallback_captions(content_type)),
                TaskOutput::Captions,
            )
        }
    }
}

fn map<T, U>(normalized: Normalized<T>, f: impl FnOnce(T) -> U) -> Normalized<U> {
    Normalized {
        value: f(normalized.value),
        origin: normalized.origin,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback values
// ────────────────────────────────────────────────────────────────────────────

pub fn fallback_hooks() -> Vec<Hook> {
    HOOK_LIBRARY.iter().take(5).map(|h| h.to_hook()).collect()
}

const FALLBACK_ANGLES: [(&str, &str, &str); 5] = [
    (
        "angle_1",
        "Emotional Transformation",
        "Show how wearing this jewelry transforms confidence and mood",
    ),
    (
        "angle_2",
        "Styling Showcase",
        "Demonstrate multiple ways to style the piece for different occasions",
    ),
    (
        "angle_3",
        "Quality Spotlight",
        "Highlight the craftsmanship and premium materials up close",
    ),
    (
        "angle_4",
        "Lifestyle Integration",
        "Show the jewelry as part of an aspirational daily routine",
    ),
    (
        "angle_5",
        "Unboxing Experience",
        "Create anticipation through a satisfying unboxing reveal",
    ),
];

pub fn fallback_angles() -> Vec<Angle> {
    FALLBACK_ANGLES
        .iter()
        .map(|(id, title, description)| Angle {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect()
}

pub fn fallback_captions(content_type: ContentType) -> CaptionSet {
    let format = content_type.as_str();
    [
        format!(
            "✨ Elevate your everyday with pieces that speak to your soul. This {format} captures \
             the essence of modern luxury. #StateProperty #JewelryLover #EverydayLuxury"
        ),
        "When jewelry becomes more than an accessory - it becomes part of your story. Discover \
         the collection that's redefining elegance. #ModernJewelry #LuxuryLifestyle #StateProperty"
            .to_string(),
        "The perfect piece doesn't just complete your look, it completes you. Experience the \
         difference quality makes. #JewelryGoals #LuxuryJewelry #StateProperty"
            .to_string(),
    ]
}
