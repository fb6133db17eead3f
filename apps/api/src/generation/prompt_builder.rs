//! Prompt Builder: maps a task and its request to the prompt text.
//!
//! Pure and infallible: a missing optional field renders as an empty segment.

use crate::generation::hook_library;
use crate::generation::models::{ContentType, GenerationRequest, Task};
use crate::generation::prompts::{
    ANGLES_PROMPT_TEMPLATE, CAPTIONS_PROMPT_TEMPLATE, HOOKS_PROMPT_TEMPLATE,
    SCRIPT_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{BRAND_VOICE, JSON_ARRAY_ONLY};

pub fn build_prompt(task: Task, request: &GenerationRequest) -> String {
    let info = product_info(request);
    let info = info.as_str();

    match task {
        Task::Hooks => fill(
            HOOKS_PROMPT_TEMPLATE,
            &[
                ("product_info", info),
                ("hook_library", hook_library::render_for_prompt().as_str()),
                ("json_only", JSON_ARRAY_ONLY),
            ],
        ),
        Task::Angles => fill(
            ANGLES_PROMPT_TEMPLATE,
            &[
                ("product_info", info),
                ("selected_hook", request.hook().unwrap_or_default()),
                ("json_only", JSON_ARRAY_ONLY),
            ],
        ),
        Task::Script => fill(
            SCRIPT_PROMPT_TEMPLATE,
            &[
                ("product_info", info),
                ("selected_hook", request.hook().unwrap_or_default()),
                ("selected_angle", request.angle().unwrap_or_default()),
                ("brand_voice", BRAND_VOICE),
            ],
        ),
        Task::Captions => {
            let content_type = request.content_type();
            fill(
                CAPTIONS_PROMPT_TEMPLATE,
                &[
                    ("product_url", request.url().unwrap_or_default()),
                    ("content_type", content_type.label()),
                    (
                        "additional_details",
                        request.details().unwrap_or("None provided"),
                    ),
                    ("tone_guide", tone_guide().as_str()),
                    ("selected_tone", content_type.tone_guidance()),
                    ("brand_voice", BRAND_VOICE),
                    ("json_only", JSON_ARRAY_ONLY),
                ],
            )
        }
    }
}

/// "Description: …" and "URL: …" lines for whichever of the two is present.
fn product_info(request: &GenerationRequest) -> String {
    let mut lines = Vec::with_capacity(2);
    if let Some(description) = request.description() {
        lines.push(format!("Description: {description}"));
    }
    if let Some(url) = request.url() {
        lines.push(format!("URL: {url}"));
    }
    lines.join("\n")
}

fn tone_guide() -> String {
    ContentType::ALL
        .iter()
        .map(|ct| format!("For {}: {}", ct.label().to_uppercase(), ct.tone_guidance()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Substitutes `{key}` placeholders in a single pass. Substituted values are
/// never rescanned, so user text containing braces is inserted verbatim.
/// Braces that do not name a known key are copied through unchanged.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substitution = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, close))
        });

        match substitution {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
