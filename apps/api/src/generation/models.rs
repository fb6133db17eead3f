//! Request and result types shared by the endpoints and the wizard client.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::llm_client::{ModelSelector, Provider};

/// One of the four generation tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    Hooks,
    Angles,
    Script,
    Captions,
}

impl Task {
    pub const ALL: [Task; 4] = [Task::Hooks, Task::Angles, Task::Script, Task::Captions];

    /// Noun used in error messages: "Failed to generate <noun>".
    pub fn noun(self) -> &'static str {
        match self {
            Task::Hooks => "hooks",
            Task::Angles => "angles",
            Task::Script => "script",
            Task::Captions => "captions",
        }
    }

    /// Route segment under `/api`.
    pub fn path(self) -> &'static str {
        match self {
            Task::Hooks => "generate-hooks",
            Task::Angles => "generate-angles",
            Task::Script => "generate-script",
            Task::Captions => "generate-captions",
        }
    }

    pub fn provider(self) -> Provider {
        match self {
            Task::Hooks | Task::Angles | Task::Script => Provider::Anthropic,
            Task::Captions => Provider::OpenAi,
        }
    }

    pub fn model(self, config: &Config) -> ModelSelector {
        let provider = self.provider();
        ModelSelector {
            provider,
            model: config.model(provider).to_string(),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Social media format a caption is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Reel,
    #[default]
    Post,
    Press,
    PackShot,
    MoodShot,
    Lookbook,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::Reel,
        ContentType::Post,
        ContentType::Press,
        ContentType::PackShot,
        ContentType::MoodShot,
        ContentType::Lookbook,
    ];

    /// Value as it appears on the wire, e.g. `pack-shot`.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Reel => "reel",
            ContentType::Post => "post",
            ContentType::Press => "press",
            ContentType::PackShot => "pack-shot",
            ContentType::MoodShot => "mood-shot",
            ContentType::Lookbook => "lookbook",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentType::Reel => "Reel",
            ContentType::Post => "Post",
            ContentType::Press => "Press",
            ContentType::PackShot => "Pack Shot",
            ContentType::MoodShot => "Mood Shot",
            ContentType::Lookbook => "Lookbook",
        }
    }

    /// Tone the captions for this format should take.
    pub fn tone_guidance(self) -> &'static str {
        match self {
            ContentType::Reel => "Be concise, engaging, with strong hooks and trending language",
            ContentType::Post => {
                "Be more descriptive, storytelling-focused with emotional connection"
            }
            ContentType::Press => "Be professional, informative, and media-ready",
            ContentType::PackShot => "Focus on product features, quality, and visual appeal",
            ContentType::MoodShot => "Emphasize lifestyle, emotion, and aspirational messaging",
            ContentType::Lookbook => "Highlight styling, versatility, and fashion-forward appeal",
        }
    }
}

/// Input to any generation task. Which fields matter depends on the task;
/// see [`GenerationRequest::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_hook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_angle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<String>,
}

impl GenerationRequest {
    /// Product description, if non-blank.
    pub fn description(&self) -> Option<&str> {
        non_blank(&self.product_input)
    }

    /// Product URL, if non-blank.
    pub fn url(&self) -> Option<&str> {
        non_blank(&self.product_url)
    }

    pub fn hook(&self) -> Option<&str> {
        non_blank(&self.selected_hook)
    }

    pub fn angle(&self) -> Option<&str> {
        non_blank(&self.selected_angle)
    }

    pub fn details(&self) -> Option<&str> {
        non_blank(&self.additional_details)
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type.unwrap_or_default()
    }

    /// Checks that the fields the task needs are present.
    /// Returns the user-facing message of the first missing field.
    pub fn validate(&self, task: Task) -> Result<(), String> {
        if task == Task::Captions {
            if self.url().is_none() {
                return Err("productUrl is required".to_string());
            }
            return Ok(());
        }

        if self.description().is_none() && self.url().is_none() {
            return Err("Either productInput or productUrl is required".to_string());
        }
        if matches!(task, Task::Angles | Task::Script) && self.hook().is_none() {
            return Err("selectedHook is required".to_string());
        }
        if task == Task::Script && self.angle().is_none() {
            return Err("selectedAngle is required".to_string());
        }
        Ok(())
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A short opening line for a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hook {
    pub id: String,
    pub text: String,
    pub description: String,
}

/// A narrative treatment for developing a hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Angle {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Exactly three captions.
pub type CaptionSet = [String; 3];

/// Success envelope of an endpoint, one variant per task.
///
/// Serializes externally tagged, e.g. `{"hooks": [...]}` or `{"script": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskOutput {
    Hooks(Vec<Hook>),
    Angles(Vec<Angle>),
    Script(String),
    Captions(CaptionSet),
}

impl TaskOutput {
    pub fn task(&self) -> Task {
        match self {
            TaskOutput::Hooks(_) => Task::Hooks,
            TaskOutput::Angles(_) => Task::Angles,
            TaskOutput::Script(_) => Task::Script,
            TaskOutput::Captions(_) => Task::Captions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_uses_camel_case_fields() {
        let request: GenerationRequest = serde_json::from_value(json!({
            "productInput": "gold hoops",
            "selectedHook": "POV",
            "contentType": "pack-shot",
            "additionalDetails": "launch week"
        }))
        .unwrap();

        assert_eq!(request.description(), Some("gold hoops"));
        assert_eq!(request.hook(), Some("POV"));
        assert_eq!(request.content_type(), ContentType::PackShot);
        assert_eq!(request.details(), Some("launch week"));
        assert!(request.url().is_none());
    }

    #[test]
    fn test_unknown_content_type_is_rejected() {
        let result: Result<GenerationRequest, _> =
            serde_json::from_value(json!({"productUrl": "https://x", "contentType": "story"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_content_type_str_matches_wire_value() {
        for content_type in ContentType::ALL {
            assert_eq!(json!(content_type), json!(content_type.as_str()));
        }
    }

    #[test]
    fn test_content_type_defaults_to_post() {
        let request = GenerationRequest::default();
        assert_eq!(request.content_type(), ContentType::Post);
    }

    #[test]
    fn test_blank_fields_count_as_missing() {
        let request = GenerationRequest {
            product_input: Some("   ".to_string()),
            product_url: Some(String::new()),
            ..Default::default()
        };
        assert!(request.validate(Task::Hooks).is_err());
    }

    #[test]
    fn test_validate_per_task() {
        let mut request = GenerationRequest {
            product_url: Some("https://stateproperty.com/ring".to_string()),
            ..Default::default()
        };
        assert!(request.validate(Task::Hooks).is_ok());
        assert!(request.validate(Task::Captions).is_ok());
        assert_eq!(
            request.validate(Task::Angles).unwrap_err(),
            "selectedHook is required"
        );

        request.selected_hook = Some("POV".to_string());
        assert!(request.validate(Task::Angles).is_ok());
        assert_eq!(
            request.validate(Task::Script).unwrap_err(),
            "selectedAngle is required"
        );

        request.selected_angle = Some("Quality Spotlight".to_string());
        assert!(request.validate(Task::Script).is_ok());
    }

    #[test]
    fn test_captions_require_url_even_with_description() {
        let request = GenerationRequest {
            product_input: Some("signet ring".to_string()),
            ..Default::default()
        };
        assert_eq!(
            request.validate(Task::Captions).unwrap_err(),
            "productUrl is required"
        );
    }

    #[test]
    fn test_task_provider_binding() {
        assert_eq!(Task::Hooks.provider(), Provider::Anthropic);
        assert_eq!(Task::Angles.provider(), Provider::Anthropic);
        assert_eq!(Task::Script.provider(), Provider::Anthropic);
        assert_eq!(Task::Captions.provider(), Provider::OpenAi);
    }

    #[test]
    fn test_task_output_envelope_shape() {
        let output = TaskOutput::Script("0-5s: hello".to_string());
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"script": "0-5s: hello"})
        );

        let parsed: TaskOutput =
            serde_json::from_value(json!({"captions": ["a", "b", "c"]})).unwrap();
        assert_eq!(parsed.task(), Task::Captions);
    }
}
