//! The captions form: a single call with no wizard chaining.

use tracing::warn;

use crate::client::gateway::GenerationGateway;
use crate::client::wizard::WizardError;
use crate::generation::models::{CaptionSet, ContentType, GenerationRequest, Task, TaskOutput};

pub const MISSING_URL: &str = "Please provide a product URL to generate captions.";

#[derive(Debug, Clone, Default)]
pub struct CaptionsForm {
    pub product_url: String,
    pub content_type: ContentType,
    pub additional_details: String,
    captions: Option<CaptionSet>,
}

impl CaptionsForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captions(&self) -> Option<&CaptionSet> {
        self.captions.as_ref()
    }

    pub fn request(&self) -> Result<GenerationRequest, WizardError> {
        let request = GenerationRequest {
            product_url: Some(self.product_url.clone()),
            content_type: Some(self.content_type),
            additional_details: Some(self.additional_details.clone()),
            ..Default::default()
        };
        if request.url().is_none() {
            return Err(WizardError::Validation(MISSING_URL));
        }
        Ok(request)
    }

    /// Generates captions. On failure the previous captions are kept.
    pub async fn generate(
        &mut self,
        gateway: &dyn GenerationGateway,
    ) -> Result<&CaptionSet, WizardError> {
        let request = self.request()?;

        let failed = |detail: String| WizardError::Generation {
            task: Task::Captions,
            detail,
        };
        let output = gateway.generate(Task::Captions, &request).await.map_err(|e| {
            warn!("Captions call failed: {e}");
            failed(e.to_string())
        })?;

        match output {
            TaskOutput::Captions(captions) => Ok(self.captions.insert(captions)),
            other => Err(failed(format!("unexpected {} response", other.task()))),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::client::gateway::GatewayError;

    struct FixedGateway(fn() -> Result<TaskOutput, GatewayError>);

    #[async_trait]
    impl GenerationGateway for FixedGateway {
        async fn generate(
            &self,
            task: Task,
            request: &GenerationRequest,
        ) -> Result<TaskOutput, GatewayError> {
            assert_eq!(task, Task::Captions);
            assert!(request.url().is_some());
            (self.0)()
        }
    }

    fn three() -> Result<TaskOutput, GatewayError> {
        Ok(TaskOutput::Captions([
            "one".to_string(),
            "two".to_string(),
            "three".to_string(),
        ]))
    }

    fn unreachable_gateway() -> Result<TaskOutput, GatewayError> {
        panic!("gateway must not be called")
    }

    #[tokio::test]
    async fn test_blank_url_is_blocked() {
        let mut form = CaptionsForm::new();
        form.product_url = "   ".to_string();

        let err = form.generate(&FixedGateway(unreachable_gateway)).await.unwrap_err();
        assert_eq!(err, WizardError::Validation(MISSING_URL));
    }

    #[tokio::test]
    async fn test_generate_stores_three_captions() {
        let mut form = CaptionsForm::new();
        form.product_url = "https://stateproperty.com/pendant".to_string();
        form.content_type = ContentType::Press;

        let captions = form.generate(&FixedGateway(three)).await.unwrap();
        assert_eq!(captions.len(), 3);
        assert_eq!(form.captions().unwrap()[2], "three");
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_captions() {
        let mut form = CaptionsForm::new();
        form.product_url = "https://stateproperty.com/pendant".to_string();
        form.generate(&FixedGateway(three)).await.unwrap();

        let err = form
            .generate(&FixedGateway(|| {
                Err(GatewayError::Status {
                    status: 500,
                    message: "Failed to generate captions".to_string(),
                })
            }))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to generate captions. Please try again.");
        assert_eq!(form.captions().unwrap()[0], "one");
    }

    #[test]
    fn test_request_carries_content_type_and_details() {
        let form = CaptionsForm {
            product_url: "https://stateproperty.com/cuff".to_string(),
            content_type: ContentType::MoodShot,
            additional_details: "holiday campaign".to_string(),
            ..Default::default()
        };
        let request = form.request().unwrap();
        assert_eq!(request.content_type(), ContentType::MoodShot);
        assert_eq!(request.details(), Some("holiday campaign"));
    }
}
