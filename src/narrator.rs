use crate::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatMessage, ContentPart, LlmClient},
    prompt::{self, PromptParams, PromptVariant},
};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

pub const NO_IMAGE: &str = "No image provided.";
pub const IMAGE_AND_QUESTION_REQUIRED: &str = "Image and question are required.";
pub const INVALID_TIMESTAMP: &str = "Timestamp must be a non-negative number of seconds.";

/// The video a deployment narrates. Fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoProfile {
    pub title: Option<String>,
    pub transcript: String,
}

/// Generation settings forwarded with every upstream call.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationSettings {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Turns a frame (and optionally a question) into one upstream completion.
pub struct Narrator {
    llm_client: Arc<dyn LlmClient>,
    video: VideoProfile,
    variant: PromptVariant,
    settings: GenerationSettings,
}

impl Narrator {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        video: VideoProfile,
        variant: PromptVariant,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            llm_client,
            video,
            variant,
            settings,
        }
    }

    pub async fn describe(&self, image: Option<&str>, timestamp: Option<f64>) -> Result<String> {
        let image = non_empty(image).ok_or_else(|| Error::bad_request(NO_IMAGE))?;
        let timestamp = validate_timestamp(timestamp)?;

        let prompt = prompt::describe_prompt(self.variant, &self.params(timestamp));
        self.complete("describe", prompt, image).await
    }

    pub async fn answer(
        &self,
        image: Option<&str>,
        question: Option<&str>,
        timestamp: Option<f64>,
    ) -> Result<String> {
        let (Some(image), Some(question)) = (non_empty(image), non_empty(question)) else {
            return Err(Error::bad_request(IMAGE_AND_QUESTION_REQUIRED));
        };
        let timestamp = validate_timestamp(timestamp)?;

        let prompt = prompt::question_prompt(self.variant, &self.params(timestamp), question);
        self.complete("answer", prompt, image).await
    }

    fn params(&self, timestamp: Option<f64>) -> PromptParams<'_> {
        PromptParams {
            title: self.video.title.as_deref(),
            transcript: &self.video.transcript,
            timestamp,
        }
    }

    async fn complete(&self, operation: &str, prompt: String, image: &str) -> Result<String> {
        let request_id = Uuid::new_v4();
        info!(%request_id, operation, image_bytes = image.len(), "Relaying frame upstream");
        debug!(%request_id, "Prompt is {} characters", prompt.len());

        let request = ChatCompletionRequest {
            messages: vec![ChatMessage::user(vec![
                ContentPart::Text(prompt),
                ContentPart::ImageUrl(prompt::image_data_url(image)),
            ])],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response = self.llm_client.create_chat_completion(request).await?;
        let text = response.first_choice_text()?.to_string();

        match response.usage {
            Some(usage) => info!(
                %request_id,
                operation,
                completion_id = %response.id,
                model = %response.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Upstream completion received"
            ),
            None => info!(
                %request_id,
                operation,
                completion_id = %response.id,
                model = %response.model,
                "Upstream completion received"
            ),
        }
        Ok(text)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn validate_timestamp(timestamp: Option<f64>) -> Result<Option<f64>> {
    match timestamp {
        Some(t) if !t.is_finite() || t < 0.0 => Err(Error::bad_request(INVALID_TIMESTAMP)),
        other => Ok(other),
    }
}
