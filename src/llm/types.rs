use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContentPart, ImageDetail, ImageUrlArgs,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    /// An `http(s)` URL or a `data:` URL carrying the image inline.
    ImageUrl(String),
}

/// A user turn. The relay never sends anything else upstream.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Choice {
    pub content: Option<String>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatMessage {
    pub fn user(content: Vec<ContentPart>) -> Self {
        Self { content }
    }

    pub fn to_openai_message(&self) -> Result<ChatCompletionRequestMessage, crate::Error> {
        let mut parts: Vec<ChatCompletionRequestUserMessageContentPart> =
            Vec::with_capacity(self.content.len());
        for part in &self.content {
            parts.push(part.to_openai_part()?);
        }

        let msg = ChatCompletionRequestUserMessageArgs::default()
            .content(parts)
            .build()
            .map_err(|e| crate::Error::llm(format!("Failed to build user message: {}", e)))?;
        Ok(msg.into())
    }
}

impl ContentPart {
    fn to_openai_part(&self) -> Result<ChatCompletionRequestUserMessageContentPart, crate::Error> {
        match self {
            Self::Text(text) => {
                let part = ChatCompletionRequestMessageContentPartTextArgs::default()
                    .text(text.clone())
                    .build()
                    .map_err(|e| crate::Error::llm(format!("Failed to build text part: {}", e)))?;
                Ok(part.into())
            }
            Self::ImageUrl(url) => {
                let image_url = ImageUrlArgs::default()
                    .url(url.clone())
                    .detail(ImageDetail::Auto)
                    .build()
                    .map_err(|e| crate::Error::llm(format!("Failed to build image url: {}", e)))?;
                let part = ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(image_url)
                    .build()
                    .map_err(|e| crate::Error::llm(format!("Failed to build image part: {}", e)))?;
                Ok(part.into())
            }
        }
    }
}

impl ChatCompletionResponse {
    /// Text of the first choice. Later choices are ignored.
    pub fn first_choice_text(&self) -> Result<&str, crate::Error> {
        let choice = self
            .choices
            .first()
            .ok_or_else(|| crate::Error::llm("Upstream response contained no choices"))?;

        match choice.content.as_deref() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(crate::Error::llm(format!(
                "Upstream response had no text content (finish reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            ))),
        }
    }
}
