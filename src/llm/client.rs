use super::types::*;
use crate::{Error, Result, config::{API_KEY_ENV, LlmConfig}};
use async_openai::{Client, config::OpenAIConfig, types as openai_types};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;
}

pub struct OpenAiClient {
    /// `None` when no API key was configured; every call then fails.
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = match config.api_key {
            Some(api_key) => {
                let mut openai_config = OpenAIConfig::new().with_api_key(api_key);

                if !config.base_url.is_empty() {
                    openai_config = openai_config.with_api_base(config.base_url);
                }

                let http_client = reqwest::Client::builder()
                    .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                    .build()?;

                // Zero elapsed budget: rate-limit and 5xx responses fail on the first attempt.
                let no_retry = ExponentialBackoffBuilder::new()
                    .with_max_elapsed_time(Some(Duration::ZERO))
                    .build();

                Some(
                    Client::with_config(openai_config)
                        .with_http_client(http_client)
                        .with_backoff(no_retry),
                )
            }
            None => None,
        };

        Ok(Self {
            client,
            model: config.model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::config(format!("{} is not set", API_KEY_ENV)))?;

        debug!(
            "Creating chat completion with {} messages on {}",
            request.messages.len(),
            self.model
        );

        let mut messages = Vec::with_capacity(request.messages.len());
        for msg in &request.messages {
            messages.push(msg.to_openai_message()?);
        }

        let mut request_builder = openai_types::CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model).messages(messages);

        if let Some(temperature) = request.temperature {
            request_builder.temperature(temperature);
        }

        if let Some(max_tokens) = request.max_tokens {
            request_builder.max_completion_tokens(max_tokens);
        }

        let openai_request = request_builder.build()?;

        let response = client.chat().create(openai_request).await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        let choices = response
            .choices
            .into_iter()
            .map(|choice| Choice {
                content: choice.message.content,
                finish_reason: choice.finish_reason.map(|fr| format!("{fr:?}")),
            })
            .collect();

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ChatCompletionResponse {
            id: response.id,
            model: response.model,
            choices,
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_config(api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: api_key.map(str::to_string),
            model: "gpt-4o".to_string(),
            max_tokens: None,
            temperature: None,
        }
    }

    #[test]
    fn test_openai_client_creation() {
        let client = OpenAiClient::new(create_test_config(Some("test-api-key"))).unwrap();
        assert_eq!(client.model(), "gpt-4o");
        assert!(client.client.is_some());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_on_call() {
        let client = OpenAiClient::new(create_test_config(None)).unwrap();
        assert!(client.client.is_none());

        let err = client
            .create_chat_completion(ChatCompletionRequest {
                messages: vec![ChatMessage::user(vec![ContentPart::Text(
                    "hello".to_string(),
                )])],
                max_tokens: None,
                temperature: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: OPENAI_API_KEY is not set");
    }
}
