use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use frame_narrator::{
    config::{Config, LlmConfig, LogsConfig, ServerConfig, VideoConfig},
    llm::LlmClient,
    prompt::PromptVariant,
    server,
};
use serde_json::Value;
use std::{path::Path, sync::Arc};
use tower::ServiceExt; // for `oneshot`

pub const TEST_TITLE: &str = "How to Make an EASY Paper Airplane in 1 Minute";
pub const TEST_TRANSCRIPT: &str = "0:00\nin this video I'm going to teach you how\n0:21\nfolding it in half like\n1:17\nthis is a finished paper airplane";

/// Create a test configuration with sensible defaults
pub fn create_test_config(static_dir: &Path) -> Config {
    Config {
        llm: LlmConfig {
            base_url: String::new(),
            api_key: Some("test-key".to_string()),
            model: "gpt-4o".to_string(),
            max_tokens: None,
            temperature: None,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
            static_dir: static_dir.to_path_buf(),
            allow_cors: false,
            expose_error_details: true,
        },
        video: VideoConfig {
            title: Some(TEST_TITLE.to_string()),
            transcript: Some(TEST_TRANSCRIPT.to_string()),
            transcript_path: None,
            prompt_variant: PromptVariant::Contextual,
        },
    }
}

pub fn create_test_app(config: &Config, llm_client: Arc<dyn LlmClient>) -> Router {
    server::app(config, llm_client).unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, content_type, String::from_utf8_lossy(&bytes).to_string())
}
