mod types;

pub use types::*;

use crate::{Error, Result, narrator::VideoProfile};
use std::env;
use std::path::Path;
use tracing::debug;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(Path::new(&config_path)).await
}

pub async fn load_from(config_path: &Path) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path.display());

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let mut config: Config = serde_yaml::from_str(&config_str)?;

    apply_api_key(&mut config.llm, env::var(API_KEY_ENV).ok());

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    resolve_transcript(&mut config.video, base_dir).await?;

    Ok(config)
}

/// The environment wins over the file. Empty values count as unset.
pub fn apply_api_key(llm: &mut LlmConfig, from_env: Option<String>) {
    if let Some(key) = from_env.filter(|k| !k.trim().is_empty()) {
        llm.api_key = Some(key);
    }

    if llm.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
        llm.api_key = None;
    }
}

/// Inlines `transcript_path` into `transcript`. Relative paths are taken
/// from the config file's directory.
pub async fn resolve_transcript(video: &mut VideoConfig, base_dir: &Path) -> Result<()> {
    let transcript_path = video.transcript_path.take();
    match (video.transcript.is_some(), transcript_path) {
        (true, Some(_)) => Err(Error::config(
            "video.transcript and video.transcript_path are mutually exclusive",
        )),
        (false, None) => Err(Error::config(
            "video transcript missing: set video.transcript or video.transcript_path",
        )),
        (true, None) => Ok(()),
        (false, Some(path)) => {
            let path = if path.is_relative() {
                base_dir.join(path)
            } else {
                path
            };
            debug!("Reading video transcript from: {}", path.display());

            let transcript = tokio::fs::read_to_string(&path).await.map_err(|e| {
                Error::config(format!(
                    "failed to read transcript {}: {}",
                    path.display(),
                    e
                ))
            })?;
            video.transcript = Some(transcript);
            Ok(())
        }
    }
}

impl VideoConfig {
    pub fn profile(&self) -> Result<VideoProfile> {
        let transcript = self
            .transcript
            .clone()
            .ok_or_else(|| Error::config("video transcript has not been resolved"))?;

        Ok(VideoProfile {
            title: self
                .title
                .clone()
                .filter(|t| !t.trim().is_empty()),
            transcript,
        })
    }
}
