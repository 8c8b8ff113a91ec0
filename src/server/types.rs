use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ProcessImageRequest {
    #[serde(default)]
    pub image: Option<String>,
    /// Seconds into the video where playback was paused.
    #[serde(default, alias = "video_time")]
    pub timestamp: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProcessQuestionRequest {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, alias = "video_time")]
    pub timestamp: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ProcessImageResponse {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessQuestionResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
