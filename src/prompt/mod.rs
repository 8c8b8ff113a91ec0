//! Prompt assembly for the describe and question endpoints.
//!
//! Everything here is a pure function of [`PromptParams`]; the narrator
//! decides what goes in, this module only decides the wording.

use serde::{Deserialize, Serialize};

/// Wording used for the instructions sent with each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptVariant {
    /// Full instructions with the whole transcript embedded.
    #[default]
    Contextual,
    /// Short instructions without the transcript.
    Brief,
}

#[derive(Debug, Clone, Copy)]
pub struct PromptParams<'a> {
    pub title: Option<&'a str>,
    pub transcript: &'a str,
    pub timestamp: Option<f64>,
}

const ACCESSIBILITY_GUIDANCE: &str = "\
Avoid visual references like 'as seen' or 'looks like', and do not describe something by what it looks like.
When appropriate, include how a screen reader might announce elements in the image.
Tailor your response to what a blind or low-vision user might want to know.";

pub fn describe_prompt(variant: PromptVariant, params: &PromptParams<'_>) -> String {
    match variant {
        PromptVariant::Contextual => {
            let mut prompt = match params.title {
                Some(title) => format!(
                    "You are describing a paused moment in a video about {title} to a blind user.\n"
                ),
                None => "You are describing a paused moment in a video to a blind user.\n".to_string(),
            };
            prompt.push_str(ACCESSIBILITY_GUIDANCE);
            prompt.push('\n');
            push_context(&mut prompt, params, "The topic of the video is about");
            prompt.push_str("Now, describe the following image within 3 sentences:");
            prompt
        }
        PromptVariant::Brief => {
            let mut prompt = String::from(
                "Describe the following image for a blind user within 3 sentences.\n",
            );
            prompt.push_str(ACCESSIBILITY_GUIDANCE);
            if let Some(line) = timestamp_line(params.timestamp) {
                prompt.push('\n');
                prompt.push_str(&line);
            }
            prompt
        }
    }
}

pub fn question_prompt(variant: PromptVariant, params: &PromptParams<'_>, question: &str) -> String {
    match variant {
        PromptVariant::Contextual => {
            let mut prompt = match params.title {
                Some(title) => format!(
                    "You are answering a question for a blind user who is watching a video about {title}.\n"
                ),
                None => "You are answering a question for a blind user who is watching a video.\n"
                    .to_string(),
            };
            prompt.push_str(ACCESSIBILITY_GUIDANCE);
            prompt.push('\n');
            push_context(&mut prompt, params, "Keep your answer around the topic of");
            prompt.push_str(&format!(
                "Now, answer the following question based on this image: '{question}'.\n\n\
                 Keep the final answer within 3 sentences."
            ));
            prompt
        }
        PromptVariant::Brief => {
            let mut prompt = format!(
                "This is the user's question: {question}. Answer in a succinct manner.\n"
            );
            prompt.push_str(ACCESSIBILITY_GUIDANCE);
            if let Some(line) = timestamp_line(params.timestamp) {
                prompt.push('\n');
                prompt.push_str(&line);
            }
            prompt
        }
    }
}

fn push_context(prompt: &mut String, params: &PromptParams<'_>, topic_lead: &str) {
    if let Some(title) = params.title {
        prompt.push_str(&format!("{topic_lead} {title}.\n"));
    }
    if let Some(line) = timestamp_line(params.timestamp) {
        prompt.push_str(&line);
        prompt.push('\n');
    }
    prompt.push_str("\nHere is the **FULL** video transcript for context:\n");
    prompt.push_str(params.transcript.trim());
    prompt.push_str("\n\n");
}

fn timestamp_line(timestamp: Option<f64>) -> Option<String> {
    timestamp.map(|t| {
        format!(
            "The user paused the video at timestamp {} seconds.",
            format_timestamp(t)
        )
    })
}

/// Whole seconds print without a fraction, anything else with one decimal.
pub fn format_timestamp(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{seconds:.0}")
    } else {
        format!("{seconds:.1}")
    }
}

/// Frames arrive as bare base64 JPEG; already-formed data URLs pass through.
pub fn image_data_url(image: &str) -> String {
    if image.starts_with("data:") {
        image.to_string()
    } else {
        format!("data:image/jpeg;base64,{image}")
    }
}
