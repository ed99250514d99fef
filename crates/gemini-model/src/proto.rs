use serde::{Deserialize, Serialize};
use wayfarer_model::{ModelFinishReason, ModelRequest, ModelResponse};

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

// -----------
// Conversions
// -----------

/// The generative endpoint takes one free-text prompt, so every message
/// is folded into a single user turn in order.
pub fn create_request(req: &ModelRequest) -> GenerateContentRequest {
    let prompt = req
        .messages
        .iter()
        .map(|msg| msg.content())
        .collect::<Vec<_>>()
        .join("\n\n");

    let generation_config =
        if req.temperature.is_none() && req.max_tokens.is_none() {
            None
        } else {
            Some(GenerationConfig {
                temperature: req.temperature,
                max_output_tokens: req.max_tokens,
            })
        };

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_owned()),
            parts: vec![Part { text: Some(prompt) }],
        }],
        generation_config,
    }
}

/// Joins the text parts of the first candidate.
pub fn create_response(resp: GenerateContentResponse) -> ModelResponse {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        return ModelResponse::default();
    };
    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .filter(|text| !text.is_empty());
    ModelResponse {
        content: text,
        finish_reason: candidate.finish_reason.as_deref().map(finish_reason),
    }
}

fn finish_reason(reason: &str) -> ModelFinishReason {
    match reason {
        "STOP" => ModelFinishReason::Stop,
        "MAX_TOKENS" => ModelFinishReason::Length,
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => {
            ModelFinishReason::ContentFilter
        }
        _ => ModelFinishReason::Other,
    }
}
