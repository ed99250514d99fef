//! Turning a finished conversation into preferences and trip plans.
//!
//! Extraction runs as its own completion with its own instruction, rather
//! than reading the conversational replies, so that the dialogue prompt
//! and the JSON prompt don't pull against each other. The output of the
//! generative endpoint is free text: it is sanitized, parsed and validated
//! here, and rejected as a whole if any part doesn't fit.

mod plan;
#[cfg(test)]
mod tests;

use serde_json::Value;
use wayfarer_model::{ModelMessage, ModelProvider, ModelRequest};

use crate::conversation::{ChatMessage, transcript};
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::model_client::ModelClient;
use crate::sanitize::strip_code_fences;
pub use plan::{
    ExtractedPreferences, Extraction, HIGHLIGHT_COUNT, PLAN_COUNT, TravelPlan,
};

/// Sampling settings for the extraction flow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtractorOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 4096,
        }
    }
}

/// Extracts preferences and plans from conversations.
#[derive(Clone)]
pub struct Extractor {
    model_client: ModelClient,
    options: ExtractorOptions,
}

impl Extractor {
    /// Creates an extractor backed by a generative provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(provider: P) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            options: Default::default(),
        }
    }

    #[inline]
    pub fn with_options(mut self, options: ExtractorOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the extraction over the whole conversation.
    ///
    /// Every failure, including upstream ones, is reported as
    /// [`Error::Extraction`].
    pub async fn extract(&self, history: &[ChatMessage]) -> Result<Extraction> {
        let transcript = transcript(history);
        if transcript.is_empty() {
            return Err(Error::extraction("the conversation has no dialogue"));
        }

        let prompt = Instruction::Extraction.render(&transcript);
        let req = ModelRequest::with_messages([ModelMessage::User(prompt)])
            .temperature(self.options.temperature)
            .max_tokens(self.options.max_tokens);
        let raw = self
            .model_client
            .send_request(req)
            .await
            .map_err(|err| Error::extraction(format!("completion failed: {err}")))?;

        parse_extraction(&raw).inspect_err(|err| {
            warn!("rejected extraction output: {err}");
            trace!("rejected output: {raw}");
        })
    }
}

/// Parses raw model output into an [`Extraction`].
///
/// Fences are stripped first. The payload must be a JSON object carrying
/// both `preferences` and `plans`, every required field must be present
/// with the right type, and the plans must pass validation.
pub fn parse_extraction(raw: &str) -> Result<Extraction> {
    let payload = strip_code_fences(raw);
    let value = serde_json::from_str::<Value>(payload).map_err(|err| {
        Error::extraction(format!("output is not valid JSON: {err}"))
    })?;

    let Value::Object(object) = value else {
        return Err(Error::extraction("output is not a JSON object"));
    };
    for key in ["preferences", "plans"] {
        if !object.contains_key(key) {
            return Err(Error::extraction(format!("output has no {key:?} key")));
        }
    }

    let extraction = serde_json::from_value::<Extraction>(Value::Object(object))
        .map_err(|err| Error::extraction(format!("output has the wrong shape: {err}")))?;
    extraction.validate().map_err(Error::Extraction)?;
    Ok(extraction)
}
