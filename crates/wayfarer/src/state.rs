use wayfarer_core::{Assistant, Extractor};
use wayfarer_gemini_model::GeminiProvider;
use wayfarer_model::ModelProvider;
use wayfarer_openai_model::OpenAIProvider;

use crate::Config;

/// Shared by all handlers. Everything in here is immutable, requests never
/// see each other's data.
#[derive(Clone)]
pub struct AppState {
    pub(crate) assistant: Assistant,
    pub(crate) extractor: Extractor,
}

impl AppState {
    /// Creates the state with a provider for each flow.
    pub fn with_model_providers<C, E>(chat: C, extraction: E) -> Self
    where
        C: ModelProvider + 'static,
        E: ModelProvider + 'static,
    {
        Self {
            assistant: Assistant::with_model_provider(chat),
            extractor: Extractor::with_model_provider(extraction),
        }
    }

    /// Creates the state with the real upstream providers.
    pub fn from_config(config: &Config) -> Self {
        Self::with_model_providers(
            OpenAIProvider::new(config.chat.clone()),
            GeminiProvider::new(config.extraction.clone()),
        )
    }
}
