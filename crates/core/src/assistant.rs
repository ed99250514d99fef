use wayfarer_model::{ModelProvider, ModelRequest};

use crate::conversation::{ChatMessage, normalize};
use crate::error::Result;
use crate::model_client::ModelClient;

/// Sampling settings for the conversational flow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AssistantOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AssistantOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

/// The conversational side of the travel assistant.
///
/// It keeps no conversation state: every reply is computed from the
/// history the caller passes in.
#[derive(Clone)]
pub struct Assistant {
    model_client: ModelClient,
    options: AssistantOptions,
}

impl Assistant {
    /// Creates an assistant backed by a chat completion provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(provider: P) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            options: Default::default(),
        }
    }

    #[inline]
    pub fn with_options(mut self, options: AssistantOptions) -> Self {
        self.options = options;
        self
    }

    /// Answers `message`, given the conversation so far.
    pub async fn reply(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String> {
        let prompt = normalize(history, message);
        debug!(
            "replying with {} prompt messages ({} in history)",
            prompt.messages().len(),
            history.len()
        );
        let req = ModelRequest::with_messages(prompt.into_messages())
            .temperature(self.options.temperature)
            .max_tokens(self.options.max_tokens);
        self.model_client.send_request(req).await
    }
}
