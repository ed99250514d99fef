//! A model provider for OpenAI-compatible chat completion APIs.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::sync::Arc;

use reqwest::{Client, header};
use wayfarer_model::http::send_json;
use wayfarer_model::{
    ErrorKind, ModelProvider, ModelRequest, ModelResponse, ProviderError,
};

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAIConfig, OpenAIConfigBuilder,
};
use proto::ChatCompletion;

/// Error type for [`OpenAIProvider`].
pub type Error = ProviderError;

/// OpenAI-compatible model provider.
#[derive(Clone, Debug)]
pub struct OpenAIProvider {
    client: Client,
    config: Arc<OpenAIConfig>,
}

impl OpenAIProvider {
    /// Creates a new `OpenAIProvider` with the given configuration.
    #[inline]
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl ModelProvider for OpenAIProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let openai_req = proto::create_request(req, &self.config);
        let http_req = self
            .client
            .post(format!("{}{}", self.config.base_url, "/chat/completions"))
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .json(&openai_req);

        async move {
            let body = send_json(http_req).await?;
            trace!("got completion body: {body}");

            let completion = serde_json::from_str::<ChatCompletion>(&body)
                .map_err(|err| {
                    Error::new(format!("{err}"), ErrorKind::InvalidResponse)
                })?;
            Ok(proto::create_response(completion))
        }
    }
}
