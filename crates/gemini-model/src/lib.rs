//! A model provider for the Gemini `generateContent` API.
//!
//! Unlike chat completion APIs, the endpoint is driven with one free-text
//! prompt. Messages in a [`ModelRequest`] are folded into that prompt.

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
    DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig, GeminiConfigBuilder,
};
use proto::GenerateContentResponse;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Error type for [`GeminiProvider`].
pub type Error = ProviderError;

/// Gemini model provider.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    client: Client,
    config: Arc<GeminiConfig>,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider` with the given configuration.
    #[inline]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl ModelProvider for GeminiProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let gemini_req = proto::create_request(req);
        let http_req = self
            .client
            .post(self.config.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&gemini_req);

        async move {
            let body = send_json(http_req).await?;
            trace!("got generate content body: {body}");

            let generated =
                serde_json::from_str::<GenerateContentResponse>(&body)
                    .map_err(|err| {
                        Error::new(format!("{err}"), ErrorKind::InvalidResponse)
                    })?;
            Ok(proto::create_response(generated))
        }
    }
}
