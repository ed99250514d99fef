use std::env;
use std::net::SocketAddr;

use wayfarer_core::Error;
use wayfarer_gemini_model::{GeminiConfig, GeminiConfigBuilder};
use wayfarer_openai_model::{OpenAIConfig, OpenAIConfigBuilder};

/// Address the service binds to when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Process-wide settings, resolved once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Provider settings for the conversational endpoint.
    pub chat: OpenAIConfig,
    /// Provider settings for the extraction endpoint.
    pub extraction: GeminiConfig,
    /// Where the HTTP server listens.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads the settings from the environment.
    ///
    /// Both API keys are required, everything else has a default. Blank
    /// values count as missing.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Error> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            var(key).ok_or_else(|| {
                Error::Configuration(format!(
                    "{key} environment variable is not set"
                ))
            })
        };

        let mut chat = OpenAIConfigBuilder::with_api_key(required("OPENAI_API_KEY")?);
        if let Some(base_url) = var("OPENAI_BASE_URL") {
            chat = chat.with_base_url(base_url);
        }
        if let Some(model) = var("OPENAI_MODEL") {
            chat = chat.with_model(model);
        }

        let mut extraction =
            GeminiConfigBuilder::with_api_key(required("GEMINI_API_KEY")?);
        if let Some(base_url) = var("GEMINI_BASE_URL") {
            extraction = extraction.with_base_url(base_url);
        }
        if let Some(model) = var("GEMINI_MODEL") {
            extraction = extraction.with_model(model);
        }

        let bind_addr = var("WAYFARER_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|_| {
            Error::Configuration(format!(
                "WAYFARER_BIND_ADDR is not a socket address: {bind_addr}"
            ))
        })?;

        Ok(Self {
            chat: chat.build(),
            extraction: extraction.build(),
            bind_addr,
        })
    }
}
