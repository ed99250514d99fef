use thiserror::Error;

/// Everything that can go wrong between receiving a request and answering
/// it.
///
/// No variant is retried. Callers at the request boundary are expected to
/// log the detail and answer with a generic failure.
#[derive(Debug, Error)]
pub enum Error {
    /// A setting is missing or malformed. Only raised at startup.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The completion endpoint could not be reached or answered with a
    /// non-success status.
    #[error("upstream request failed: {detail}")]
    Upstream {
        /// The HTTP status, `None` when no response was received.
        status: Option<u16>,
        /// The provider's description, including the raw body if any.
        detail: String,
    },

    /// The completion endpoint answered, but generated no usable text.
    #[error("upstream returned an empty completion")]
    EmptyCompletion,

    /// The extraction output couldn't be turned into preferences and plans.
    #[error("extraction failed: {0}")]
    Extraction(String),
}

impl Error {
    #[inline]
    pub(crate) fn extraction<S: Into<String>>(reason: S) -> Self {
        Self::Extraction(reason.into())
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
