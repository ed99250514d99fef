use std::error::Error as StdError;
use std::fmt::{self, Display};

use crate::ModelProviderError;

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never got a response (connection, DNS, TLS, ...).
    Transport,
    /// The credential was rejected by the provider.
    Unauthorized,
    /// The model provider is rate limited.
    RateLimitExceeded,
    /// The provider answered, but not with something we understand.
    InvalidResponse,
    /// Any other errors.
    Other,
}

impl ErrorKind {
    /// Classifies a non-success HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorKind::Unauthorized,
            429 => ErrorKind::RateLimitExceeded,
            _ => ErrorKind::Other,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "Transport error"),
            ErrorKind::Unauthorized => write!(f, "Unauthorized"),
            ErrorKind::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            ErrorKind::InvalidResponse => write!(f, "Invalid response"),
            ErrorKind::Other => write!(f, "Upstream error"),
        }
    }
}

/// A ready-made error type for providers.
///
/// Carries the HTTP status when the upstream answered, in which case the
/// message is the raw response body.
#[derive(Debug)]
pub struct ProviderError {
    message: String,
    kind: ErrorKind,
    status: Option<u16>,
}

impl ProviderError {
    /// Creates an error that didn't come with a status.
    pub fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
            status: None,
        }
    }

    /// Creates an error for a non-success status.
    pub fn with_status(body: impl Into<String>, status: u16) -> Self {
        Self {
            message: body.into(),
            kind: ErrorKind::from_status(status),
            status: Some(status),
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {status}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl StdError for ProviderError {}

impl ModelProviderError for ProviderError {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    fn status(&self) -> Option<u16> {
        self.status
    }
}
