use serde::{Deserialize, Serialize};

/// The preset response for one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetResponse {
    /// The request succeeds with the given content. `None` emulates an
    /// upstream that answers without generating anything.
    #[serde(rename = "content")]
    Content(Option<String>),
    /// The request fails with a non-success status and a raw body.
    #[serde(rename = "status")]
    Status { status: u16, body: String },
    /// The request never reaches the upstream.
    #[serde(rename = "transport")]
    Transport(String),
}

impl PresetResponse {
    /// Creates a successful response with the given text.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::Content(Some(text.into()))
    }

    /// Creates a successful response without any content.
    #[inline]
    pub fn empty() -> Self {
        Self::Content(None)
    }

    /// Creates a failed response with the given status and body.
    #[inline]
    pub fn status<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}
