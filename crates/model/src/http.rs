//! The response handling shared by providers that talk JSON over HTTP.

use mime::Mime;
use reqwest::{RequestBuilder, header};

use crate::{ErrorKind, ProviderError};

/// Sends `req` and returns the body of a successful JSON response.
///
/// A non-success status is returned as [`ProviderError::with_status`]
/// carrying the raw body. A response without a content type is let
/// through, some compatible servers omit it.
pub async fn send_json(req: RequestBuilder) -> Result<String, ProviderError> {
    let resp = req.send().await.map_err(transport)?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ProviderError::with_status(body, status.as_u16()));
    }

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap_or_default().to_owned());
    if !content_type.as_deref().is_none_or(is_json) {
        return Err(ProviderError::new(
            format!("Unexpected content type: {content_type:?}"),
            ErrorKind::InvalidResponse,
        ));
    }

    resp.text().await.map_err(transport)
}

/// Returns whether a `Content-Type` value names a JSON media type.
pub fn is_json(content_type: &str) -> bool {
    content_type.parse::<Mime>().is_ok_and(|m| {
        m.subtype() == mime::JSON || m.suffix().is_some_and(|s| s == mime::JSON)
    })
}

fn transport(err: reqwest::Error) -> ProviderError {
    ProviderError::new(err.to_string(), ErrorKind::Transport)
}
