use std::pin::Pin;
use std::sync::Arc;

use tracing::Instrument;
use wayfarer_model::{
    ModelProvider, ModelProviderError, ModelRequest, ModelResponse,
};

use crate::error::{Error, Result};

type BoxedSendRequestFuture = Pin<Box<dyn Future<Output = Result<String>> + Send>>;
type HandlerFn = Arc<dyn Fn(ModelRequest) -> BoxedSendRequestFuture + Send + Sync>;

/// A wrapper around a model provider that provides a type-erased interface
/// for the other modules.
///
/// Every call is one fresh round trip: there is no retry and no cache.
#[derive(Clone)]
pub struct ModelClient {
    handler_fn: HandlerFn,
}

impl ModelClient {
    #[inline]
    pub fn new<P: ModelProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `ModelClient` doesn't have a
        // generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.send_request(&req);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    let resp_or_err = fut.await;
                    handle_response::<P>(resp_or_err)
                }
                .instrument(trace_span!("model client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and returns the generated text, trimmed.
    ///
    /// # Cancel safety
    ///
    /// This method is cancel safe. Dropping the future drops the in-flight
    /// request with it.
    #[inline]
    pub async fn send_request(&self, req: ModelRequest) -> Result<String> {
        (self.handler_fn)(req).await
    }
}

fn handle_response<P: ModelProvider + 'static>(
    resp_or_err: Result<ModelResponse, P::Error>,
) -> Result<String> {
    let resp = match resp_or_err {
        Ok(resp) => resp,
        Err(err) => {
            error!("got an error ({}): {err:?}", err.kind());
            return Err(Error::Upstream {
                status: err.status(),
                detail: err.to_string(),
            });
        }
    };
    trace!("finished a request, finish reason: {:?}", resp.finish_reason);

    let text = resp.content.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        warn!("completion has no content");
        return Err(Error::EmptyCompletion);
    }
    Ok(text.to_owned())
}
