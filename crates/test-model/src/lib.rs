//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::future::ready;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use wayfarer_model::{
    ErrorKind, ModelFinishReason, ModelProvider, ModelRequest, ModelResponse,
};

pub use preset::*;

pub use wayfarer_model::ProviderError as Error;

#[derive(Default)]
struct Script {
    responses: VecDeque<PresetResponse>,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// model should respond to each request in order. Every request is recorded
/// so tests can inspect what the provider was asked. If there are no enough
/// responses in the script, an error will be returned.
///
/// Clones share the same script.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    script: Arc<Mutex<Script>>,
}

impl TestModelProvider {
    /// Creates a provider that answers with the given responses in order.
    #[inline]
    pub fn with_responses(
        responses: impl IntoIterator<Item = PresetResponse>,
    ) -> Self {
        let provider = Self::default();
        for response in responses {
            provider.add_response(response);
        }
        provider
    }

    #[inline]
    pub fn add_response(&self, preset: PresetResponse) {
        self.lock().responses.push_back(preset);
    }

    /// Returns all requests received so far.
    #[inline]
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.lock().requests.clone()
    }

    /// Returns the number of scripted responses not consumed yet.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.lock().responses.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let mut script = self.lock();
        script.requests.push(req.clone());

        let result = match script.responses.pop_front() {
            None => Err(Error::new("no enough responses", ErrorKind::Other)),
            Some(PresetResponse::Content(content)) => Ok(ModelResponse {
                content,
                finish_reason: Some(ModelFinishReason::Stop),
            }),
            Some(PresetResponse::Status { status, body }) => {
                Err(Error::with_status(body, status))
            }
            Some(PresetResponse::Transport(message)) => {
                Err(Error::new(message, ErrorKind::Transport))
            }
        };
        ready(result)
    }
}
