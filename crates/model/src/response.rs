/// The reason why a model response has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelFinishReason {
    /// The model has finished generating text.
    Stop,
    /// The output-token ceiling was hit.
    Length,
    /// The content was filtered by the provider.
    ContentFilter,
    /// Anything the provider reports that isn't listed above.
    Other,
}

/// A complete response from the model provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModelResponse {
    /// The generated text, `None` if the provider returned nothing.
    pub content: Option<String>,
    /// The reason the model finished generating, if reported.
    pub finish_reason: Option<ModelFinishReason>,
}
