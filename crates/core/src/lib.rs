//! Core pipeline of the travel assistant: conversation normalization,
//! conversational completions, and extraction of preferences and plans.

#[macro_use]
extern crate tracing;

mod assistant;
pub mod conversation;
mod error;
pub mod extraction;
pub mod instruction;
mod model_client;
pub mod sanitize;

pub use assistant::{Assistant, AssistantOptions};
pub use error::{Error, Result};
pub use extraction::{Extraction, Extractor, ExtractorOptions};
