//! An abstraction layer for the completion endpoints.
//!
//! This crate establishes an unified protocol for the service to talk to
//! the upstream completion APIs, so that the conversational flow and the
//! extraction flow can each pick a different provider without touching
//! the core pipeline.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
#[cfg(feature = "http")]
pub mod http;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
