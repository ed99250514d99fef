//! The travel assistant as an HTTP service.
//!
//! `POST /chat` carries the conversation, `POST /chat/summarize` turns a
//! finished conversation into preferences and three trip plans. Requests
//! are self-contained: the client sends the whole history every time.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod config;
mod error;
mod routes;
mod state;

pub use config::{Config, DEFAULT_BIND_ADDR};
pub use routes::router;
pub use state::AppState;
