//! Kronos - a one-shot chat completion runner for the Kronos Labs API.
//!
//! The crate is split along the seam between "what to ask" and "who answers":
//!
//! - [`chat`] defines the request/response types and the [`ChatProvider`]
//!   trait every completion backend implements.
//! - [`llms::kronos`] is the HTTP backend for `api.kronoslabs.ai`.
//! - [`runner`] performs a single request and flattens any failure into an
//!   [`Outcome`], which renders as exactly one line of JSON.
//! - [`recipes`] turns a kitchen inventory into recipes, falling back to
//!   built-in suggestions when the model cannot be reached.

pub mod chat;
pub mod error;
pub mod llms;
pub mod outcome;
pub mod prelude;
pub mod recipes;
pub mod runner;

pub use chat::ChatProvider;
pub use error::{Error, LlmError, Result};
pub use outcome::Outcome;
pub use runner::Runner;
