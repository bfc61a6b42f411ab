//! Kronos Labs API client implementation.
//!
//! Supports non-streaming chat completions against
//! `https://api.kronoslabs.ai/v1/chat/completions`.

mod chat;
mod client;
mod config;
mod types;

pub use client::Kronos;
pub use config::KronosConfig;
