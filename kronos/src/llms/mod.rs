//! Completion backend implementations.
//!
//! # Available Backends
//!
//! - [`kronos`] - Kronos Labs API (`hermes` and friends)

pub mod kronos;

pub use kronos::{Kronos, KronosConfig};
