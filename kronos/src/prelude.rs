//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use kronos::prelude::*;
//! ```

pub use crate::chat::{
    ChatProvider, ChatRequest, ChatResponse, Choice, ChoiceMessage, SharedChatProvider, Usage,
};
pub use crate::error::{Error, LlmError, Result};
pub use crate::llms::{Kronos, KronosConfig};
pub use crate::outcome::{Outcome, to_line};
pub use crate::recipes::{FoodItem, Recipe, RecipeGenerator, fallback_recipes};
pub use crate::runner::Runner;
