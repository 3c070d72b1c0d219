//! Domain Entities
//!
//! Value objects produced per request. Nothing here outlives the
//! request/response cycle except cached [`GeneratedPrompt`]s.

mod optimization;
mod prompt;
mod story;

pub use optimization::*;
pub use prompt::*;
pub use story::*;
