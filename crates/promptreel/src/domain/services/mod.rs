//! Domain Services
//!
//! Stateless domain logic: template rendering, starter presets, the offline
//! story library, and degraded-mode heuristics.

pub mod heuristics;
mod presets;
mod story_library;
mod template;

pub use presets::{find_preset, presets, PromptPreset};
pub use story_library::FallbackStoryLibrary;
pub use template::{Slot, Template, TemplateRenderer};
