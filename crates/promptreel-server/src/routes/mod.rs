//! Promptreel API Routes
//!
//! - /api/prompt - Template-only render (rate limited, cached)
//! - /api/templates - Starter presets
//! - /api/suggestions, /api/analyze, /api/refine, /api/optimize - AI assistance
//! - /api/magic-story, /api/story-variations, /api/cinematic-elements - Magic mode

pub mod assist;
pub mod prompt;
pub mod story;
pub mod swagger;
