//! Promptreel API Models
//!
//! Request and response bodies for the `/api/*` endpoints. Domain types
//! (prompts, stories, analyses) are reused as-is; these add the request
//! shapes and the `note` field carried by degraded answers.

mod assist;
mod story;

pub use assist::*;
pub use story::*;

pub use promptreel::{
    CinematicElements, FragmentOverrides, GeneratedPrompt, OptimizationResult, PromptAnalysis,
    PromptPreset, PromptRequest, PromptSuggestion, StoryExpansion, TargetModel,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Template-only render request; fragment fields are optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GeneratePromptRequest {
    #[serde(default)]
    pub idea: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(flatten)]
    pub fragments: FragmentOverrides,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
    pub version: String,
    /// Whether a generative-service key is configured
    pub direct_adapter: bool,
}
