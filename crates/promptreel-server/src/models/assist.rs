//! AI-assisted operations: suggestions, analysis, refinement, optimization

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use promptreel::{OptimizationResult, PromptAnalysis, Routed};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SuggestionsRequest {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<Routed<Vec<String>>> for SuggestionsResponse {
    fn from(routed: Routed<Vec<String>>) -> Self {
        Self {
            suggestions: routed.value,
            note: routed.note,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub analysis: PromptAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<Routed<PromptAnalysis>> for AnalyzeResponse {
    fn from(routed: Routed<PromptAnalysis>) -> Self {
        Self {
            analysis: routed.value,
            note: routed.note,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RefineRequest {
    #[serde(default)]
    pub prompt: String,
    /// Target model name; unknown or missing names use the default model
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefineResponse {
    pub refined_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<Routed<String>> for RefineResponse {
    fn from(routed: Routed<String>) -> Self {
        Self {
            refined_prompt: routed.value,
            note: routed.note,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    #[serde(default)]
    pub idea: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub current_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OptimizeResponse {
    #[serde(flatten)]
    pub result: OptimizationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<Routed<OptimizationResult>> for OptimizeResponse {
    fn from(routed: Routed<OptimizationResult>) -> Self {
        Self {
            result: routed.value,
            note: routed.note,
        }
    }
}
