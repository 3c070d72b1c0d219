//! Optimization - Quality analysis and optimization results

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An alternative prompt proposed during optimization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PromptSuggestion {
    pub prompt: String,
    /// 0-100
    pub score: u8,
    pub reasoning: String,
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// Result of optimizing an idea for a target model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub optimized_prompt: String,
    #[serde(default)]
    pub suggestions: Vec<PromptSuggestion>,
    /// 0-100
    pub quality_score: u8,
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// Quality score with feedback points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PromptAnalysis {
    /// 0-100
    pub score: u8,
    pub feedback: Vec<String>,
}
