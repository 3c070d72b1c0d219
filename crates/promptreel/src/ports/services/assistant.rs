//! Prompt Assistant Port
//!
//! One strategy interface for every AI-assisted operation. Implementations:
//! the remote intermediary endpoint, a direct generative-service adapter,
//! and the local deterministic fallback.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::{
    CinematicElements, GeneratedPrompt, OptimizationResult, PromptAnalysis, PromptRequest,
    StoryExpansion,
};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::TargetModel;

/// Which strategy produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// Intermediary network endpoint
    Remote,
    /// Direct call to the generative service
    Direct,
    /// Deterministic local computation
    Local,
}

impl RouteKind {
    /// Local answers are degraded in quality
    pub fn is_degraded(&self) -> bool {
        matches!(self, RouteKind::Local)
    }
}

impl std::fmt::Display for RouteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteKind::Remote => write!(f, "remote"),
            RouteKind::Direct => write!(f, "direct"),
            RouteKind::Local => write!(f, "local"),
        }
    }
}

/// Strategy for AI-assisted prompt operations
#[async_trait]
pub trait PromptAssistant: Send + Sync {
    fn route(&self) -> RouteKind;

    /// Template-only render. Routes that cannot render report `Unavailable`.
    async fn render(&self, request: &PromptRequest) -> Result<GeneratedPrompt, DomainError> {
        let _ = request;
        Err(DomainError::unavailable(format!(
            "{} route does not render templates",
            self.route()
        )))
    }

    /// Idea completions for a partial input
    async fn suggestions(&self, input: &str) -> Result<Vec<String>, DomainError>;

    async fn analyze(&self, prompt: &str) -> Result<PromptAnalysis, DomainError>;

    async fn refine(&self, prompt: &str, model: &str) -> Result<String, DomainError>;

    async fn optimize(
        &self,
        idea: &str,
        model: TargetModel,
        current_prompt: Option<&str>,
    ) -> Result<OptimizationResult, DomainError>;

    /// Magic mode: one word to a full story
    async fn expand_word(
        &self,
        word: &str,
        model: TargetModel,
    ) -> Result<StoryExpansion, DomainError>;

    async fn story_variations(&self, story: &str, model: &str)
        -> Result<Vec<String>, DomainError>;

    async fn cinematic_elements(
        &self,
        story_context: &str,
        model: TargetModel,
    ) -> Result<CinematicElements, DomainError>;
}
