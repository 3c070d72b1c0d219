//! Local Fallback - The route of last resort
//!
//! Every operation answers from templates, heuristics or the fallback story
//! library. Nothing here does I/O and nothing here fails except request
//! validation.

use async_trait::async_trait;

use crate::domain::entities::{
    CinematicElements, GeneratedPrompt, OptimizationResult, PromptAnalysis, PromptRequest,
    StoryExpansion,
};
use crate::domain::errors::DomainError;
use crate::domain::services::heuristics;
use crate::domain::services::{FallbackStoryLibrary, TemplateRenderer};
use crate::domain::value_objects::TargetModel;
use crate::ports::{PromptAssistant, RouteKind};

/// Deterministic [`PromptAssistant`]
#[derive(Debug, Clone, Default)]
pub struct LocalFallback {
    renderer: TemplateRenderer,
    library: FallbackStoryLibrary,
}

impl LocalFallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    pub fn library(&self) -> &FallbackStoryLibrary {
        &self.library
    }
}

#[async_trait]
impl PromptAssistant for LocalFallback {
    fn route(&self) -> RouteKind {
        RouteKind::Local
    }

    async fn render(&self, request: &PromptRequest) -> Result<GeneratedPrompt, DomainError> {
        Ok(self.renderer.render(request, &request.fragments.resolve()))
    }

    async fn suggestions(&self, input: &str) -> Result<Vec<String>, DomainError> {
        Ok(heuristics::fallback_suggestions(input))
    }

    async fn analyze(&self, prompt: &str) -> Result<PromptAnalysis, DomainError> {
        Ok(heuristics::fallback_analysis(prompt))
    }

    async fn refine(&self, prompt: &str, _model: &str) -> Result<String, DomainError> {
        Ok(prompt.to_string())
    }

    async fn optimize(
        &self,
        idea: &str,
        _model: TargetModel,
        _current_prompt: Option<&str>,
    ) -> Result<OptimizationResult, DomainError> {
        Ok(heuristics::fallback_optimization(idea))
    }

    async fn expand_word(
        &self,
        word: &str,
        model: TargetModel,
    ) -> Result<StoryExpansion, DomainError> {
        Ok(self.library.expand(word, model))
    }

    async fn story_variations(
        &self,
        _story: &str,
        _model: &str,
    ) -> Result<Vec<String>, DomainError> {
        Ok(Vec::new())
    }

    async fn cinematic_elements(
        &self,
        _story_context: &str,
        model: TargetModel,
    ) -> Result<CinematicElements, DomainError> {
        Ok(heuristics::fallback_cinematic_elements(model))
    }
}
