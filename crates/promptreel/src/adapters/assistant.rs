//! Generative Assistant - Direct route to the generative service
//!
//! Builds the instructions for each operation and holds the service to the
//! documented response shapes. Empty text, malformed JSON, or a JSON object
//! missing required fields are failures, never partial results.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::domain::entities::{
    CinematicElements, OptimizationResult, PromptAnalysis, StoryExpansion,
};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::TargetModel;
use crate::ports::{CompletionOptions, GenerativeService, PromptAssistant, RouteKind};

const FULL_MODEL: &str = "gpt-4o";
const MINI_MODEL: &str = "gpt-4o-mini";

/// Inputs shorter than this get no suggestions
const MIN_SUGGESTION_INPUT: usize = 3;

/// [`PromptAssistant`] backed by a [`GenerativeService`]
pub struct GenerativeAssistant {
    service: Arc<dyn GenerativeService>,
}

impl GenerativeAssistant {
    pub fn new(service: Arc<dyn GenerativeService>) -> Self {
        Self { service }
    }

    /// Name of the backing service, e.g. "openai"
    pub fn provider_name(&self) -> &str {
        self.service.provider_name()
    }

    async fn ask(
        &self,
        system: &str,
        user: &str,
        options: &CompletionOptions,
    ) -> Result<String, DomainError> {
        self.service
            .instruct(system, user, options)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    provider = self.provider_name(),
                    model = options.model.as_deref().unwrap_or("default"),
                    error = %e,
                    "Generative service call failed"
                );
            })
    }

    async fn instruct_json<T: DeserializeOwned>(
        &self,
        system: &str,
        user: &str,
        options: CompletionOptions,
    ) -> Result<T, DomainError> {
        let content = self.ask(system, user, &options.json()).await?;
        parse_json(&content)
    }

    async fn instruct_lines(
        &self,
        system: &str,
        user: &str,
        options: CompletionOptions,
        limit: usize,
    ) -> Result<Vec<String>, DomainError> {
        let content = self.ask(system, user, &options).await?;
        let lines = split_lines(&content, limit);
        if lines.is_empty() {
            return Err(DomainError::InvalidResponse(
                "Completion contained no usable lines".to_string(),
            ));
        }
        Ok(lines)
    }
}

#[async_trait]
impl PromptAssistant for GenerativeAssistant {
    fn route(&self) -> RouteKind {
        RouteKind::Direct
    }

    async fn suggestions(&self, input: &str) -> Result<Vec<String>, DomainError> {
        if input.chars().count() < MIN_SUGGESTION_INPUT {
            return Ok(Vec::new());
        }

        let system = "You are a creative AI that suggests video ideas. Given a partial input, suggest 5 creative, specific video concepts that complete or expand on the idea. Keep suggestions concise (under 15 words each).";
        let user = format!("Partial idea: \"{}\"", input);

        self.instruct_lines(system, &user, CompletionOptions::new(MINI_MODEL, 0.9, 200), 5)
            .await
    }

    async fn analyze(&self, prompt: &str) -> Result<PromptAnalysis, DomainError> {
        let system = r#"Analyze this video generation prompt and provide:
1. A quality score (0-100)
2. 3-5 specific feedback points

Focus on: clarity, specificity, visual appeal, technical accuracy, creativity.

Respond with JSON: {"score": 85, "feedback": ["point 1", "point 2"]}"#;

        let mut analysis: PromptAnalysis = self
            .instruct_json(system, prompt, CompletionOptions::new(MINI_MODEL, 0.3, 300))
            .await?;
        analysis.score = analysis.score.min(100);
        Ok(analysis)
    }

    async fn refine(&self, prompt: &str, model: &str) -> Result<String, DomainError> {
        let system = format!(
            "You are an expert prompt refiner for {} video generation. Take the given prompt and create 3 refined variations that:
1. Improve clarity and specificity
2. Enhance visual appeal
3. Add technical excellence

Return only the 3 refined prompts, one per line.",
            model.to_uppercase()
        );

        let refinements = self
            .instruct_lines(&system, prompt, CompletionOptions::new(FULL_MODEL, 0.7, 800), 3)
            .await?;
        refinements
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::InvalidResponse("No refinement returned".to_string()))
    }

    async fn optimize(
        &self,
        idea: &str,
        model: TargetModel,
        current_prompt: Option<&str>,
    ) -> Result<OptimizationResult, DomainError> {
        let name = model.as_str();
        let system = format!(
            r#"You are an expert AI video prompt engineer specializing in {upper} video generation.

Your task is to optimize video generation prompts for maximum quality and creativity. You understand:
- Technical requirements for {name}
- Visual storytelling principles
- Cinematic techniques
- Lighting and composition
- Camera movements and angles

Respond with a JSON object containing:
{{
  "optimizedPrompt": "The best possible prompt",
  "suggestions": [
    {{
      "prompt": "Alternative suggestion",
      "score": 95,
      "reasoning": "Why this works well",
      "improvements": ["specific improvement 1", "improvement 2"]
    }}
  ],
  "qualityScore": 95,
  "improvements": ["Key improvement areas"]
}}"#,
            upper = name.to_uppercase(),
        );

        let current = current_prompt
            .map(|p| format!("Current prompt: \"{}\"", p))
            .unwrap_or_default();
        let user = format!(
            "Video idea: \"{idea}\"\nTarget model: {name}\n{current}\n\nPlease optimize this for {name} and provide 3 alternative suggestions with quality scores."
        );

        let mut result: OptimizationResult = self
            .instruct_json(&system, &user, CompletionOptions::new(FULL_MODEL, 0.8, 2000))
            .await?;

        if result.optimized_prompt.trim().is_empty() {
            return Err(DomainError::InvalidResponse(
                "Optimization returned an empty prompt".to_string(),
            ));
        }
        result.quality_score = result.quality_score.min(100);
        for suggestion in &mut result.suggestions {
            suggestion.score = suggestion.score.min(100);
        }
        Ok(result)
    }

    async fn expand_word(
        &self,
        word: &str,
        model: TargetModel,
    ) -> Result<StoryExpansion, DomainError> {
        let upper = model.as_str().to_uppercase();
        let (audio_mode, audio_field) = if model.supports_native_audio() {
            (
                "native audio generation",
                "Dialogue, ambient sounds, and music with specific formatting",
            )
        } else {
            ("post-production audio", "Sound design and music description")
        };

        let system = format!(
            r#"You are an expert AI video story creator specializing in {upper} video generation. Your expertise includes:

- Google Veo 3 & Flow advanced prompting techniques
- Professional cinematography and filmmaking
- 8-second narrative storytelling
- Character consistency and visual continuity
- Advanced camera techniques (dolly zoom, rack focus, tracking shots, etc.)
- Audio-visual integration for {audio_mode}

{guidance}

From a single word, create a complete 8-second cinematic story concept. Think of professional film production - every element should work together to create a compelling narrative moment.

Respond with JSON containing:
{{
  "fullStory": "Complete 8-second story description",
  "visualStyle": "Specific visual aesthetic (e.g., 'cinematic realism', 'film noir', 'warm indie film')",
  "cameraMovement": "Professional camera technique (e.g., 'slow dolly zoom revealing character's realization', 'intimate handheld following movement')",
  "background": "Detailed environment description",
  "lightingMood": "Specific lighting setup and emotional tone",
  "audioCues": "{audio_field}",
  "colorPalette": "Specific color scheme that supports the story",
  "characterDetails": "Detailed character description for consistency",
  "actionSequence": "Specific 8-second action breakdown",
  "storyMood": "Overall emotional tone and narrative purpose"
}}"#,
            guidance = expansion_guidance(model),
        );

        let user = format!(
            r#"Create a complete 8-second cinematic story from this single word: "{word}"

The story should be:
- Emotionally engaging and visually compelling
- Feasible to shoot in 8 seconds
- Rich in cinematic detail
- Optimized for {upper} generation
- Professional film quality

Be creative and imaginative - take the word in an unexpected but meaningful direction that creates a memorable moment."#
        );

        let story: StoryExpansion = self
            .instruct_json(&system, &user, CompletionOptions::new(FULL_MODEL, 0.8, 1500))
            .await?;

        if !story.is_usable() {
            return Err(DomainError::InvalidResponse(
                "Story expansion has no story".to_string(),
            ));
        }
        Ok(story)
    }

    async fn story_variations(
        &self,
        story: &str,
        model: &str,
    ) -> Result<Vec<String>, DomainError> {
        let system = format!(
            "You are a creative story developer. Take the given story concept and create 3 alternative interpretations of the same concept. Each should be:
- Equally engaging but different in approach
- Suitable for 8-second video generation
- Optimized for {}
- Creative and unexpected

Return only the 3 story variations, one per line.",
            model.to_uppercase()
        );

        self.instruct_lines(&system, story, CompletionOptions::new(MINI_MODEL, 0.9, 600), 3)
            .await
    }

    async fn cinematic_elements(
        &self,
        story_context: &str,
        model: TargetModel,
    ) -> Result<CinematicElements, DomainError> {
        let system = format!(
            r#"You are a professional cinematographer and video prompt engineer specializing in {upper}.

Based on a story context, generate optimal cinematic elements using current best practices:
{guidance}
Respond with JSON:
{{
  "visualStyle": "Specific aesthetic approach",
  "cameraMovement": "Professional camera technique",
  "background": "Detailed environment",
  "lightingMood": "Lighting setup and emotional tone",
  "audioCues": "Audio design and music",
  "colorPalette": "Color scheme supporting the narrative"
}}"#,
            upper = model.as_str().to_uppercase(),
            guidance = element_guidance(model),
        );
        let user = format!("Story context: {}", story_context);

        self.instruct_json(&system, &user, CompletionOptions::new(MINI_MODEL, 0.7, 800))
            .await
    }
}

fn expansion_guidance(model: TargetModel) -> &'static str {
    match model {
        TargetModel::Veo3 => "Focus on 8-second narratives with native audio integration. Include dialogue formatting: \"Character says: 'dialogue content'\". Emphasize realistic physics, character consistency, and cinematic audio (dialogue, ambient sounds, music). Consider camera positioning explicitly rather than generic viewpoints.",
        TargetModel::Flow => "Emphasize cinematic filmmaking techniques. Use ingredients-based approach with modular elements. Focus on professional cinematography, advanced camera movements (dolly zoom, rack focus, tracking shots), and scene building. Think like a professional filmmaker.",
        TargetModel::Runway => "Create visually striking content optimized for RunwayML's capabilities. Focus on strong visual concepts and clear motion.",
        TargetModel::Pika => "Design content optimized for Pika Labs with emphasis on creative visual effects and engaging motion.",
    }
}

fn element_guidance(model: TargetModel) -> String {
    match model {
        TargetModel::Veo3 => "
- Use native audio integration techniques
- Include specific dialogue formatting: \"Character speaking to camera saying: 'dialogue'\"
- Specify camera positioning explicitly
- Add \"(no subtitles)\" to prevent text overlay
- Include ambient sounds and music descriptions
"
        .to_string(),
        TargetModel::Flow => "
- Think like a professional filmmaker
- Use advanced cinematic language (match cut, jump cut, establishing shot)
- Emphasize modular ingredient-based composition
- Include sophisticated camera movements (vertigo effect, rack focus)
"
        .to_string(),
        other => format!(
            "
- Focus on strong visual concepts for {}
- Optimize for platform-specific capabilities
",
            other.as_str()
        ),
    }
}

/// Parse a single JSON object, tolerating a surrounding markdown fence.
fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, DomainError> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(body)
        .map_err(|e| DomainError::InvalidResponse(format!("Malformed JSON response: {}", e)))
}

/// Non-empty trimmed lines, at most `limit`
fn split_lines(content: &str, limit: usize) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(limit)
        .map(String::from)
        .collect()
}
