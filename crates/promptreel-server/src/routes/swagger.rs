//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    AnalyzeRequest,
    AnalyzeResponse,
    CinematicElements,
    CinematicElementsRequest,
    CinematicElementsResponse,
    FragmentOverrides,
    // Prompt models
    GeneratePromptRequest,
    GeneratedPrompt,
    HealthCheck,
    // Story models
    MagicStoryRequest,
    MagicStoryResponse,
    OptimizationResult,
    OptimizeRequest,
    OptimizeResponse,
    PromptAnalysis,
    PromptPreset,
    PromptSuggestion,
    RefineRequest,
    RefineResponse,
    StoryExpansion,
    StoryVariationsRequest,
    StoryVariationsResponse,
    // Assist models
    SuggestionsRequest,
    SuggestionsResponse,
    TargetModel,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Prompt endpoints
        super::prompt::generate_prompt,
        super::prompt::list_templates,
        // Assist endpoints
        super::assist::suggestions,
        super::assist::analyze,
        super::assist::refine,
        super::assist::optimize,
        // Story endpoints
        super::story::magic_story,
        super::story::story_variations,
        super::story::cinematic_elements,
    ),
    info(
        title = "Promptreel API",
        version = "0.1.0",
        description = "Prompt assembly and adaptive delivery for video-generation models.\n\nAI-assisted endpoints degrade to local answers with a `note` instead of failing.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (
            name = "Prompt",
            description = "Prompt - Template-only render, rate limited and cached; starter presets"
        ),
        (name = "Assist", description = "Assist - Suggestions, analysis, refinement, optimization"),
        (name = "Story", description = "Story - Magic mode, variations, cinematic elements"),
    ),
    components(
        schemas(
            // Prompt
            TargetModel,
            FragmentOverrides,
            GeneratePromptRequest,
            GeneratedPrompt,
            PromptPreset,
            HealthCheck,
            // Assist
            SuggestionsRequest,
            SuggestionsResponse,
            AnalyzeRequest,
            AnalyzeResponse,
            PromptAnalysis,
            RefineRequest,
            RefineResponse,
            OptimizeRequest,
            OptimizeResponse,
            OptimizationResult,
            PromptSuggestion,
            // Story
            MagicStoryRequest,
            MagicStoryResponse,
            StoryExpansion,
            StoryVariationsRequest,
            StoryVariationsResponse,
            CinematicElementsRequest,
            CinematicElementsResponse,
            CinematicElements,
        )
    )
)]
pub struct ApiDoc;
