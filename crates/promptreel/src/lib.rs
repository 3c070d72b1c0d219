//! Promptreel Library
//!
//! Prompt assembly and adaptive delivery for video-generation models.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Requests, rendered prompts, stories, optimization results
//!   - `value_objects/`: Target models and style fragments
//!   - `services/`: Template renderer, starter presets, fallback story library, local heuristics
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `services/`: Generative service, prompt assistant, environment probe, clock
//!
//! - **Adapters** (`adapters/`): OpenAI client, direct assistant, local fallback
//!
//! - **Application** (`application/`): Request gate and environment router
//!
//! # Usage
//!
//! ```rust,ignore
//! use promptreel::{EnvironmentRouter, PromptRequest, StaticEnvironment};
//!
//! let router = EnvironmentRouter::new(Arc::new(StaticEnvironment::default()));
//! let prompt = router.render(&request).await?;
//! ```

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use adapters::{GenerativeAssistant, LocalFallback, OpenAiProvider};
pub use application::{
    EnvironmentRouter, GateConfig, GateStore, Operation, RequestGate, Routed,
    DEFAULT_ROUTE_TIMEOUT,
};
pub use domain::{
    find_preset, presets, CinematicElements, DomainError, FallbackStoryLibrary, Fragment,
    FragmentOverrides, GeneratedPrompt, MagicStory, OptimizationResult, PromptAnalysis,
    PromptPreset, PromptRequest, PromptSuggestion, StoryExpansion, StyleFragments, TargetModel,
    TemplateRenderer, MAX_IDEA_CHARS,
};
pub use ports::{
    ChatMessage,
    Clock,
    CompletionOptions,
    CompletionResponse,
    EnvironmentCapabilities,
    EnvironmentProbe,
    GenerativeService,
    MessageRole,
    PromptAssistant,
    RouteKind,
    StaticEnvironment,
    SystemClock,
    TokenUsage,
};
