//! Environment Router - Picks a delivery route per operation
//!
//! The probe is consulted on every call, giving a chain of
//! remote → direct → local. Remote and direct attempts are bounded by a
//! per-attempt timeout; the local route always answers.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::adapters::LocalFallback;
use crate::domain::entities::{
    CinematicElements, GeneratedPrompt, MagicStory, OptimizationResult, PromptAnalysis,
    PromptRequest,
};
use crate::domain::errors::DomainError;
use crate::domain::services::TemplateRenderer;
use crate::domain::value_objects::TargetModel;
use crate::ports::{EnvironmentProbe, PromptAssistant, RouteKind};

/// Default bound on a single remote or direct attempt
pub const DEFAULT_ROUTE_TIMEOUT: Duration = Duration::from_secs(15);

/// Inputs shorter than this get an empty suggestion list
const MIN_SUGGESTION_INPUT: usize = 2;

/// Logical operations the router dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Render,
    Suggestions,
    Analyze,
    Refine,
    Optimize,
    MagicStory,
    StoryVariations,
    CinematicElements,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Render => "render",
            Operation::Suggestions => "suggestions",
            Operation::Analyze => "analyze",
            Operation::Refine => "refine",
            Operation::Optimize => "optimize",
            Operation::MagicStory => "magic_story",
            Operation::StoryVariations => "story_variations",
            Operation::CinematicElements => "cinematic_elements",
        }
    }

    /// Explanation attached to a locally computed answer
    pub fn degraded_note(&self) -> &'static str {
        match self {
            Operation::Render => "Prompt service unreachable, rendered locally",
            Operation::Suggestions => "AI suggestions unavailable, using fallback",
            Operation::Analyze => "AI analysis unavailable, using basic evaluation",
            Operation::Refine => "AI refinement unavailable, returning the original prompt",
            Operation::Optimize => "AI optimization unavailable, using basic template",
            Operation::MagicStory => "AI story expansion unavailable, using the offline story library",
            Operation::StoryVariations => "AI story variations unavailable",
            Operation::CinematicElements => "AI cinematic elements unavailable, using defaults",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A result plus the route that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Routed<T> {
    pub value: T,
    pub route: RouteKind,
    /// Set when a degraded route answered
    pub note: Option<String>,
}

impl<T> Routed<T> {
    fn new(value: T, route: RouteKind, operation: Operation) -> Self {
        let note = route
            .is_degraded()
            .then(|| operation.degraded_note().to_string());
        Self { value, route, note }
    }

    pub fn is_degraded(&self) -> bool {
        self.route.is_degraded()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Routed<U> {
        Routed {
            value: f(self.value),
            route: self.route,
            note: self.note,
        }
    }
}

pub struct EnvironmentRouter {
    probe: Arc<dyn EnvironmentProbe>,
    remote: Option<Arc<dyn PromptAssistant>>,
    direct: Option<Arc<dyn PromptAssistant>>,
    local: Arc<LocalFallback>,
    renderer: TemplateRenderer,
    timeout: Duration,
}

impl EnvironmentRouter {
    pub fn new(probe: Arc<dyn EnvironmentProbe>) -> Self {
        let local = LocalFallback::new();
        Self {
            probe,
            remote: None,
            direct: None,
            renderer: local.renderer().clone(),
            local: Arc::new(local),
            timeout: DEFAULT_ROUTE_TIMEOUT,
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn PromptAssistant>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_direct(mut self, direct: Arc<dyn PromptAssistant>) -> Self {
        self.direct = Some(direct);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Routes to try for this call, in order. Local is always last.
    async fn chain(&self, include_direct: bool) -> Vec<Arc<dyn PromptAssistant>> {
        let capabilities = self.probe.probe().await;
        let mut chain: Vec<Arc<dyn PromptAssistant>> = Vec::with_capacity(3);

        if capabilities.remote_endpoint {
            if let Some(remote) = &self.remote {
                chain.push(Arc::clone(remote));
            }
        }
        if include_direct && capabilities.direct_credentials {
            if let Some(direct) = &self.direct {
                chain.push(Arc::clone(direct));
            }
        }
        chain.push(self.local.clone());
        chain
    }

    /// Run one bounded attempt on a non-local route.
    async fn attempt<T, Fut>(
        &self,
        operation: Operation,
        route: RouteKind,
        call: Fut,
    ) -> Result<T, DomainError>
    where
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let started = Instant::now();
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::Timeout {
                operation: format!("{} via {}", operation, route),
                elapsed: started.elapsed(),
            }),
        }
    }

    /// Walk the route chain until one answers.
    ///
    /// Terminal errors stop the walk; everything else is logged and the next
    /// route is tried.
    async fn dispatch<T, F, Fut>(
        &self,
        operation: Operation,
        include_direct: bool,
        call: F,
    ) -> Result<Routed<T>, DomainError>
    where
        F: Fn(Arc<dyn PromptAssistant>) -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        for route in self.chain(include_direct).await {
            let kind = route.route();

            if kind == RouteKind::Local {
                let value = call(route).await?;
                tracing::info!(operation = %operation, route = %kind, "Answered locally");
                return Ok(Routed::new(value, kind, operation));
            }

            match self.attempt(operation, kind, call(route)).await {
                Ok(value) => {
                    tracing::debug!(operation = %operation, route = %kind, "Route answered");
                    return Ok(Routed::new(value, kind, operation));
                }
                Err(e) if e.is_terminal() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        operation = %operation,
                        route = %kind,
                        error = %e,
                        "Route failed, falling back"
                    );
                }
            }
        }

        Err(DomainError::unavailable(format!(
            "No route answered {}",
            operation
        )))
    }

    /// Template-only render: remote endpoint when reachable, otherwise local.
    ///
    /// A rate-limit rejection from the remote reaches the caller.
    pub async fn render(
        &self,
        request: &PromptRequest,
    ) -> Result<Routed<GeneratedPrompt>, DomainError> {
        self.dispatch(Operation::Render, false, move |route| async move {
            route.render(request).await
        })
        .await
    }

    /// Render in-process, bypassing every route
    pub fn render_local(&self, request: &PromptRequest) -> GeneratedPrompt {
        self.renderer.render(request, &request.fragments.resolve())
    }

    pub async fn suggestions(&self, input: &str) -> Result<Routed<Vec<String>>, DomainError> {
        let input = input.trim();
        if input.chars().count() < MIN_SUGGESTION_INPUT {
            return Ok(Routed {
                value: Vec::new(),
                route: RouteKind::Local,
                note: None,
            });
        }

        self.dispatch(Operation::Suggestions, true, move |route| async move {
            route.suggestions(input).await
        })
        .await
    }

    pub async fn analyze(&self, prompt: &str) -> Result<Routed<PromptAnalysis>, DomainError> {
        let prompt = required(prompt, "prompt")?;
        self.dispatch(Operation::Analyze, true, move |route| async move {
            route.analyze(prompt).await
        })
        .await
    }

    pub async fn refine(&self, prompt: &str, model: &str) -> Result<Routed<String>, DomainError> {
        let prompt = required(prompt, "prompt")?;
        let model = TargetModel::parse_or_fallback(model);
        self.dispatch(Operation::Refine, true, move |route| async move {
            route.refine(prompt, model.as_str()).await
        })
        .await
    }

    pub async fn optimize(
        &self,
        idea: &str,
        model: &str,
        current_prompt: Option<&str>,
    ) -> Result<Routed<OptimizationResult>, DomainError> {
        let idea = required(idea, "idea")?;
        let model = model
            .parse::<TargetModel>()
            .map_err(|_| DomainError::UnknownModel(model.to_string()))?;
        let current_prompt = current_prompt.map(str::trim).filter(|p| !p.is_empty());

        self.dispatch(Operation::Optimize, true, move |route| async move {
            route.optimize(idea, model, current_prompt).await
        })
        .await
    }

    /// Magic mode: expand a word into a story and render it.
    ///
    /// Unknown model names render with [`TargetModel::FALLBACK`].
    pub async fn magic_story(
        &self,
        word: &str,
        model: &str,
    ) -> Result<Routed<MagicStory>, DomainError> {
        let word = required(word, "word")?;
        required(model, "model")?;
        let model = TargetModel::parse_or_fallback(model);

        let routed = self
            .dispatch(Operation::MagicStory, true, move |route| async move {
                let story = route.expand_word(word, model).await?;
                if !story.is_usable() {
                    return Err(DomainError::InvalidResponse(format!(
                        "{} route returned an empty story",
                        route.route()
                    )));
                }
                Ok(story)
            })
            .await
            .map_err(|e| match e {
                DomainError::Validation(_) | DomainError::RateLimited { .. } => e,
                other => DomainError::MagicModeUnavailable(other.to_string()),
            })?;

        let renderer = &self.renderer;
        Ok(routed.map(|story| {
            let fragments = story.fragment_overrides(model).resolve();
            let prompt = renderer.render_for(model, &story.full_story, &fragments);
            MagicStory { story, prompt }
        }))
    }

    pub async fn story_variations(
        &self,
        story: &str,
        model: &str,
    ) -> Result<Routed<Vec<String>>, DomainError> {
        let story = required(story, "story")?;
        let model = required(model, "model")?;
        self.dispatch(Operation::StoryVariations, true, move |route| async move {
            route.story_variations(story, model).await
        })
        .await
    }

    pub async fn cinematic_elements(
        &self,
        story_context: &str,
        model: &str,
    ) -> Result<Routed<CinematicElements>, DomainError> {
        let story_context = required(story_context, "storyContext")?;
        required(model, "model")?;
        let model = TargetModel::parse_or_fallback(model);
        self.dispatch(Operation::CinematicElements, true, move |route| async move {
            route.cinematic_elements(story_context, model).await
        })
        .await
    }
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::StoryExpansion;
    use crate::domain::value_objects::FragmentOverrides;
    use crate::ports::{EnvironmentCapabilities, StaticEnvironment};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy)]
    enum Behavior {
        Answer,
        Fail,
        RateLimit,
        Hang,
    }

    /// Route double that answers, fails or hangs, counting calls
    struct MockRoute {
        kind: RouteKind,
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl MockRoute {
        fn new(kind: RouteKind, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                kind,
                behavior,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn respond<T>(&self, value: T) -> Result<T, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Answer => Ok(value),
                Behavior::Fail => Err(DomainError::ExternalService("boom".to_string())),
                Behavior::RateLimit => Err(DomainError::RateLimited {
                    retry_after: Duration::from_secs(3),
                }),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(value)
                }
            }
        }
    }

    fn story(full_story: &str) -> StoryExpansion {
        let mut story = LocalFallback::new().library().expand("lantern", TargetModel::Flow);
        story.full_story = full_story.to_string();
        story
    }

    #[async_trait]
    impl PromptAssistant for MockRoute {
        fn route(&self) -> RouteKind {
            self.kind
        }

        async fn render(&self, request: &PromptRequest) -> Result<GeneratedPrompt, DomainError> {
            self.respond(GeneratedPrompt {
                raw_template: String::new(),
                assembled_prompt: format!("{} from {}", request.idea, self.kind),
            })
            .await
        }

        async fn suggestions(&self, input: &str) -> Result<Vec<String>, DomainError> {
            self.respond(vec![format!("{} from {}", input, self.kind)]).await
        }

        async fn analyze(&self, _prompt: &str) -> Result<PromptAnalysis, DomainError> {
            self.respond(PromptAnalysis {
                score: 91,
                feedback: vec!["vivid".to_string()],
            })
            .await
        }

        async fn refine(&self, prompt: &str, _model: &str) -> Result<String, DomainError> {
            self.respond(format!("{} (refined)", prompt)).await
        }

        async fn optimize(
            &self,
            idea: &str,
            _model: TargetModel,
            _current_prompt: Option<&str>,
        ) -> Result<OptimizationResult, DomainError> {
            self.respond(OptimizationResult {
                optimized_prompt: format!("optimized {}", idea),
                suggestions: Vec::new(),
                quality_score: 93,
                improvements: Vec::new(),
            })
            .await
        }

        async fn expand_word(
            &self,
            word: &str,
            _model: TargetModel,
        ) -> Result<StoryExpansion, DomainError> {
            self.respond(story(&format!("A story about {}", word))).await
        }

        async fn story_variations(
            &self,
            story: &str,
            _model: &str,
        ) -> Result<Vec<String>, DomainError> {
            self.respond(vec![format!("{} again", story)]).await
        }

        async fn cinematic_elements(
            &self,
            _story_context: &str,
            _model: TargetModel,
        ) -> Result<CinematicElements, DomainError> {
            let mut elements = crate::domain::services::heuristics::fallback_cinematic_elements(
                TargetModel::Flow,
            );
            elements.visual_style = format!("{} style", self.kind);
            self.respond(elements).await
        }
    }

    fn probe(remote_endpoint: bool, direct_credentials: bool) -> Arc<dyn EnvironmentProbe> {
        Arc::new(StaticEnvironment::new(EnvironmentCapabilities {
            remote_endpoint,
            direct_credentials,
        }))
    }

    fn request(idea: &str, model: &str) -> PromptRequest {
        PromptRequest::new(idea, model, FragmentOverrides::default()).unwrap()
    }

    #[tokio::test]
    async fn test_remote_answers_first() {
        let remote = MockRoute::new(RouteKind::Remote, Behavior::Answer);
        let direct = MockRoute::new(RouteKind::Direct, Behavior::Answer);
        let router = EnvironmentRouter::new(probe(true, true))
            .with_remote(remote.clone())
            .with_direct(direct.clone());

        let routed = router.suggestions("a cat").await.unwrap();
        assert_eq!(routed.route, RouteKind::Remote);
        assert_eq!(routed.value, vec!["a cat from remote"]);
        assert!(routed.note.is_none());
        assert_eq!(direct.calls(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_direct() {
        let remote = MockRoute::new(RouteKind::Remote, Behavior::Fail);
        let direct = MockRoute::new(RouteKind::Direct, Behavior::Answer);
        let router = EnvironmentRouter::new(probe(true, true))
            .with_remote(remote.clone())
            .with_direct(direct.clone());

        let routed = router.analyze("a prompt").await.unwrap();
        assert_eq!(routed.route, RouteKind::Direct);
        assert_eq!(routed.value.score, 91);
        assert_eq!(remote.calls(), 1);
    }

    #[tokio::test]
    async fn test_everything_down_degrades_locally() {
        let remote = MockRoute::new(RouteKind::Remote, Behavior::Fail);
        let direct = MockRoute::new(RouteKind::Direct, Behavior::Fail);
        let router = EnvironmentRouter::new(probe(true, true))
            .with_remote(remote)
            .with_direct(direct);

        let suggestions = router.suggestions("a cat").await.unwrap();
        assert_eq!(suggestions.route, RouteKind::Local);
        assert_eq!(suggestions.value[0], "a cat in cinematic style");
        assert_eq!(
            suggestions.note.as_deref(),
            Some("AI suggestions unavailable, using fallback")
        );

        let refined = router.refine("keep this", "veo3").await.unwrap();
        assert_eq!(refined.value, "keep this");
        assert!(refined.is_degraded());

        let optimized = router.optimize("a kite", "pika", None).await.unwrap();
        assert_eq!(optimized.value.quality_score, 75);

        let variations = router.story_variations("a story", "flow").await.unwrap();
        assert!(variations.value.is_empty());
    }

    #[tokio::test]
    async fn test_static_build_skips_remote() {
        let remote = MockRoute::new(RouteKind::Remote, Behavior::Answer);
        let router = EnvironmentRouter::new(probe(false, false)).with_remote(remote.clone());

        let routed = router.cinematic_elements("a quiet harbor", "veo3").await.unwrap();
        assert_eq!(routed.route, RouteKind::Local);
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_credentials_skip_direct() {
        let direct = MockRoute::new(RouteKind::Direct, Behavior::Answer);
        let router = EnvironmentRouter::new(probe(false, false)).with_direct(direct.clone());

        let routed = router.analyze("a prompt").await.unwrap();
        assert_eq!(routed.route, RouteKind::Local);
        assert_eq!(direct.calls(), 0);
    }

    #[tokio::test]
    async fn test_hung_route_times_out() {
        let remote = MockRoute::new(RouteKind::Remote, Behavior::Hang);
        let router = EnvironmentRouter::new(probe(true, false))
            .with_remote(remote)
            .with_timeout(Duration::from_millis(20));

        let started = Instant::now();
        let routed = router.suggestions("a cat").await.unwrap();
        assert_eq!(routed.route, RouteKind::Local);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_render_prefers_remote_and_skips_direct() {
        let remote = MockRoute::new(RouteKind::Remote, Behavior::Fail);
        let direct = MockRoute::new(RouteKind::Direct, Behavior::Answer);
        let router = EnvironmentRouter::new(probe(true, true))
            .with_remote(remote.clone())
            .with_direct(direct.clone());

        let req = request("a futuristic city", "runway");
        let routed = router.render(&req).await.unwrap();
        assert_eq!(routed.route, RouteKind::Local);
        assert_eq!(routed.value, router.render_local(&req));
        assert_eq!(remote.calls(), 1);
        assert_eq!(direct.calls(), 0);
    }

    #[tokio::test]
    async fn test_render_surfaces_rate_limit() {
        let remote = MockRoute::new(RouteKind::Remote, Behavior::RateLimit);
        let router = EnvironmentRouter::new(probe(true, false)).with_remote(remote);

        let err = router.render(&request("a cat", "veo3")).await.unwrap_err();
        assert!(matches!(err, DomainError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_short_suggestion_input_is_empty() {
        let remote = MockRoute::new(RouteKind::Remote, Behavior::Answer);
        let router = EnvironmentRouter::new(probe(true, false)).with_remote(remote.clone());

        let routed = router.suggestions("a").await.unwrap();
        assert!(routed.value.is_empty());
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn test_validation_happens_before_routing() {
        let router = EnvironmentRouter::new(probe(false, false));
        assert!(matches!(
            router.analyze("   ").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            router.optimize("a kite", "sora", None).await,
            Err(DomainError::UnknownModel(_))
        ));
        assert!(matches!(
            router.magic_story("", "veo3").await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_magic_story_falls_back_to_library() {
        let remote = MockRoute::new(RouteKind::Remote, Behavior::Fail);
        let router = EnvironmentRouter::new(probe(true, false)).with_remote(remote);

        let routed = router.magic_story("cat", "veo3").await.unwrap();
        assert_eq!(routed.route, RouteKind::Local);
        assert!(routed.value.story.full_story.contains("tabby cat"));
        assert!(routed
            .value
            .prompt
            .assembled_prompt
            .contains("Negative Prompts: blurry, low-quality, subtitles, text overlay."));
        assert!(routed
            .value
            .prompt
            .assembled_prompt
            .contains(&routed.value.story.full_story));
    }

    #[tokio::test]
    async fn test_magic_story_renders_remote_story() {
        let remote = MockRoute::new(RouteKind::Remote, Behavior::Answer);
        let router = EnvironmentRouter::new(probe(true, false)).with_remote(remote);

        let routed = router.magic_story("comet", "unknown-model").await.unwrap();
        assert_eq!(routed.route, RouteKind::Remote);
        assert_eq!(routed.value.story.full_story, "A story about comet");
        assert!(routed
            .value
            .prompt
            .assembled_prompt
            .contains("Create a video about A story about comet."));
        assert!(routed
            .value
            .prompt
            .assembled_prompt
            .contains("Avoid the following: blurry, low-quality, cartoonish."));
    }

    #[tokio::test]
    async fn test_probe_is_consulted_per_call() {
        struct FlippingProbe(AtomicUsize);

        #[async_trait]
        impl EnvironmentProbe for FlippingProbe {
            async fn probe(&self) -> EnvironmentCapabilities {
                let n = self.0.fetch_add(1, Ordering::SeqCst);
                EnvironmentCapabilities {
                    remote_endpoint: n % 2 == 0,
                    direct_credentials: false,
                }
            }
        }

        let remote = MockRoute::new(RouteKind::Remote, Behavior::Answer);
        let router = EnvironmentRouter::new(Arc::new(FlippingProbe(AtomicUsize::new(0))))
            .with_remote(remote);

        assert_eq!(router.analyze("p").await.unwrap().route, RouteKind::Remote);
        assert_eq!(router.analyze("p").await.unwrap().route, RouteKind::Local);
        assert_eq!(router.analyze("p").await.unwrap().route, RouteKind::Remote);
    }
}
