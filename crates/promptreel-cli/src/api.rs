//! Promptreel API Client
//!
//! `RemoteRoute` speaks to a Promptreel server and plugs into the
//! environment router as the remote strategy.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use promptreel::{
    CinematicElements, DomainError, GeneratedPrompt, OptimizationResult, PromptAnalysis,
    PromptAssistant, PromptRequest, RouteKind, StoryExpansion, TargetModel,
};

/// Retry hint used when a 429 carries no usable Retry-After header
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(10);

/// HTTP client for the Promptreel server endpoints
#[derive(Clone)]
pub struct RemoteRoute {
    client: Client,
    base_url: String,
}

impl RemoteRoute {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET /health
    pub async fn health(&self) -> Result<HealthInfo> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .context("Failed to connect to Promptreel server")?;

        if !response.status().is_success() {
            anyhow::bail!("Health check failed: {}", response.status());
        }

        response.json().await.context("Failed to parse health response")
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, DomainError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned + Degradable,
    {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::Timeout {
                        operation: path.to_string(),
                        elapsed: Duration::ZERO,
                    }
                } else {
                    DomainError::unavailable(format!("Failed to connect: {}", e))
                }
            })?;

        let response = check_status(response).await?;
        let payload: R = response
            .json()
            .await
            .map_err(|e| DomainError::InvalidResponse(e.to_string()))?;

        // The server already fell back; let the local chain try a better route.
        if let Some(note) = payload.note() {
            return Err(DomainError::unavailable(format!(
                "server answered in degraded mode: {}",
                note
            )));
        }

        Ok(payload)
    }
}

async fn check_status(response: Response) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RETRY_AFTER);
        return Err(DomainError::RateLimited { retry_after });
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);
    if status == StatusCode::BAD_REQUEST {
        return Err(DomainError::Validation(message));
    }
    Err(DomainError::ExternalService(format!(
        "Promptreel API error ({}): {}",
        status, message
    )))
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl PromptAssistant for RemoteRoute {
    fn route(&self) -> RouteKind {
        RouteKind::Remote
    }

    async fn render(&self, request: &PromptRequest) -> Result<GeneratedPrompt, DomainError> {
        let rendered: Rendered = self.post("/api/prompt", request).await?;
        Ok(rendered.0)
    }

    async fn suggestions(&self, input: &str) -> Result<Vec<String>, DomainError> {
        let response: SuggestionsResponse = self
            .post("/api/suggestions", &json!({ "input": input }))
            .await?;
        Ok(response.suggestions)
    }

    async fn analyze(&self, prompt: &str) -> Result<PromptAnalysis, DomainError> {
        let response: AnalyzeResponse = self
            .post("/api/analyze", &json!({ "prompt": prompt }))
            .await?;
        Ok(response.analysis)
    }

    async fn refine(&self, prompt: &str, model: &str) -> Result<String, DomainError> {
        let response: RefineResponse = self
            .post("/api/refine", &json!({ "prompt": prompt, "model": model }))
            .await?;
        Ok(response.refined_prompt)
    }

    async fn optimize(
        &self,
        idea: &str,
        model: TargetModel,
        current_prompt: Option<&str>,
    ) -> Result<OptimizationResult, DomainError> {
        let response: OptimizeResponse = self
            .post(
                "/api/optimize",
                &json!({
                    "idea": idea,
                    "model": model.as_str(),
                    "currentPrompt": current_prompt,
                }),
            )
            .await?;
        Ok(response.result)
    }

    async fn expand_word(
        &self,
        word: &str,
        model: TargetModel,
    ) -> Result<StoryExpansion, DomainError> {
        let response: MagicStoryResponse = self
            .post(
                "/api/magic-story",
                &json!({ "word": word, "model": model.as_str() }),
            )
            .await?;
        Ok(response.story)
    }

    async fn story_variations(&self, story: &str, model: &str) -> Result<Vec<String>, DomainError> {
        let response: StoryVariationsResponse = self
            .post(
                "/api/story-variations",
                &json!({ "story": story, "model": model }),
            )
            .await?;
        Ok(response.variations)
    }

    async fn cinematic_elements(
        &self,
        story_context: &str,
        model: TargetModel,
    ) -> Result<CinematicElements, DomainError> {
        let response: CinematicElementsResponse = self
            .post(
                "/api/cinematic-elements",
                &json!({ "storyContext": story_context, "model": model.as_str() }),
            )
            .await?;
        Ok(response.elements)
    }
}

// ============================================
// Response Types
// ============================================

/// Server responses that may carry a degraded-mode note
trait Degradable {
    fn note(&self) -> Option<&str> {
        None
    }
}

macro_rules! degradable {
    ($($name:ident),* $(,)?) => {
        $(impl Degradable for $name {
            fn note(&self) -> Option<&str> {
                self.note.as_deref()
            }
        })*
    };
}

#[derive(Debug, Deserialize)]
pub struct HealthInfo {
    pub status: String,
    pub version: String,
    #[serde(rename = "directAdapter", default)]
    pub direct_adapter: bool,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
#[serde(transparent)]
struct Rendered(GeneratedPrompt);

impl Degradable for Rendered {}

#[derive(Deserialize)]
struct SuggestionsResponse {
    suggestions: Vec<String>,
    note: Option<String>,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    #[serde(flatten)]
    analysis: PromptAnalysis,
    note: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefineResponse {
    refined_prompt: String,
    note: Option<String>,
}

#[derive(Deserialize)]
struct OptimizeResponse {
    #[serde(flatten)]
    result: OptimizationResult,
    note: Option<String>,
}

#[derive(Deserialize)]
struct MagicStoryResponse {
    story: StoryExpansion,
    note: Option<String>,
}

#[derive(Deserialize)]
struct StoryVariationsResponse {
    variations: Vec<String>,
    note: Option<String>,
}

#[derive(Deserialize)]
struct CinematicElementsResponse {
    #[serde(flatten)]
    elements: CinematicElements,
    note: Option<String>,
}

degradable!(
    SuggestionsResponse,
    AnalyzeResponse,
    RefineResponse,
    OptimizeResponse,
    MagicStoryResponse,
    StoryVariationsResponse,
    CinematicElementsResponse,
);

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::http::HeaderMap;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use promptreel::FragmentOverrides;
    use serde_json::Value;

    /// Serve a router on an ephemeral port and return its base URL
    pub(crate) async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn route_to(base_url: &str) -> RemoteRoute {
        RemoteRoute::new(base_url, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_suggestions_success() {
        let app = Router::new().route(
            "/api/suggestions",
            post(|Json(body): Json<Value>| async move {
                let input = body["input"].as_str().unwrap_or_default().to_string();
                Json(json!({ "suggestions": [format!("{} at dawn", input)] }))
            }),
        );
        let route = route_to(&serve(app).await);

        let suggestions = route.suggestions("a lighthouse").await.unwrap();
        assert_eq!(suggestions, vec!["a lighthouse at dawn".to_string()]);
    }

    #[tokio::test]
    async fn test_degraded_answer_is_unavailable() {
        let app = Router::new().route(
            "/api/analyze",
            post(|| async {
                Json(json!({
                    "score": 40,
                    "feedback": ["Good detail level"],
                    "note": "AI analysis unavailable, using basic evaluation"
                }))
            }),
        );
        let route = route_to(&serve(app).await);

        let err = route.analyze("a cat").await.unwrap_err();
        assert!(matches!(err, DomainError::Unavailable(ref m) if m.contains("basic evaluation")));
        assert!(!err.is_terminal());
    }

    #[tokio::test]
    async fn test_rate_limit_keeps_retry_after() {
        let app = Router::new().route(
            "/api/prompt",
            post(|| async {
                let mut headers = HeaderMap::new();
                headers.insert(header::RETRY_AFTER, "7".parse().unwrap());
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    headers,
                    Json(json!({ "message": "Too many requests" })),
                )
            }),
        );
        let route = route_to(&serve(app).await);
        let request = PromptRequest::new("a cat", "veo3", FragmentOverrides::default()).unwrap();

        let err = route.render(&request).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::RateLimited { retry_after } if retry_after == Duration::from_secs(7)
        ));
    }

    #[tokio::test]
    async fn test_render_sends_flat_request() {
        let app = Router::new().route(
            "/api/prompt",
            post(|Json(body): Json<Value>| async move {
                let idea = body["idea"].as_str().unwrap_or_default();
                let style = body["visualStyle"].as_str().unwrap_or("-");
                Json(json!({
                    "rawTemplate": "{idea}",
                    "assembledPrompt": format!("{} / {}", idea, style),
                }))
            }),
        );
        let route = route_to(&serve(app).await);
        let request = PromptRequest::new(
            "a cat",
            "pika",
            FragmentOverrides {
                visual_style: Some("noir".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let prompt = route.render(&request).await.unwrap();
        assert_eq!(prompt.assembled_prompt, "a cat / noir");
    }

    #[tokio::test]
    async fn test_bad_request_is_validation() {
        let app = Router::new().route(
            "/api/optimize",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "Invalid model" })),
                )
            }),
        );
        let route = route_to(&serve(app).await);

        let err = route
            .optimize("a cat", TargetModel::Veo3, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m == "Invalid model"));
    }

    #[tokio::test]
    async fn test_server_error_is_external() {
        let app = Router::new().route(
            "/api/story-variations",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let route = route_to(&serve(app).await);

        let err = route.story_variations("a story", "veo3").await.unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(ref m) if m.contains("upstream down")));
    }

    #[tokio::test]
    async fn test_health() {
        let app = Router::new().route(
            "/health",
            get(|| async {
                Json(json!({
                    "status": "ok",
                    "message": "running",
                    "version": "0.1.0",
                    "directAdapter": true
                }))
            }),
        );
        let route = route_to(&serve(app).await);

        let health = route.health().await.unwrap();
        assert_eq!(health.status, "ok");
        assert!(health.direct_adapter);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_not_terminal() {
        let route = route_to("http://127.0.0.1:9");
        let err = route.suggestions("a cat").await.unwrap_err();
        assert!(!err.is_terminal());
    }
}
