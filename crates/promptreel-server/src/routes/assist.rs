//! Assist Routes - Suggestions, analysis, refinement and optimization
//!
//! These never fail because the generative service is down: the router
//! degrades to a local answer and the response carries a `note`.

use axum::{extract::State, routing::post, Json, Router};

use crate::error::ApiResult;
use crate::models::{
    AnalyzeRequest, AnalyzeResponse, OptimizeRequest, OptimizeResponse, RefineRequest,
    RefineResponse, SuggestionsRequest, SuggestionsResponse,
};
use crate::extract::ApiJson;
use crate::AppState;

/// Idea completions for a partial input
#[utoipa::path(
    post,
    path = "/api/suggestions",
    request_body = SuggestionsRequest,
    responses(
        (
            status = 200,
            description = "Suggestions (empty for inputs under two characters)",
            body = SuggestionsResponse
        )
    ),
    tag = "Assist"
)]
pub async fn suggestions(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SuggestionsRequest>,
) -> ApiResult<Json<SuggestionsResponse>> {
    let routed = state.router.suggestions(&body.input).await?;
    tracing::info!(
        count = routed.value.len(),
        route = %routed.route,
        "💡 Generated suggestions"
    );
    Ok(Json(routed.into()))
}

/// Score a prompt and list feedback points
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Quality analysis", body = AnalyzeResponse),
        (status = 400, description = "Missing prompt")
    ),
    tag = "Assist"
)]
pub async fn analyze(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let routed = state.router.analyze(&body.prompt).await?;
    tracing::info!(score = routed.value.score, route = %routed.route, "🔎 Analyzed prompt");
    Ok(Json(routed.into()))
}

/// Refine a prompt for a target model
#[utoipa::path(
    post,
    path = "/api/refine",
    request_body = RefineRequest,
    responses(
        (
            status = 200,
            description = "Refined prompt (the original when degraded)",
            body = RefineResponse
        ),
        (status = 400, description = "Missing prompt")
    ),
    tag = "Assist"
)]
pub async fn refine(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RefineRequest>,
) -> ApiResult<Json<RefineResponse>> {
    let model = body.model.as_deref().unwrap_or_default();
    let routed = state.router.refine(&body.prompt, model).await?;
    tracing::info!(
        original_len = body.prompt.len(),
        refined_len = routed.value.len(),
        route = %routed.route,
        "✨ Refined prompt"
    );
    Ok(Json(routed.into()))
}

/// Optimize an idea for a target model
#[utoipa::path(
    post,
    path = "/api/optimize",
    request_body = OptimizeRequest,
    responses(
        (status = 200, description = "Optimization result", body = OptimizeResponse),
        (status = 400, description = "Missing idea or invalid model")
    ),
    tag = "Assist"
)]
pub async fn optimize(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<OptimizeRequest>,
) -> ApiResult<Json<OptimizeResponse>> {
    let routed = state
        .router
        .optimize(&body.idea, &body.model, body.current_prompt.as_deref())
        .await?;
    tracing::info!(
        quality_score = routed.value.quality_score,
        suggestions = routed.value.suggestions.len(),
        route = %routed.route,
        "🚀 Optimized prompt"
    );
    Ok(Json(routed.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/suggestions", post(suggestions))
        .route("/api/analyze", post(analyze))
        .route("/api/refine", post(refine))
        .route("/api/optimize", post(optimize))
}
