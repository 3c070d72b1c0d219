//! Story Routes - Magic mode and its companions

use axum::{extract::State, routing::post, Json, Router};

use crate::error::ApiResult;
use crate::models::{
    CinematicElementsRequest, CinematicElementsResponse, MagicStoryRequest, MagicStoryResponse,
    StoryVariationsRequest, StoryVariationsResponse,
};
use crate::extract::ApiJson;
use crate::AppState;

/// Expand one word into a story and the prompt rendered from it
#[utoipa::path(
    post,
    path = "/api/magic-story",
    request_body = MagicStoryRequest,
    responses(
        (status = 200, description = "Story and assembled prompt", body = MagicStoryResponse),
        (status = 400, description = "Word and model are required"),
        (status = 503, description = "Magic mode unavailable")
    ),
    tag = "Story"
)]
pub async fn magic_story(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<MagicStoryRequest>,
) -> ApiResult<Json<MagicStoryResponse>> {
    let routed = state.router.magic_story(&body.word, &body.model).await?;
    tracing::info!(word = %body.word, route = %routed.route, "🪄 Expanded magic story");
    Ok(Json(routed.into()))
}

/// Alternative takes on a story
#[utoipa::path(
    post,
    path = "/api/story-variations",
    request_body = StoryVariationsRequest,
    responses(
        (
            status = 200,
            description = "Story variations (empty when degraded)",
            body = StoryVariationsResponse
        ),
        (status = 400, description = "Story and model are required")
    ),
    tag = "Story"
)]
pub async fn story_variations(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<StoryVariationsRequest>,
) -> ApiResult<Json<StoryVariationsResponse>> {
    let routed = state
        .router
        .story_variations(&body.story, &body.model)
        .await?;
    Ok(Json(routed.into()))
}

/// Cinematic elements for a story context
#[utoipa::path(
    post,
    path = "/api/cinematic-elements",
    request_body = CinematicElementsRequest,
    responses(
        (status = 200, description = "Cinematic elements", body = CinematicElementsResponse),
        (status = 400, description = "Story context and model are required")
    ),
    tag = "Story"
)]
pub async fn cinematic_elements(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CinematicElementsRequest>,
) -> ApiResult<Json<CinematicElementsResponse>> {
    let routed = state
        .router
        .cinematic_elements(&body.story_context, &body.model)
        .await?;
    Ok(Json(routed.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/magic-story", post(magic_story))
        .route("/api/story-variations", post(story_variations))
        .route("/api/cinematic-elements", post(cinematic_elements))
}
