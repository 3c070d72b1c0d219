//! Prompt Routes - Template-only render behind the request gate, plus starter presets

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};

use crate::error::{ApiError, ApiResult};
use crate::models::{GeneratePromptRequest, GeneratedPrompt, PromptPreset, PromptRequest};
use crate::extract::ApiJson;
use crate::AppState;

/// Caller identity: first `x-forwarded-for` hop, then `x-real-ip`.
fn caller_identity(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    forwarded
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        })
        .map(String::from)
}

fn validate(body: GeneratePromptRequest) -> ApiResult<PromptRequest> {
    let idea = body.idea.unwrap_or_default();
    if promptreel::domain::validate_idea(&idea).is_err() {
        return Err(ApiError::bad_request("Invalid input"));
    }
    let model = body.model.unwrap_or_default();
    PromptRequest::new(idea, &model, body.fragments)
        .map_err(|_| ApiError::bad_request("Invalid model"))
}

/// Render a prompt from an idea, a model and optional fragments
#[utoipa::path(
    post,
    path = "/api/prompt",
    request_body = GeneratePromptRequest,
    responses(
        (status = 200, description = "Assembled prompt", body = GeneratedPrompt),
        (status = 400, description = "Invalid input or model"),
        (status = 405, description = "Method not allowed"),
        (status = 429, description = "Rate limit exceeded")
    ),
    tag = "Prompt"
)]
pub async fn generate_prompt(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(body): ApiJson<GeneratePromptRequest>,
) -> ApiResult<Json<GeneratedPrompt>> {
    let request = validate(body)?;
    let caller = caller_identity(&headers);

    let prompt = state.gate.handle(caller.as_deref(), &request).await?;
    Ok(Json(prompt))
}

/// Named starter requests, ready to send to `/api/prompt`
#[utoipa::path(
    get,
    path = "/api/templates",
    responses(
        (status = 200, description = "Starter presets", body = Vec<PromptPreset>)
    ),
    tag = "Prompt"
)]
pub async fn list_templates() -> Json<Vec<PromptPreset>> {
    Json(promptreel::presets())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/prompt", post(generate_prompt))
        .route("/api/templates", get(list_templates))
}
