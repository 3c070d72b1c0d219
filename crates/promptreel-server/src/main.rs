use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod extract;
mod models;
mod routes;

use config::ServerConfig;
use models::HealthCheck;
use promptreel::{
    EnvironmentCapabilities, EnvironmentRouter, GateStore, GenerativeAssistant, OpenAiProvider,
    RequestGate, StaticEnvironment, TemplateRenderer,
};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<RequestGate>,
    pub router: Arc<EnvironmentRouter>,
    pub direct_enabled: bool,
}

impl AppState {
    /// The server is itself the remote intermediary, so its router only
    /// knows the direct and local routes.
    pub fn from_config(config: &ServerConfig) -> Self {
        let gate = RequestGate::new(Arc::new(GateStore::new(config.gate)), TemplateRenderer::new());

        let direct = config.openai_api_key.as_ref().map(|key| {
            let mut provider = OpenAiProvider::with_timeout(key.clone(), config.route_timeout);
            if let Some(base_url) = &config.openai_base_url {
                provider = provider.with_base_url(base_url);
            }
            GenerativeAssistant::new(Arc::new(provider))
        });
        let direct_enabled = direct.is_some();

        let probe = StaticEnvironment::new(EnvironmentCapabilities {
            remote_endpoint: false,
            direct_credentials: direct_enabled,
        });
        let mut router =
            EnvironmentRouter::new(Arc::new(probe)).with_timeout(config.route_timeout);
        if let Some(direct) = direct {
            tracing::info!(provider = direct.provider_name(), "🤖 Direct adapter enabled");
            router = router.with_direct(Arc::new(direct));
        }

        Self {
            gate: Arc::new(gate),
            router: Arc::new(router),
            direct_enabled,
        }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Promptreel API is running - ideas in, prompts out".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        direct_adapter: state.direct_enabled,
    })
}

/// Full application router with state applied
pub fn build_app(state: AppState) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::prompt::router())
        .merge(routes::assist::router())
        .merge(routes::story::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🎬 Promptreel API initializing...");

    let config = ServerConfig::from_lookup(|key| secrets.get(key))?;

    if config.openai_api_key.is_some() {
        tracing::info!("🤖 Direct generative adapter enabled");
    } else {
        tracing::warn!("⚠️  No OPENAI_API_KEY set - AI endpoints answer from local fallbacks");
    }
    tracing::info!(
        window_secs = config.gate.window.as_secs(),
        max_requests = config.gate.max_requests,
        cache_ttl_secs = config.gate.cache_ttl.as_secs(),
        "🚦 Request gate configured"
    );

    let router = build_app(AppState::from_config(&config));

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Promptreel API ready");

    Ok(router.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_direct_adapter() {
        let app = build_app(AppState::from_config(&ServerConfig::default()));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = routes::test_support::body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["directAdapter"], false);
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn test_openapi_lists_endpoints() {
        let doc = routes::swagger::ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();
        for path in [
            "/api/prompt",
            "/api/templates",
            "/api/suggestions",
            "/api/magic-story",
        ] {
            assert!(json["paths"].get(path).is_some(), "missing {}", path);
        }
    }
}
