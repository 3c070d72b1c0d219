//! Request Gate - Rate limiting and response caching for the network entry point
//!
//! In-process callers use the renderer directly; only requests arriving over
//! the network pass through the gate. The rate check runs before the cache
//! lookup, so a rejected caller never gets a cached answer.

mod cache;
mod rate_limit;

pub use cache::{cache_key, CacheEntry, ResponseCache};
pub use rate_limit::{RateLimitCounter, RateLimiter, UNKNOWN_CALLER};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{GeneratedPrompt, PromptRequest};
use crate::domain::errors::DomainError;
use crate::domain::services::TemplateRenderer;
use crate::ports::{Clock, SystemClock};

/// Window, request budget and cache lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
    pub window: Duration,
    pub max_requests: u32,
    pub cache_ttl: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(10),
            max_requests: 5,
            cache_ttl: Duration::from_secs(60),
        }
    }
}

/// Mutable gate state. One per process in production, one per test otherwise.
pub struct GateStore {
    pub cache: ResponseCache,
    pub limiter: RateLimiter,
}

impl GateStore {
    pub fn new(config: GateConfig) -> Self {
        Self {
            cache: ResponseCache::new(config.cache_ttl),
            limiter: RateLimiter::new(config.window, config.max_requests),
        }
    }
}

impl Default for GateStore {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}

pub struct RequestGate {
    store: Arc<GateStore>,
    renderer: TemplateRenderer,
    clock: Arc<dyn Clock>,
    renders: AtomicU64,
}

impl RequestGate {
    pub fn new(store: Arc<GateStore>, renderer: TemplateRenderer) -> Self {
        Self::with_clock(store, renderer, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<GateStore>,
        renderer: TemplateRenderer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            renderer,
            clock,
            renders: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &GateStore {
        &self.store
    }

    /// Number of times the renderer actually ran
    pub fn render_count(&self) -> u64 {
        self.renders.load(Ordering::Relaxed)
    }

    /// Rate-limit, then serve from cache or render.
    ///
    /// A missing or blank caller identity shares the [`UNKNOWN_CALLER`] bucket.
    pub async fn handle(
        &self,
        caller: Option<&str>,
        request: &PromptRequest,
    ) -> Result<GeneratedPrompt, DomainError> {
        let caller = caller
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN_CALLER);

        self.store.limiter.check(caller, self.clock.now()).await?;

        let fragments = request.fragments.resolve();
        let key = cache_key(request, &fragments);

        if let Some(cached) = self.store.cache.get(&key, self.clock.now()).await {
            tracing::debug!(model = %request.model, "Cache hit");
            return Ok(cached);
        }

        let prompt = self.renderer.render(request, &fragments);
        self.renders.fetch_add(1, Ordering::Relaxed);
        self.store
            .cache
            .insert(key, prompt.clone(), self.clock.now())
            .await;

        tracing::info!(model = %request.model, caller = %caller, "📝 Rendered prompt");
        Ok(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FragmentOverrides;
    use crate::ports::ManualClock;

    fn gate(config: GateConfig) -> (RequestGate, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let gate = RequestGate::with_clock(
            Arc::new(GateStore::new(config)),
            TemplateRenderer::new(),
            clock.clone(),
        );
        (gate, clock)
    }

    fn request(idea: &str) -> PromptRequest {
        PromptRequest::new(idea, "veo3", FragmentOverrides::default()).unwrap()
    }

    #[tokio::test]
    async fn test_second_request_within_ttl_is_cached() {
        let (gate, clock) = gate(GateConfig::default());

        let first = gate.handle(Some("10.0.0.1"), &request("a cat")).await.unwrap();
        clock.advance(chrono::Duration::seconds(30));
        let second = gate.handle(Some("10.0.0.1"), &request("a cat")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(gate.render_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_rendered_again() {
        let (gate, clock) = gate(GateConfig::default());

        gate.handle(Some("10.0.0.1"), &request("a cat")).await.unwrap();
        clock.advance(chrono::Duration::seconds(61));
        gate.handle(Some("10.0.0.1"), &request("a cat")).await.unwrap();

        assert_eq!(gate.render_count(), 2);
    }

    #[tokio::test]
    async fn test_sixth_request_in_window_is_rejected() {
        let (gate, clock) = gate(GateConfig::default());

        for i in 0..5 {
            let idea = format!("idea {}", i);
            assert!(gate.handle(Some("10.0.0.2"), &request(&idea)).await.is_ok());
        }
        let err = gate.handle(Some("10.0.0.2"), &request("idea 5")).await.unwrap_err();
        assert!(matches!(err, DomainError::RateLimited { .. }));

        clock.advance(chrono::Duration::seconds(11));
        assert!(gate.handle(Some("10.0.0.2"), &request("idea 6")).await.is_ok());
    }

    #[tokio::test]
    async fn test_rate_limit_applies_before_cache() {
        let config = GateConfig {
            max_requests: 1,
            ..Default::default()
        };
        let (gate, _clock) = gate(config);

        gate.handle(Some("10.0.0.3"), &request("a cat")).await.unwrap();
        let err = gate.handle(Some("10.0.0.3"), &request("a cat")).await.unwrap_err();
        assert!(matches!(err, DomainError::RateLimited { .. }));
        assert_eq!(gate.render_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_identity_shares_one_bucket() {
        let config = GateConfig {
            max_requests: 2,
            ..Default::default()
        };
        let (gate, _clock) = gate(config);

        gate.handle(None, &request("one")).await.unwrap();
        gate.handle(Some("  "), &request("two")).await.unwrap();
        assert!(gate.handle(None, &request("three")).await.is_err());
        assert!(gate.handle(Some("10.0.0.4"), &request("four")).await.is_ok());

        let shared = gate.store().limiter.counter(UNKNOWN_CALLER).await.unwrap();
        assert_eq!(shared.count, 3);
    }

    #[tokio::test]
    async fn test_stores_are_isolated() {
        let (first, _) = gate(GateConfig::default());
        let (second, _) = gate(GateConfig::default());

        first.handle(None, &request("a cat")).await.unwrap();
        assert_eq!(first.store().cache.len().await, 1);
        assert!(second.store().cache.is_empty().await);
    }
}
