//! Environment probe for the CLI
//!
//! Checks the server's /health on every call and reports whether an
//! OpenAI key is configured.

use std::time::Duration;

use async_trait::async_trait;

use promptreel::{EnvironmentCapabilities, EnvironmentProbe};

use crate::api::RemoteRoute;

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

pub struct HttpEnvironmentProbe {
    remote: Option<RemoteRoute>,
    direct_credentials: bool,
}

impl HttpEnvironmentProbe {
    pub fn new(base_url: Option<&str>, direct_credentials: bool) -> Self {
        Self {
            remote: base_url.map(|url| RemoteRoute::new(url, PROBE_TIMEOUT)),
            direct_credentials,
        }
    }
}

#[async_trait]
impl EnvironmentProbe for HttpEnvironmentProbe {
    async fn probe(&self) -> EnvironmentCapabilities {
        let remote_endpoint = match &self.remote {
            Some(remote) => match remote.health().await {
                Ok(_) => true,
                Err(e) => {
                    tracing::debug!("🔌 Remote endpoint unreachable: {:#}", e);
                    false
                }
            },
            None => false,
        };

        EnvironmentCapabilities {
            remote_endpoint,
            direct_credentials: self.direct_credentials,
        }
    }
}
