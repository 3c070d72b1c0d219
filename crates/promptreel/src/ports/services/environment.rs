//! Environment Probe Port
//!
//! Reports which delivery routes the current deployment can use. The router
//! consults it on every operation; the same binary may run in different modes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What the current environment can reach
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentCapabilities {
    /// An intermediary endpoint answers (false for fully static builds)
    pub remote_endpoint: bool,
    /// Credentials for calling the generative service directly are present
    pub direct_credentials: bool,
}

#[async_trait]
pub trait EnvironmentProbe: Send + Sync {
    async fn probe(&self) -> EnvironmentCapabilities;
}

/// Probe with fixed answers, for deployments that know their own shape
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticEnvironment {
    capabilities: EnvironmentCapabilities,
}

impl StaticEnvironment {
    pub fn new(capabilities: EnvironmentCapabilities) -> Self {
        Self { capabilities }
    }
}

#[async_trait]
impl EnvironmentProbe for StaticEnvironment {
    async fn probe(&self) -> EnvironmentCapabilities {
        self.capabilities
    }
}
