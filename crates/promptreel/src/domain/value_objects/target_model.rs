//! TargetModel - Video generators a prompt can be tailored for

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Target video-generation model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TargetModel {
    /// Google Veo 3 (generates native audio)
    Veo3,
    /// Google Flow
    Flow,
    /// RunwayML
    Runway,
    /// Pika Labs
    Pika,
}

impl TargetModel {
    pub const ALL: [TargetModel; 4] = [
        TargetModel::Veo3,
        TargetModel::Flow,
        TargetModel::Runway,
        TargetModel::Pika,
    ];

    /// Template used when a caller names a model we do not know.
    pub const FALLBACK: TargetModel = TargetModel::Flow;

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetModel::Veo3 => "veo3",
            TargetModel::Flow => "flow",
            TargetModel::Runway => "runway",
            TargetModel::Pika => "pika",
        }
    }

    /// Human-facing product name
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetModel::Veo3 => "Veo 3",
            TargetModel::Flow => "Flow",
            TargetModel::Runway => "RunwayML",
            TargetModel::Pika => "Pika Labs",
        }
    }

    /// Whether the generator produces its own soundtrack and dialogue.
    pub fn supports_native_audio(&self) -> bool {
        matches!(self, TargetModel::Veo3)
    }

    /// Parse a model name, degrading to [`TargetModel::FALLBACK`] when unknown.
    pub fn parse_or_fallback(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(
                model = name,
                fallback = TargetModel::FALLBACK.as_str(),
                "Unknown model, using fallback template"
            );
            TargetModel::FALLBACK
        })
    }
}

impl std::fmt::Display for TargetModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TargetModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "veo3" => Ok(TargetModel::Veo3),
            "flow" => Ok(TargetModel::Flow),
            "runway" => Ok(TargetModel::Runway),
            "pika" => Ok(TargetModel::Pika),
            _ => Err(format!(
                "Unknown model: {}. Valid: veo3, flow, runway, pika",
                s
            )),
        }
    }
}
