//! Magic mode, story variations and cinematic elements

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use promptreel::{CinematicElements, GeneratedPrompt, MagicStory, Routed, StoryExpansion};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MagicStoryRequest {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MagicStoryResponse {
    pub story: StoryExpansion,
    pub prompt: GeneratedPrompt,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<Routed<MagicStory>> for MagicStoryResponse {
    fn from(routed: Routed<MagicStory>) -> Self {
        Self {
            story: routed.value.story,
            prompt: routed.value.prompt,
            note: routed.note,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct StoryVariationsRequest {
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoryVariationsResponse {
    pub variations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<Routed<Vec<String>>> for StoryVariationsResponse {
    fn from(routed: Routed<Vec<String>>) -> Self {
        Self {
            variations: routed.value,
            note: routed.note,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CinematicElementsRequest {
    #[serde(default)]
    pub story_context: String,
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CinematicElementsResponse {
    #[serde(flatten)]
    pub elements: CinematicElements,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<Routed<CinematicElements>> for CinematicElementsResponse {
    fn from(routed: Routed<CinematicElements>) -> Self {
        Self {
            elements: routed.value,
            note: routed.note,
        }
    }
}
