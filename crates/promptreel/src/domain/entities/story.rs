//! Story - Magic-mode expansions and derived cinematic elements

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::GeneratedPrompt;
use crate::domain::value_objects::{FragmentOverrides, StyleFragments, TargetModel};

/// A single word expanded into a structured eight-second story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoryExpansion {
    pub full_story: String,
    pub visual_style: String,
    pub camera_movement: String,
    pub background: String,
    pub lighting_mood: String,
    pub audio_cues: String,
    pub color_palette: String,
    pub character_details: String,
    pub action_sequence: String,
    pub story_mood: String,
}

impl StoryExpansion {
    /// Negative prompts applied when rendering a magic-mode story
    pub fn negative_prompts_for(model: TargetModel) -> &'static str {
        match model {
            TargetModel::Veo3 => "blurry, low-quality, subtitles, text overlay",
            _ => "blurry, low-quality, cartoonish",
        }
    }

    /// Fragment source for the template renderer
    pub fn fragment_overrides(&self, model: TargetModel) -> FragmentOverrides {
        FragmentOverrides {
            visual_style: Some(self.visual_style.clone()),
            camera_movement: Some(self.camera_movement.clone()),
            background: Some(self.background.clone()),
            lighting_mood: Some(self.lighting_mood.clone()),
            audio_cues: Some(self.audio_cues.clone()),
            color_palette: Some(self.color_palette.clone()),
            negative_prompts: Some(Self::negative_prompts_for(model).to_string()),
        }
    }

    /// An expansion without a story is not usable, whatever else it holds.
    pub fn is_usable(&self) -> bool {
        !self.full_story.trim().is_empty()
    }
}

/// Cinematic elements derived from a story context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CinematicElements {
    pub visual_style: String,
    pub camera_movement: String,
    pub background: String,
    pub lighting_mood: String,
    pub audio_cues: String,
    pub color_palette: String,
}

impl From<StyleFragments> for CinematicElements {
    fn from(fragments: StyleFragments) -> Self {
        Self {
            visual_style: fragments.visual_style,
            camera_movement: fragments.camera_movement,
            background: fragments.background,
            lighting_mood: fragments.lighting_mood,
            audio_cues: fragments.audio_cues,
            color_palette: fragments.color_palette,
        }
    }
}

/// Magic-mode result: the story and the prompt rendered from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MagicStory {
    pub story: StoryExpansion,
    pub prompt: GeneratedPrompt,
}
