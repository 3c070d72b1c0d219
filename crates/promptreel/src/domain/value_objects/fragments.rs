//! Style Fragments - Named stylistic parameters substituted into templates
//!
//! `FragmentOverrides` is what a caller supplies (any field may be missing);
//! `StyleFragments` is the complete set produced by [`FragmentOverrides::resolve`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One named stylistic parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fragment {
    VisualStyle,
    CameraMovement,
    Background,
    LightingMood,
    AudioCues,
    ColorPalette,
    NegativePrompts,
}

impl Fragment {
    pub const ALL: [Fragment; 7] = [
        Fragment::VisualStyle,
        Fragment::CameraMovement,
        Fragment::Background,
        Fragment::LightingMood,
        Fragment::AudioCues,
        Fragment::ColorPalette,
        Fragment::NegativePrompts,
    ];

    /// Placeholder name inside a template (without braces)
    pub fn token(&self) -> &'static str {
        match self {
            Fragment::VisualStyle => "visual_style",
            Fragment::CameraMovement => "camera_movement",
            Fragment::Background => "background",
            Fragment::LightingMood => "lighting_mood",
            Fragment::AudioCues => "audio_cues",
            Fragment::ColorPalette => "color_palette",
            Fragment::NegativePrompts => "negative_prompts",
        }
    }

    pub fn default_value(&self) -> &'static str {
        match self {
            Fragment::VisualStyle => "cinematic",
            Fragment::CameraMovement => "slow dolly in",
            Fragment::Background => "a neutral, out-of-focus background",
            Fragment::LightingMood => "dramatic, with a single key light",
            Fragment::AudioCues => "a subtle, ambient soundtrack",
            Fragment::ColorPalette => "a muted, desaturated color palette",
            Fragment::NegativePrompts => "blurry, low-quality, cartoonish",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Fragment::ALL.into_iter().find(|f| f.token() == token)
    }
}

/// Caller-supplied fragment values; any field may be omitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FragmentOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_movement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_cues: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_palette: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompts: Option<String>,
}

impl FragmentOverrides {
    pub fn get(&self, fragment: Fragment) -> Option<&str> {
        let value = match fragment {
            Fragment::VisualStyle => &self.visual_style,
            Fragment::CameraMovement => &self.camera_movement,
            Fragment::Background => &self.background,
            Fragment::LightingMood => &self.lighting_mood,
            Fragment::AudioCues => &self.audio_cues,
            Fragment::ColorPalette => &self.color_palette,
            Fragment::NegativePrompts => &self.negative_prompts,
        };
        value.as_deref()
    }

    /// Fill every missing or blank fragment with its default.
    ///
    /// Never fails: a blank override counts as absent.
    pub fn resolve(&self) -> StyleFragments {
        let pick = |fragment: Fragment| -> String {
            self.get(fragment)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| fragment.default_value())
                .to_string()
        };

        StyleFragments {
            visual_style: pick(Fragment::VisualStyle),
            camera_movement: pick(Fragment::CameraMovement),
            background: pick(Fragment::Background),
            lighting_mood: pick(Fragment::LightingMood),
            audio_cues: pick(Fragment::AudioCues),
            color_palette: pick(Fragment::ColorPalette),
            negative_prompts: pick(Fragment::NegativePrompts),
        }
    }
}

/// A complete fragment set, every value present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StyleFragments {
    pub visual_style: String,
    pub camera_movement: String,
    pub background: String,
    pub lighting_mood: String,
    pub audio_cues: String,
    pub color_palette: String,
    pub negative_prompts: String,
}

impl StyleFragments {
    pub fn get(&self, fragment: Fragment) -> &str {
        match fragment {
            Fragment::VisualStyle => &self.visual_style,
            Fragment::CameraMovement => &self.camera_movement,
            Fragment::Background => &self.background,
            Fragment::LightingMood => &self.lighting_mood,
            Fragment::AudioCues => &self.audio_cues,
            Fragment::ColorPalette => &self.color_palette,
            Fragment::NegativePrompts => &self.negative_prompts,
        }
    }
}

impl Default for StyleFragments {
    fn default() -> Self {
        FragmentOverrides::default().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_fills_defaults() {
        let resolved = FragmentOverrides::default().resolve();
        for fragment in Fragment::ALL {
            assert_eq!(resolved.get(fragment), fragment.default_value());
        }
        assert_eq!(resolved.visual_style, "cinematic");
    }

    #[test]
    fn test_resolve_keeps_overrides_and_replaces_blank() {
        let overrides = FragmentOverrides {
            visual_style: Some("  film noir ".to_string()),
            background: Some("   ".to_string()),
            ..Default::default()
        };
        let resolved = overrides.resolve();
        assert_eq!(resolved.visual_style, "film noir");
        assert_eq!(resolved.background, Fragment::Background.default_value());
    }

    #[test]
    fn test_token_lookup() {
        assert_eq!(Fragment::from_token("audio_cues"), Some(Fragment::AudioCues));
        assert_eq!(Fragment::from_token("idea"), None);
    }

    #[test]
    fn test_overrides_deserialize_camel_case() {
        let overrides: FragmentOverrides =
            serde_json::from_str(r#"{"lightingMood":"neon glow"}"#).unwrap();
        assert_eq!(overrides.lighting_mood.as_deref(), Some("neon glow"));
        assert!(overrides.visual_style.is_none());
    }
}
