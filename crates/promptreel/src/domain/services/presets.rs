//! Prompt Presets - Named starter requests
//!
//! Each preset is a complete render request: idea, model and every fragment.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::PromptRequest;
use crate::domain::value_objects::{FragmentOverrides, TargetModel};

/// A named, ready-to-render request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptPreset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub idea: String,
    pub model: TargetModel,
    #[serde(flatten)]
    pub overrides: FragmentOverrides,
}

impl PromptPreset {
    pub fn request(&self) -> PromptRequest {
        PromptRequest {
            idea: self.idea.clone(),
            model: self.model,
            fragments: self.overrides.clone(),
        }
    }
}

struct PresetSource {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    idea: &'static str,
    model: TargetModel,
    // visual, camera, background, lighting, audio, palette, negative
    fragments: [&'static str; 7],
}

const PRESETS: &[PresetSource] = &[
    PresetSource {
        id: "cinematic-veo3",
        name: "Cinematic Veo 3 Intro",
        description: "A dramatic, high-quality intro for Veo 3.",
        idea: "a lone figure walking through a neon-lit city at night",
        model: TargetModel::Veo3,
        fragments: [
            "cinematic, moody, 8k",
            "slow dolly in, then tracking shot",
            "rain-slicked streets, towering skyscrapers",
            "low-key, neon glow, atmospheric",
            "subtle synth music, distant city hum, footsteps",
            "dark blues, purples, and vibrant neon accents",
            "blurry, cartoon, low resolution, daytime",
        ],
    },
    PresetSource {
        id: "flow-documentary",
        name: "Flow Documentary Style",
        description: "A clear, informative prompt for Flow in a documentary style.",
        idea: "a close-up of a bee pollinating a flower",
        model: TargetModel::Flow,
        fragments: [
            "realistic, natural, macro",
            "static shot, then slow pan",
            "lush garden, blurred foliage",
            "natural sunlight, soft, bright",
            "gentle buzzing, ambient nature sounds",
            "vibrant greens, yellows, and browns",
            "blurry, artificial, cartoon, dark",
        ],
    },
    PresetSource {
        id: "runway-abstract",
        name: "Runway Abstract Art",
        description: "An abstract and surreal prompt for RunwayML.",
        idea: "liquid metal flowing over geometric shapes",
        model: TargetModel::Runway,
        fragments: [
            "abstract, surreal, fluid dynamics",
            "orbiting, slow zoom out",
            "dark void, subtle light sources",
            "iridescent, glowing, ethereal",
            "ambient, evolving soundscapes",
            "shifting metallics, deep purples, electric blues",
            "realistic, mundane, static, sharp edges",
        ],
    },
];

impl From<&PresetSource> for PromptPreset {
    fn from(source: &PresetSource) -> Self {
        let [visual, camera, background, lighting, audio, palette, negative] =
            source.fragments.map(|v| Some(v.to_string()));
        Self {
            id: source.id.to_string(),
            name: source.name.to_string(),
            description: source.description.to_string(),
            idea: source.idea.to_string(),
            model: source.model,
            overrides: FragmentOverrides {
                visual_style: visual,
                camera_movement: camera,
                background,
                lighting_mood: lighting,
                audio_cues: audio,
                color_palette: palette,
                negative_prompts: negative,
            },
        }
    }
}

/// Every built-in preset, in display order
pub fn presets() -> Vec<PromptPreset> {
    PRESETS.iter().map(PromptPreset::from).collect()
}

/// Look up a preset by id, ignoring case
pub fn find_preset(id: &str) -> Option<PromptPreset> {
    let id = id.trim();
    PRESETS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id))
        .map(PromptPreset::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::validate_idea;
    use crate::domain::services::TemplateRenderer;
    use crate::domain::value_objects::Fragment;

    #[test]
    fn test_presets_render_without_placeholders() {
        let renderer = TemplateRenderer::new();
        for preset in presets() {
            let request = preset.request();
            validate_idea(&request.idea).unwrap();

            let prompt = renderer.render(&request, &request.fragments.resolve());
            assert!(prompt.assembled_prompt.contains(&preset.idea));
            assert!(
                !prompt.assembled_prompt.contains('{'),
                "{} left a placeholder",
                preset.id
            );
        }
    }

    #[test]
    fn test_presets_override_every_fragment() {
        for preset in presets() {
            for fragment in Fragment::ALL {
                assert!(preset.overrides.get(fragment).is_some(), "{}", preset.id);
            }
        }
    }

    #[test]
    fn test_find_preset() {
        let preset = find_preset(" Flow-Documentary ").unwrap();
        assert_eq!(preset.model, TargetModel::Flow);
        assert_eq!(preset.name, "Flow Documentary Style");
        assert!(find_preset("missing").is_none());
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(find_preset("cinematic-veo3").unwrap()).unwrap();
        assert_eq!(json["model"], "veo3");
        assert_eq!(json["visualStyle"], "cinematic, moody, 8k");
        assert_eq!(json["negativePrompts"], "blurry, cartoon, low resolution, daytime");
    }
}
