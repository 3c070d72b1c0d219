//! Fallback Story Library - Offline magic-mode expansions
//!
//! A handful of authored stories keyed by lowercase keyword, plus a generic
//! synthesis for any other word. `expand` is total.

use crate::domain::entities::StoryExpansion;
use crate::domain::value_objects::TargetModel;

struct AuthoredStory {
    keyword: &'static str,
    full_story: &'static str,
    visual_style: &'static str,
    camera_movement: &'static str,
    background: &'static str,
    lighting_mood: &'static str,
    /// Dialogue/ambience/music phrasing for generators that render audio
    native_audio: &'static str,
    /// Soundtrack description for generators that do not
    ambient_audio: &'static str,
    color_palette: &'static str,
    character_details: &'static str,
    action_sequence: &'static str,
    story_mood: &'static str,
}

const STORIES: &[AuthoredStory] = &[
    AuthoredStory {
        keyword: "cat",
        full_story: "A curious tabby cat creeps along a sunlit windowsill, spots a drifting soap bubble, and leaps to catch it, landing softly as the bubble pops against its nose.",
        visual_style: "warm indie film, shallow depth of field",
        camera_movement: "low-angle tracking shot that follows the cat, ending in a slow-motion close-up",
        background: "a cozy apartment window with sheer curtains and potted herbs",
        lighting_mood: "golden afternoon sunlight, soft and playful",
        native_audio: "soft purring, the faint pop of the bubble, a gentle plucked-guitar melody (no subtitles)",
        ambient_audio: "light playful acoustic music with subtle room tone",
        color_palette: "honey golds, cream whites, and sage greens",
        character_details: "a young orange tabby with white paws and bright green eyes",
        action_sequence: "0-3s stalking along the sill, 3-6s leap toward the bubble, 6-8s landing and startled blink",
        story_mood: "whimsical and heartwarming",
    },
    AuthoredStory {
        keyword: "dog",
        full_story: "A scruffy terrier races across a wet beach toward its owner, skids to a stop at the water's edge, and proudly drops a piece of driftwood at their feet.",
        visual_style: "cinematic realism with crisp motion detail",
        camera_movement: "handheld follow shot at dog height, rising into a wide reveal of the shoreline",
        background: "an empty beach at low tide with rolling waves and distant cliffs",
        lighting_mood: "overcast morning light, fresh and joyful",
        native_audio: "paws splashing through shallow water, an excited bark, waves breaking, the owner laughing 'Good boy!' (no subtitles)",
        ambient_audio: "upbeat folk music over ocean wind and surf",
        color_palette: "slate blues, sandy beiges, and muted teal",
        character_details: "a small wiry terrier with a red collar and a wagging tail",
        action_sequence: "0-4s sprint across the sand, 4-6s skid at the waterline, 6-8s drop the driftwood and look up",
        story_mood: "energetic and loyal",
    },
    AuthoredStory {
        keyword: "ocean",
        full_story: "A lone free diver descends through shafts of light into a deep blue abyss, where a giant manta ray glides silently past her outstretched hand.",
        visual_style: "underwater documentary, ultra-clear and majestic",
        camera_movement: "slow descending dolly that orbits the diver as the manta passes",
        background: "open ocean with sunbeams piercing the surface far above",
        lighting_mood: "ethereal god rays fading into deep shadow, awe-struck",
        native_audio: "muffled heartbeat, gentle bubbles, a deep resonant whale-song drone (no subtitles)",
        ambient_audio: "swelling ambient orchestral pads with soft underwater textures",
        color_palette: "deep sapphire, turquoise, and pale shafts of white",
        character_details: "a free diver in a black wetsuit with long fins and flowing hair",
        action_sequence: "0-3s descent through light, 3-6s manta emerges from the dark, 6-8s hand and wing nearly touch",
        story_mood: "serene and awe-inspiring",
    },
    AuthoredStory {
        keyword: "city",
        full_story: "A courier on a bicycle weaves through rain-soaked neon streets at night, dodging taxis before vanishing into a glowing alley as the traffic lights change.",
        visual_style: "neo-noir, moody and high contrast",
        camera_movement: "fast tracking shot alongside the cyclist, whip-panning into the alley",
        background: "rain-slicked streets beneath towering skyscrapers and flickering signs",
        lighting_mood: "low-key neon glow reflecting in puddles, tense and electric",
        native_audio: "rain hiss, bicycle chain whirring, taxi horns, a pulsing synth bassline (no subtitles)",
        ambient_audio: "driving synthwave score layered with distant city hum",
        color_palette: "electric magentas, cyan reflections, and inky blacks",
        character_details: "a young courier in a yellow rain jacket with a battered messenger bag",
        action_sequence: "0-3s weaving through traffic, 3-6s near miss with a taxi, 6-8s turn into the glowing alley",
        story_mood: "kinetic and mysterious",
    },
    AuthoredStory {
        keyword: "forest",
        full_story: "At dawn a young deer steps into a misty clearing, freezes at the snap of a twig, then bounds away as the first sunlight breaks through the ancient trees.",
        visual_style: "naturalistic wildlife cinematography, painterly depth",
        camera_movement: "static wide shot that slowly pushes in, then pans to follow the leap",
        background: "an old-growth forest with mossy trunks and drifting fog",
        lighting_mood: "cool blue dawn warming into golden rays, hushed and reverent",
        native_audio: "birdsong, a sharp twig snap, hooves on damp earth, a soft string swell (no subtitles)",
        ambient_audio: "gentle nature ambience with a restrained string arrangement",
        color_palette: "moss greens, misty greys, and warm amber highlights",
        character_details: "a young white-tailed deer with alert ears and dew on its coat",
        action_sequence: "0-3s deer enters the clearing, 3-5s freezes and listens, 5-8s bounds into the sunlight",
        story_mood: "tranquil turning to wonder",
    },
    AuthoredStory {
        keyword: "space",
        full_story: "An astronaut floating outside a space station turns to watch the sun rise over Earth's curved horizon, her visor slowly filling with a blaze of orange light.",
        visual_style: "photoreal science fiction, epic scale",
        camera_movement: "slow orbital move around the astronaut ending on a visor close-up",
        background: "low Earth orbit with the planet's limb and a scattering of stars",
        lighting_mood: "stark sunlight cutting through blackness, contemplative and grand",
        native_audio: "steady breathing in the helmet, radio static, a quiet 'Beautiful...' whispered over comms (no subtitles)",
        ambient_audio: "minimal ambient score with low cosmic drones",
        color_palette: "deep space black, Earth blues, and blazing sunrise orange",
        character_details: "an astronaut in a white EVA suit with a mission patch and reflective gold visor",
        action_sequence: "0-3s drifting beside the station, 3-6s turning toward the horizon, 6-8s sunrise floods the visor",
        story_mood: "awe and quiet solitude",
    },
];

/// Deterministic keyword-to-story lookup used when no generative service answers
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackStoryLibrary;

impl FallbackStoryLibrary {
    pub fn new() -> Self {
        Self
    }

    /// Keywords with an authored story
    pub fn keywords(&self) -> impl Iterator<Item = &'static str> {
        STORIES.iter().map(|s| s.keyword)
    }

    /// Expand a word into a story. Never fails.
    pub fn expand(&self, word: &str, model: TargetModel) -> StoryExpansion {
        let word = word.trim();
        let key = word.to_lowercase();

        match STORIES.iter().find(|s| s.keyword == key) {
            Some(story) => authored(story, model),
            None => synthesize(word, model),
        }
    }
}

fn authored(story: &AuthoredStory, model: TargetModel) -> StoryExpansion {
    let audio = if model.supports_native_audio() {
        story.native_audio
    } else {
        story.ambient_audio
    };

    StoryExpansion {
        full_story: story.full_story.to_string(),
        visual_style: story.visual_style.to_string(),
        camera_movement: story.camera_movement.to_string(),
        background: story.background.to_string(),
        lighting_mood: story.lighting_mood.to_string(),
        audio_cues: audio.to_string(),
        color_palette: story.color_palette.to_string(),
        character_details: story.character_details.to_string(),
        action_sequence: story.action_sequence.to_string(),
        story_mood: story.story_mood.to_string(),
    }
}

fn synthesize(word: &str, model: TargetModel) -> StoryExpansion {
    let audio_cues = if model.supports_native_audio() {
        format!(
            "ambient sounds that evoke {word}, a soft narrator saying: '{word}', and an understated score (no subtitles)"
        )
    } else {
        format!("an atmospheric soundtrack inspired by {word}")
    };

    StoryExpansion {
        full_story: format!(
            "A cinematic moment featuring {word}, revealed in a single continuous shot that builds from quiet detail to a striking final image."
        ),
        visual_style: "cinematic realism".to_string(),
        camera_movement: format!("slow dolly in toward {word}, ending on a lingering close-up"),
        background: format!("an evocative setting that frames {word}"),
        lighting_mood: "soft directional light with gentle contrast, contemplative".to_string(),
        audio_cues,
        color_palette: "rich natural tones with a single accent color".to_string(),
        character_details: format!("{word} as the central subject, shown in sharp detail"),
        action_sequence: format!(
            "0-3s establishing view, 3-6s gradual reveal of {word}, 6-8s final close-up"
        ),
        story_mood: "intriguing and evocative".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cat_returns_authored_story() {
        let story = FallbackStoryLibrary::new().expand("cat", TargetModel::Flow);
        assert!(story.full_story.contains("tabby cat"));
        assert_eq!(story.story_mood, "whimsical and heartwarming");
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let library = FallbackStoryLibrary::new();
        assert_eq!(
            library.expand("  CAT ", TargetModel::Pika),
            library.expand("cat", TargetModel::Pika)
        );
    }

    #[test]
    fn test_unknown_word_is_synthesized() {
        let story = FallbackStoryLibrary::new().expand("xyz123", TargetModel::Runway);
        assert!(story.full_story.contains("xyz123"));
        assert!(story.full_story.starts_with("A cinematic moment featuring xyz123"));
        assert!(story.is_usable());
    }

    #[test]
    fn test_audio_depends_on_model() {
        let library = FallbackStoryLibrary::new();
        let veo = library.expand("ocean", TargetModel::Veo3);
        let flow = library.expand("ocean", TargetModel::Flow);
        assert_ne!(veo.audio_cues, flow.audio_cues);
        assert_eq!(veo.full_story, flow.full_story);
        assert!(veo.audio_cues.contains("no subtitles"));

        let veo = library.expand("lantern", TargetModel::Veo3);
        let pika = library.expand("lantern", TargetModel::Pika);
        assert_ne!(veo.audio_cues, pika.audio_cues);
    }

    #[test]
    fn test_every_authored_story_is_usable() {
        let library = FallbackStoryLibrary::new();
        for keyword in library.keywords() {
            for model in TargetModel::ALL {
                assert!(library.expand(keyword, model).is_usable());
            }
        }
    }
}
