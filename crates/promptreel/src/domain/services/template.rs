//! Template Renderer - One parameterized template per target model
//!
//! Templates are parsed once into an ordered list of literal and slot
//! segments. Rendering walks the segments, so substituted values are never
//! scanned for placeholders again.

use crate::domain::entities::{GeneratedPrompt, PromptRequest};
use crate::domain::value_objects::{Fragment, StyleFragments, TargetModel};

const VEO3_TEMPLATE: &str = "
Scene: A high-quality, cinematic shot of {idea}.
Visual Style: {visual_style}, 8k, sharp focus, high contrast.
Camera Movement: {camera_movement}.
Main Subject: A detailed view of {idea}.
Background: {background}.
Lighting and Mood: {lighting_mood}.
Audio Cues: {audio_cues}.
Color Palette: {color_palette}.
Negative Prompts: {negative_prompts}.
";

const FLOW_TEMPLATE: &str = "
Act as a professional cinematographer.
Create a video about {idea}.
The video should have a {visual_style} feel.
Use a {camera_movement} to capture the action.
The main subject is {idea}.
The background should be {background}.
The lighting should be {lighting_mood}.
The audio should consist of {audio_cues}.
The color palette should be {color_palette}.
Avoid the following: {negative_prompts}.
";

const RUNWAY_TEMPLATE: &str = "
Subject: {idea}.
Style: {visual_style}, smooth motion, high detail.
Camera: {camera_movement}.
Environment: {background}.
Lighting: {lighting_mood}.
Color Grade: {color_palette}.
Sound Design: {audio_cues}.
Exclude: {negative_prompts}.
";

const PIKA_TEMPLATE: &str = "
{idea}, {visual_style} style, {camera_movement}, set against {background}, {lighting_mood} lighting, {color_palette}.
Sound: {audio_cues}.
-neg {negative_prompts}
";

/// A placeholder position in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Idea,
    Fragment(Fragment),
}

impl Slot {
    fn from_token(token: &str) -> Option<Self> {
        if token == "idea" {
            return Some(Slot::Idea);
        }
        Fragment::from_token(token).map(Slot::Fragment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// A parsed template
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `{token}` placeholders. Braces around unknown names stay literal text.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source.as_str();

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];

            let slot = after_open.find('}').and_then(|close| {
                Slot::from_token(&after_open[..close]).map(|slot| (slot, close))
            });

            match slot {
                Some((slot, close)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(slot));
                    rest = &after_open[close + 1..];
                }
                None => {
                    literal.push('{');
                    rest = after_open;
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { source, segments }
    }

    /// The unfilled template text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholders in order of appearance
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(slot) => Some(*slot),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every slot. Values are inserted verbatim.
    pub fn fill(&self, idea: &str, fragments: &StyleFragments) -> String {
        let mut out = String::with_capacity(self.source.len() + idea.len() * 2);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(Slot::Idea) => out.push_str(idea),
                Segment::Slot(Slot::Fragment(fragment)) => out.push_str(fragments.get(*fragment)),
            }
        }
        out
    }
}

/// Holds the built-in template for every target model
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    veo3: Template,
    flow: Template,
    runway: Template,
    pika: Template,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self {
            veo3: Template::parse(VEO3_TEMPLATE),
            flow: Template::parse(FLOW_TEMPLATE),
            runway: Template::parse(RUNWAY_TEMPLATE),
            pika: Template::parse(PIKA_TEMPLATE),
        }
    }

    pub fn template(&self, model: TargetModel) -> &Template {
        match model {
            TargetModel::Veo3 => &self.veo3,
            TargetModel::Flow => &self.flow,
            TargetModel::Runway => &self.runway,
            TargetModel::Pika => &self.pika,
        }
    }

    /// Render a validated request with resolved fragments
    pub fn render(&self, request: &PromptRequest, fragments: &StyleFragments) -> GeneratedPrompt {
        self.render_for(request.model, &request.idea, fragments)
    }

    /// Render for a model given by name; unknown names use [`TargetModel::FALLBACK`].
    pub fn render_named(
        &self,
        model: &str,
        idea: &str,
        fragments: &StyleFragments,
    ) -> GeneratedPrompt {
        self.render_for(TargetModel::parse_or_fallback(model), idea, fragments)
    }

    pub fn render_for(
        &self,
        model: TargetModel,
        idea: &str,
        fragments: &StyleFragments,
    ) -> GeneratedPrompt {
        let template = self.template(model);
        GeneratedPrompt {
            raw_template: template.source().to_string(),
            assembled_prompt: template.fill(idea, fragments),
        }
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FragmentOverrides;

    fn request(idea: &str, model: &str) -> PromptRequest {
        PromptRequest::new(idea, model, FragmentOverrides::default()).unwrap()
    }

    #[test]
    fn test_veo3_scene_line() {
        let renderer = TemplateRenderer::new();
        let req = request("a cat playing with a ball of yarn", "veo3");
        let prompt = renderer.render(&req, &StyleFragments::default());
        let scene = "Scene: A high-quality, cinematic shot of a cat playing with a ball of yarn.";
        assert!(prompt.assembled_prompt.contains(scene));
        assert_eq!(prompt.raw_template, VEO3_TEMPLATE);
    }

    #[test]
    fn test_flow_prompt() {
        let renderer = TemplateRenderer::new();
        let req = request("a dog chasing its tail", "flow");
        let prompt = renderer.render(&req, &StyleFragments::default());
        assert!(prompt
            .assembled_prompt
            .contains("Act as a professional cinematographer."));
        assert!(prompt
            .assembled_prompt
            .contains("Create a video about a dog chasing its tail."));
    }

    #[test]
    fn test_output_contains_idea_and_every_default() {
        let renderer = TemplateRenderer::new();
        for model in TargetModel::ALL {
            let req = request("a paper boat in a storm", model.as_str());
            let prompt = renderer.render(&req, &StyleFragments::default());
            assert!(prompt.assembled_prompt.contains("a paper boat in a storm"));
            for fragment in Fragment::ALL {
                assert!(
                    prompt.assembled_prompt.contains(fragment.default_value()),
                    "{} prompt is missing {:?}",
                    model,
                    fragment
                );
            }
        }
    }

    #[test]
    fn test_every_template_uses_every_slot() {
        let renderer = TemplateRenderer::new();
        for model in TargetModel::ALL {
            let slots: Vec<_> = renderer.template(model).slots().collect();
            assert!(slots.contains(&Slot::Idea));
            for fragment in Fragment::ALL {
                assert!(
                    slots.contains(&Slot::Fragment(fragment)),
                    "{} lacks {:?}",
                    model,
                    fragment
                );
            }
        }
    }

    #[test]
    fn test_no_placeholder_survives() {
        let renderer = TemplateRenderer::new();
        for model in TargetModel::ALL {
            let req = request("a lighthouse", model.as_str());
            let prompt = renderer.render(&req, &StyleFragments::default());
            for token in ["{idea}", "{visual_style}", "{negative_prompts}", "{audio_cues}"] {
                assert!(!prompt.assembled_prompt.contains(token));
            }
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = TemplateRenderer::new();
        let fragments = FragmentOverrides {
            camera_movement: Some("orbiting".to_string()),
            ..Default::default()
        }
        .resolve();
        for model in TargetModel::ALL {
            let req = request("a glass city", model.as_str());
            assert_eq!(renderer.render(&req, &fragments), renderer.render(&req, &fragments));
        }
    }

    #[test]
    fn test_runway_futuristic_city() {
        let renderer = TemplateRenderer::new();
        let req = request("a futuristic city", "runway");
        let prompt = renderer.render(&req, &StyleFragments::default());
        assert!(prompt.assembled_prompt.contains("a futuristic city"));
        assert!(prompt.assembled_prompt.contains("Style: cinematic"));
        assert!(prompt
            .assembled_prompt
            .contains("Exclude: blurry, low-quality, cartoonish."));
    }

    #[test]
    fn test_unknown_model_uses_fallback_template() {
        let renderer = TemplateRenderer::new();
        let prompt = renderer.render_named("sora", "a river", &StyleFragments::default());
        let expected =
            renderer.render_for(TargetModel::Flow, "a river", &StyleFragments::default());
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_values_are_not_reexpanded() {
        let renderer = TemplateRenderer::new();
        let fragments = FragmentOverrides {
            background: Some("{idea} and {visual_style}".to_string()),
            ..Default::default()
        }
        .resolve();
        let prompt = renderer.render(&request("{negative_prompts}", "veo3"), &fragments);
        assert!(prompt
            .assembled_prompt
            .contains("Scene: A high-quality, cinematic shot of {negative_prompts}."));
        assert!(prompt
            .assembled_prompt
            .contains("Background: {idea} and {visual_style}."));
    }

    #[test]
    fn test_parse_keeps_unknown_braces() {
        let template = Template::parse("{{idea}} {mood} {idea");
        let fragments = StyleFragments::default();
        assert_eq!(template.fill("x", &fragments), "{x} {mood} {idea");
        assert_eq!(template.source(), "{{idea}} {mood} {idea");
    }
}
