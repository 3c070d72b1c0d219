//! Local Heuristics - Deterministic answers for degraded mode
//!
//! Used when no generative service can be reached. Quality is lower but
//! every function is total and free of I/O.

use crate::domain::entities::{CinematicElements, OptimizationResult, PromptAnalysis};
use crate::domain::value_objects::{FragmentOverrides, TargetModel};

const TECHNICAL_TERMS: [&str; 8] = [
    "cinematic", "4k", "8k", "lighting", "camera", "angle", "color", "mood",
];

const MAX_FALLBACK_SUGGESTION_CHARS: usize = 50;

/// Template-based idea completions
pub fn fallback_suggestions(input: &str) -> Vec<String> {
    [
        "in cinematic style",
        "with dramatic lighting",
        "in slow motion",
        "from unique angle",
        "with vibrant colors",
    ]
    .iter()
    .map(|suffix| format!("{} {}", input, suffix))
    .filter(|s| s.chars().count() < MAX_FALLBACK_SUGGESTION_CHARS)
    .collect()
}

fn has_technical_terms(prompt: &str) -> bool {
    prompt
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|word| {
            let word = word.to_ascii_lowercase();
            TECHNICAL_TERMS.contains(&word.as_str())
        })
}

/// Score a prompt from its length and vocabulary
pub fn fallback_analysis(prompt: &str) -> PromptAnalysis {
    let word_count = prompt.split(' ').count();
    let length = prompt.chars().count();
    let has_specifics = has_technical_terms(prompt);

    let specifics_bonus = if has_specifics { 20 } else { 0 };
    let length_bonus = if length > 50 { 10 } else { 0 };
    let raw = word_count * 3 + specifics_bonus + length_bonus;
    let score = raw.clamp(20, 95) as u8;

    let feedback = vec![
        if word_count < 10 {
            "Consider adding more descriptive details"
        } else {
            "Good detail level"
        },
        if has_specifics {
            "Contains relevant technical terms"
        } else {
            "Could benefit from technical specifications"
        },
        if length > 100 {
            "Good comprehensive description"
        } else {
            "Consider expanding the description"
        },
    ]
    .into_iter()
    .map(String::from)
    .collect();

    PromptAnalysis { score, feedback }
}

pub fn fallback_optimization(idea: &str) -> OptimizationResult {
    OptimizationResult {
        optimized_prompt: format!(
            "Create a high-quality video of {} with professional cinematography and excellent visual composition.",
            idea
        ),
        suggestions: Vec::new(),
        quality_score: 75,
        improvements: vec!["AI optimization unavailable".to_string()],
    }
}

/// Default fragments as cinematic elements, with audio phrased for the model
pub fn fallback_cinematic_elements(model: TargetModel) -> CinematicElements {
    let mut overrides = FragmentOverrides::default();
    if model.supports_native_audio() {
        overrides.audio_cues = Some(
            "ambient room tone, subtle foley, and a restrained score (no subtitles)".to_string(),
        );
    }
    CinematicElements::from(overrides.resolve())
}
