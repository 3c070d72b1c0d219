//! Prompt - Render requests and assembled prompts

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{FragmentOverrides, TargetModel};

/// Longest accepted idea, in characters
pub const MAX_IDEA_CHARS: usize = 100;

/// A validated request to assemble a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PromptRequest {
    pub idea: String,
    pub model: TargetModel,
    #[serde(flatten)]
    pub fragments: FragmentOverrides,
}

impl PromptRequest {
    /// Build a request, rejecting a blank or oversized idea and unknown models.
    pub fn new(
        idea: impl Into<String>,
        model: &str,
        fragments: FragmentOverrides,
    ) -> Result<Self, DomainError> {
        let idea = idea.into();
        validate_idea(&idea)?;
        let model = model
            .parse::<TargetModel>()
            .map_err(|_| DomainError::UnknownModel(model.to_string()))?;

        Ok(Self {
            idea,
            model,
            fragments,
        })
    }
}

/// Check the idea invariant: non-blank and at most [`MAX_IDEA_CHARS`] characters.
pub fn validate_idea(idea: &str) -> Result<(), DomainError> {
    if idea.trim().is_empty() {
        return Err(DomainError::validation("Idea must not be empty"));
    }
    if idea.chars().count() > MAX_IDEA_CHARS {
        return Err(DomainError::validation(format!(
            "Idea must be at most {} characters",
            MAX_IDEA_CHARS
        )));
    }
    Ok(())
}

/// The result of rendering a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPrompt {
    /// The unfilled template that was used
    pub raw_template: String,
    /// The template with every placeholder substituted
    pub assembled_prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_idea() {
        for model in ["veo3", "flow", "runway", "pika", "nope"] {
            let err = PromptRequest::new("", model, FragmentOverrides::default()).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn test_rejects_long_idea() {
        let idea = "x".repeat(MAX_IDEA_CHARS + 1);
        let err = PromptRequest::new(idea, "veo3", FragmentOverrides::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let idea = "é".repeat(MAX_IDEA_CHARS);
        assert!(PromptRequest::new(idea, "veo3", FragmentOverrides::default()).is_ok());
    }

    #[test]
    fn test_rejects_unknown_model() {
        let err = PromptRequest::new("a cat", "sora", FragmentOverrides::default()).unwrap_err();
        assert!(matches!(err, DomainError::UnknownModel(m) if m == "sora"));
    }

    #[test]
    fn test_wire_format_is_flat() {
        let request = PromptRequest::new(
            "a cat",
            "runway",
            FragmentOverrides {
                visual_style: Some("noir".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["idea"], "a cat");
        assert_eq!(json["model"], "runway");
        assert_eq!(json["visualStyle"], "noir");
        assert!(json.get("background").is_none());
    }
}
