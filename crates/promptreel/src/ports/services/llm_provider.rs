//! Generative Service Port
//!
//! Abstract interface for the external language-generation service.
//! The core only needs "system instruction + user instruction in, text out".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Options for a completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Provider model override (e.g. "gpt-4o-mini")
    pub model: Option<String>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Ask the provider for a single JSON object
    pub json_response: bool,
}

impl CompletionOptions {
    pub fn new(model: &str, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model: Some(model.to_string()),
            max_tokens: Some(max_tokens),
            temperature: Some(temperature),
            json_response: false,
        }
    }

    pub fn json(mut self) -> Self {
        self.json_response = true;
        self
    }
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: Some(1024),
            temperature: Some(0.7),
            json_response: false,
        }
    }
}

/// Response from a completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: TokenUsage,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// External generative-language service
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Generate a completion from messages
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError>;

    /// System instruction + user instruction, returning non-empty text
    async fn instruct(
        &self,
        system: &str,
        user: &str,
        options: &CompletionOptions,
    ) -> Result<String, DomainError> {
        let messages = vec![ChatMessage::system(system), ChatMessage::user(user)];
        let response = self.complete(&messages, options).await?;
        let content = response.content.trim();
        if content.is_empty() {
            return Err(DomainError::InvalidResponse(
                "Empty completion content".to_string(),
            ));
        }
        Ok(content.to_string())
    }

    /// Get the provider name (e.g., "openai")
    fn provider_name(&self) -> &str;
}
