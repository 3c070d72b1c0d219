//! Adapters
//!
//! Implementations of the service ports that live in the library:
//! the OpenAI chat-completions client, the direct generative route and
//! the deterministic local route.

pub mod assistant;
pub mod local;
pub mod openai;

// Re-exports
pub use assistant::GenerativeAssistant;
pub use local::LocalFallback;
pub use openai::{OpenAiProvider, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
