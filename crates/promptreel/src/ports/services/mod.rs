//! Service Ports
//!
//! Abstract interfaces for external services.

mod assistant;
mod clock;
mod environment;
mod llm_provider;

pub use assistant::*;
pub use clock::*;
pub use environment::*;
pub use llm_provider::*;
