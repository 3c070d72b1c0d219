//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod fragments;
mod target_model;

pub use fragments::*;
pub use target_model::*;
