//! Application Layer (Use Cases)
//!
//! Orchestrates domain services and the assistant routes: the request gate
//! for network renders and the environment router for everything else.

pub mod gate;
mod router;

pub use gate::{GateConfig, GateStore, RequestGate};
pub use router::{EnvironmentRouter, Operation, Routed, DEFAULT_ROUTE_TIMEOUT};
