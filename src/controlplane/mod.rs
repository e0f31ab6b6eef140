//! Control Plane Module
//!
//! Coordinates the registered operator plugins: dependency resolution,
//! validation runs, metrics and the REST API that exposes them.

pub mod orchestrator;
pub mod api;
pub mod metrics;
pub mod registry;

pub use orchestrator::*;
pub use api::*;
pub use metrics::*;
pub use registry::*;
