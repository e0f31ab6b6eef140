//! Domain layer - Core value types and port definitions
//!
//! This module defines the inventory, cluster and verdict types plus the
//! traits (ports) that operator plugins implement, following hexagonal
//! architecture principles.

pub mod cluster;
pub mod inventory;
pub mod ports;
pub mod validation;
pub mod version;

pub use cluster::*;
pub use inventory::*;
pub use ports::*;
pub use validation::*;
pub use version::*;
