//! LVM Readiness - Storage Add-on Readiness Validator
//!
//! Decides whether a cluster and each of its hosts can run the LVM storage
//! operator (and its legacy ODF LVM generation), computes the hardware the
//! operator needs, and renders the manifests that install it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                          Validation Orchestrator                            │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────────┐  │
//! │  │    REST API     │  │     Metrics     │  │     Operator Registry       │  │
//! │  │     (axum)      │  │  (prometheus)   │  │  (dependency resolution)    │  │
//! │  └────────┬────────┘  └────────┬────────┘  └─────────────┬───────────────┘  │
//! │           └────────────────────┼─────────────────────────┘                  │
//! ├────────────────────────────────┼────────────────────────────────────────────┤
//! │                        Operator Plugins                                     │
//! │  ┌─────────────────────────────┴───────────────────────────────────────┐    │
//! │  │  LvmOperator ── StorageValidator ── RequirementCalculator           │    │
//! │  │        │              │                                             │    │
//! │  │        │       ValidatorPolicy (lvm / odflvm)                       │    │
//! │  │        └── ManifestRenderer (Subscription, Namespace, LVMCluster)   │    │
//! │  └─────────────────────────────────────────────────────────────────────┘    │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                  Domain: Cluster, Host, Inventory, Verdicts                 │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`controlplane`]: Orchestrator, operator registry, metrics and REST API
//! - [`operators`]: Operator plugins and the LVM validator
//! - [`hardware`]: Disk eligibility and unit conversions
//! - [`crd`]: Typed resources rendered into install manifests
//! - [`domain`]: Core domain types and ports
//! - [`error`]: Error types and handling

pub mod controlplane;
pub mod crd;
pub mod domain;
pub mod error;
pub mod hardware;
pub mod operators;

// Re-export commonly used types
pub use controlplane::{
    ApiServer, ApiServerConfig, InstallabilityReport, OperatorRegistry, Orchestrator,
    RestRouter, ValidationLevel, ValidationMetrics,
};

pub use crd::{LvmCluster, LvmClusterSpec, OperatorGroup, Subscription};

pub use domain::{
    Cluster, HighAvailabilityMode, Host, HostRequirements, Inventory, ManifestRenderer,
    MonitoredOperator, Operator, OperatorManifests, OperatorRef, PlatformVersion,
    PreflightRequirements, RequirementCalculator, ValidationResult, ValidationStatus,
};

pub use error::{Error, ErrorAction, Result, ValidationError, ValidationOutcome};

pub use hardware::DiskEligibility;

pub use operators::{
    LvmConfig, LvmOperator, OperatorFactory, OperatorsConfig, PolicyVariant, StorageValidator,
    ValidatorPolicy,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
