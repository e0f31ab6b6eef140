//! Domain Ports - Core trait definitions for add-on operator plugins
//!
//! These traits define the boundaries between the validation engine and the
//! installer that drives it. Every optional add-on implements [`Operator`];
//! the orchestrator only ever sees `Arc<dyn Operator>`.

use crate::domain::cluster::{Cluster, Host};
use crate::domain::validation::{HostRequirements, MonitoredOperator, PreflightRequirements};
use crate::error::{Result, ValidationOutcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

// =============================================================================
// Manifests
// =============================================================================

/// Placeholder for the namespace the operator is installed into
pub const OPERATOR_NAMESPACE: &str = "OPERATOR_NAMESPACE";
/// Placeholder for the OLM subscription name
pub const OPERATOR_SUBSCRIPTION_NAME: &str = "OPERATOR_SUBSCRIPTION_NAME";
/// Placeholder for the catalog source
pub const OPERATOR_SOURCE: &str = "OPERATOR_SOURCE";

/// Values substituted into manifest documents, keyed by placeholder
pub type ManifestValues = BTreeMap<String, String>;

/// Documents an OLM operator needs to get installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ManifestDocument {
    Subscription,
    Namespace,
    OperatorGroup,
    /// Operand custom resource, applied once the operator is running
    CustomResource,
}

impl std::fmt::Display for ManifestDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestDocument::Subscription => write!(f, "subscription"),
            ManifestDocument::Namespace => write!(f, "namespace"),
            ManifestDocument::OperatorGroup => write!(f, "operator-group"),
            ManifestDocument::CustomResource => write!(f, "custom-resource"),
        }
    }
}

/// Rendered manifests of one operator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorManifests {
    /// Installer manifests by file name
    pub openshift: BTreeMap<String, Vec<u8>>,
    /// Cluster-scoped custom resource for the operand
    pub custom: Vec<u8>,
}

/// Port for turning placeholder values into manifest bytes
pub trait ManifestRenderer: Send + Sync {
    /// Render one document
    fn render(&self, document: ManifestDocument, values: &ManifestValues) -> Result<Vec<u8>>;
}

// =============================================================================
// Requirement Calculator Port
// =============================================================================

/// Port for computing an operator's host requirements
pub trait RequirementCalculator: Send + Sync {
    /// Requirements for a host of the given cluster
    fn compute(&self, cluster: &Cluster) -> Result<HostRequirements>;
}

// =============================================================================
// Operator Port
// =============================================================================

/// Capability set every add-on operator plugin exposes
pub trait Operator: Send + Sync {
    /// Name of the operator this plugin manages
    fn name(&self) -> &str;

    /// Operators that must be installed first
    fn dependencies(&self, cluster: &Cluster) -> Vec<String>;

    /// Validation ID reported for cluster-level checks
    fn cluster_validation_id(&self) -> &str;

    /// Validation ID reported for host-level checks
    fn host_validation_id(&self) -> &str;

    /// Check whether the cluster as a whole can run the operator
    fn validate_cluster(&self, cluster: &Cluster) -> ValidationOutcome;

    /// Check whether one host can run the operator
    fn validate_host(&self, cluster: &Cluster, host: &Host) -> ValidationOutcome;

    /// Render installer manifests and the operand custom resource
    fn generate_manifests(&self, cluster: &Cluster) -> Result<OperatorManifests>;

    /// Hardware requirements determinable from cluster data only
    fn preflight_requirements(&self, cluster: &Cluster) -> Result<PreflightRequirements>;

    /// Requirements towards one host
    fn host_requirements(&self, cluster: &Cluster, host: &Host) -> Result<HostRequirements>;

    /// Metadata used to monitor the operator after install
    fn monitored_operator(&self) -> &MonitoredOperator;
}

#[cfg(test)]
impl std::fmt::Debug for dyn Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operator").field("name", &self.name()).finish()
    }
}

// =============================================================================
// Type Aliases for Arc'd Traits
// =============================================================================

pub type OperatorRef = Arc<dyn Operator>;
pub type RequirementCalculatorRef = Arc<dyn RequirementCalculator>;
pub type ManifestRendererRef = Arc<dyn ManifestRenderer>;
