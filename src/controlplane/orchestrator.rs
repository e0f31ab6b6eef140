//! Validation Orchestrator
//!
//! Coordinates readiness checks across the registered operators:
//! - Dependency resolution for the requested operators
//! - Cluster and host validation with metrics
//! - Preflight requirements and manifest generation
//! - Aggregated installability reports

use crate::controlplane::metrics::{ValidationLevel, ValidationMetrics};
use crate::controlplane::registry::OperatorRegistry;
use crate::domain::cluster::{Cluster, Host};
use crate::domain::ports::{OperatorManifests, OperatorRef};
use crate::domain::validation::{PreflightRequirements, ValidationResult, ValidationStatus};
use crate::error::{Result, ValidationOutcome};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info};

// =============================================================================
// Installability Report
// =============================================================================

/// Combined verdicts for installing a set of operators on a cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallabilityReport {
    pub cluster_id: String,
    /// True iff `status` is success
    pub installable: bool,
    pub status: ValidationStatus,
    /// Operators evaluated, dependencies first
    pub operators: Vec<String>,
    pub cluster: Vec<ValidationResult>,
    /// Host verdicts keyed by host id
    pub hosts: BTreeMap<String, Vec<ValidationResult>>,
}

impl InstallabilityReport {
    /// Every verdict in the report, cluster verdicts first
    pub fn verdicts(&self) -> impl Iterator<Item = &ValidationResult> {
        self.cluster.iter().chain(self.hosts.values().flatten())
    }

    /// Reasons of all verdicts that are not successful
    pub fn blocking_reasons(&self) -> Vec<&str> {
        self.verdicts()
            .filter(|v| !v.is_success())
            .flat_map(|v| v.reasons.iter().map(String::as_str))
            .collect()
    }
}

/// Failure dominates pending, pending dominates success
pub fn overall_status<'a>(
    verdicts: impl IntoIterator<Item = &'a ValidationResult>,
) -> ValidationStatus {
    let mut status = ValidationStatus::Success;
    for verdict in verdicts {
        match verdict.status {
            ValidationStatus::Failure => return ValidationStatus::Failure,
            ValidationStatus::Pending => status = ValidationStatus::Pending,
            ValidationStatus::Success => {}
        }
    }
    status
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Runs readiness checks for registered operators
pub struct Orchestrator {
    registry: Arc<OperatorRegistry>,
    metrics: ValidationMetrics,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(registry: Arc<OperatorRegistry>, metrics: ValidationMetrics) -> Arc<Self> {
        info!(operators = registry.len(), "creating orchestrator");
        Arc::new(Self { registry, metrics })
    }

    pub fn registry(&self) -> &Arc<OperatorRegistry> {
        &self.registry
    }

    pub fn metrics(&self) -> &ValidationMetrics {
        &self.metrics
    }

    /// Cluster verdict of every requested operator and its dependencies
    pub fn validate_cluster(
        &self,
        cluster: &Cluster,
        names: &[String],
    ) -> Result<Vec<ValidationResult>> {
        let operators = self.registry.resolve_dependencies(cluster, names)?;
        Ok(operators
            .iter()
            .map(|operator| self.cluster_verdict(operator, cluster))
            .collect())
    }

    /// Host verdict of every requested operator and its dependencies
    pub fn validate_host(
        &self,
        cluster: &Cluster,
        host: &Host,
        names: &[String],
    ) -> Result<Vec<ValidationResult>> {
        let operators = self.registry.resolve_dependencies(cluster, names)?;
        Ok(operators
            .iter()
            .map(|operator| self.host_verdict(operator, cluster, host))
            .collect())
    }

    /// Run one operator's cluster validation and record the outcome
    pub fn cluster_outcome(&self, operator: &OperatorRef, cluster: &Cluster) -> ValidationOutcome {
        let outcome = operator.validate_cluster(cluster);
        self.observe(operator.name(), ValidationLevel::Cluster, &outcome);
        outcome
    }

    /// Run one operator's host validation and record the outcome
    pub fn host_outcome(
        &self,
        operator: &OperatorRef,
        cluster: &Cluster,
        host: &Host,
    ) -> ValidationOutcome {
        let outcome = operator.validate_host(cluster, host);
        self.observe(operator.name(), ValidationLevel::Host, &outcome);
        outcome
    }

    pub fn preflight_requirements(
        &self,
        cluster: &Cluster,
        names: &[String],
    ) -> Result<Vec<PreflightRequirements>> {
        self.registry
            .resolve_dependencies(cluster, names)?
            .iter()
            .map(|operator| operator.preflight_requirements(cluster))
            .collect()
    }

    /// Rendered manifests keyed by operator name
    pub fn generate_manifests(
        &self,
        cluster: &Cluster,
        names: &[String],
    ) -> Result<IndexMap<String, OperatorManifests>> {
        let mut manifests = IndexMap::new();
        for operator in self.registry.resolve_dependencies(cluster, names)? {
            let rendered = operator.generate_manifests(cluster)?;
            debug!(
                operator = operator.name(),
                documents = rendered.openshift.len(),
                "manifests generated"
            );
            manifests.insert(operator.name().to_string(), rendered);
        }
        Ok(manifests)
    }

    /// Cluster and per-host verdicts folded into one report
    pub fn installability(
        &self,
        cluster: &Cluster,
        names: &[String],
    ) -> Result<InstallabilityReport> {
        let operators = self.registry.resolve_dependencies(cluster, names)?;

        let cluster_verdicts: Vec<ValidationResult> = operators
            .iter()
            .map(|operator| self.cluster_verdict(operator, cluster))
            .collect();

        let mut hosts = BTreeMap::new();
        for host in &cluster.hosts {
            let verdicts: Vec<ValidationResult> = operators
                .iter()
                .map(|operator| self.host_verdict(operator, cluster, host))
                .collect();
            hosts.insert(host.id.clone(), verdicts);
        }

        let status = overall_status(cluster_verdicts.iter().chain(hosts.values().flatten()));
        let report = InstallabilityReport {
            cluster_id: cluster.id.clone(),
            installable: status == ValidationStatus::Success,
            status,
            operators: operators.iter().map(|op| op.name().to_string()).collect(),
            cluster: cluster_verdicts,
            hosts,
        };

        info!(
            cluster = %cluster.id,
            status = %report.status,
            operators = report.operators.len(),
            hosts = report.hosts.len(),
            "installability evaluated"
        );
        Ok(report)
    }

    fn cluster_verdict(&self, operator: &OperatorRef, cluster: &Cluster) -> ValidationResult {
        match self.cluster_outcome(operator, cluster) {
            Ok(result) => result,
            Err(err) => err.into_result(),
        }
    }

    fn host_verdict(
        &self,
        operator: &OperatorRef,
        cluster: &Cluster,
        host: &Host,
    ) -> ValidationResult {
        match self.host_outcome(operator, cluster, host) {
            Ok(result) => result,
            Err(err) => err.into_result(),
        }
    }

    fn observe(&self, operator: &str, level: ValidationLevel, outcome: &ValidationOutcome) {
        let verdict = match outcome {
            Ok(result) => result,
            Err(err) => {
                error!(
                    operator,
                    level = level.as_str(),
                    validation = %err.result.validation_id,
                    error = %err.source,
                    "validation surfaced an error"
                );
                self.metrics.record_error(operator, level);
                &err.result
            }
        };

        if !verdict.is_success() {
            debug!(
                operator,
                level = level.as_str(),
                status = %verdict.status,
                reasons = ?verdict.reasons,
                "requirements not met"
            );
        }
        self.metrics.record(operator, level, verdict.status);
    }
}
