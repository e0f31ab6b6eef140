//! LVM Operator Plugin
//!
//! Implements the [`Operator`] port for both generations of the LVM storage
//! operator.

use super::manifests::{render_manifests, YamlManifestRenderer};
use super::policy::{PolicyVariant, ValidatorPolicy};
use super::requirements::{ConfiguredRequirements, LvmConfig};
use super::validator::StorageValidator;
use crate::domain::cluster::{Cluster, Host};
use crate::domain::ports::{
    ManifestRendererRef, Operator, OperatorManifests, RequirementCalculatorRef,
};
use crate::domain::validation::{
    HostRequirements, HostTypeRequirements, MonitoredOperator, PreflightRequirements,
};
use crate::error::{Result, ValidationOutcome};
use std::sync::Arc;
use tracing::error;

/// LVM operator installation plugin
pub struct LvmOperator {
    validator: StorageValidator,
    requirements: RequirementCalculatorRef,
    renderer: ManifestRendererRef,
}

impl LvmOperator {
    /// Create a plugin for the given generation with administrator overrides
    pub fn new(variant: PolicyVariant, config: LvmConfig) -> Self {
        let policy = variant.policy();
        let requirements: RequirementCalculatorRef =
            Arc::new(ConfiguredRequirements::new(config, &policy));
        let renderer = match policy.starting_csv {
            Some(csv) => YamlManifestRenderer::new().with_starting_csv(csv),
            None => YamlManifestRenderer::new(),
        };
        Self::with_parts(policy, requirements, Arc::new(renderer))
    }

    /// Assemble a plugin from explicit collaborators
    pub fn with_parts(
        policy: ValidatorPolicy,
        requirements: RequirementCalculatorRef,
        renderer: ManifestRendererRef,
    ) -> Self {
        Self {
            validator: StorageValidator::new(policy, requirements.clone()),
            requirements,
            renderer,
        }
    }

    pub fn policy(&self) -> &ValidatorPolicy {
        self.validator.policy()
    }
}

impl Operator for LvmOperator {
    fn name(&self) -> &str {
        self.policy().name()
    }

    fn dependencies(&self, _cluster: &Cluster) -> Vec<String> {
        Vec::new()
    }

    fn cluster_validation_id(&self) -> &str {
        self.policy().cluster_validation_id
    }

    fn host_validation_id(&self) -> &str {
        self.policy().host_validation_id
    }

    fn validate_cluster(&self, cluster: &Cluster) -> ValidationOutcome {
        self.validator.validate_cluster(cluster)
    }

    fn validate_host(&self, cluster: &Cluster, host: &Host) -> ValidationOutcome {
        self.validator.validate_host(cluster, host)
    }

    fn generate_manifests(&self, _cluster: &Cluster) -> Result<OperatorManifests> {
        render_manifests(self.policy(), self.renderer.as_ref())
    }

    fn preflight_requirements(&self, cluster: &Cluster) -> Result<PreflightRequirements> {
        Ok(PreflightRequirements {
            operator_name: self.name().to_string(),
            dependencies: self.dependencies(cluster),
            requirements: HostTypeRequirements {
                master: self.requirements.compute(cluster)?,
                worker: HostRequirements::default(),
            },
        })
    }

    fn host_requirements(&self, cluster: &Cluster, host: &Host) -> Result<HostRequirements> {
        self.preflight_requirements(cluster)
            .map(|preflight| preflight.requirements.master)
            .map_err(|e| {
                error!(
                    cluster = %cluster.id,
                    host = %host.id,
                    error = %e,
                    "cannot retrieve preflight requirements"
                );
                e
            })
    }

    fn monitored_operator(&self) -> &MonitoredOperator {
        &self.policy().monitored
    }
}
