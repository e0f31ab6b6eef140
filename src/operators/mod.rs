//! Add-on Operator Plugins
//!
//! Provides plugins for optional operators installed alongside the cluster:
//! - LVM: current LVM storage operator
//! - ODF LVM: legacy generation of the same operator

pub mod lvm;

pub use lvm::*;

use crate::domain::ports::{OperatorManifests, OperatorRef};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Factory for creating operator plugins
pub struct OperatorFactory;

impl OperatorFactory {
    /// Create a plugin by name
    pub fn create(name: &str, config: OperatorsConfig) -> Result<OperatorRef> {
        let variant: PolicyVariant = name.parse()?;
        Ok(Self::for_variant(variant, config))
    }

    /// Create the plugin for a policy variant
    pub fn for_variant(variant: PolicyVariant, config: OperatorsConfig) -> OperatorRef {
        match variant {
            PolicyVariant::Lvm => Arc::new(LvmOperator::new(variant, config.lvm)),
            PolicyVariant::OdfLvm => Arc::new(LvmOperator::new(variant, config.odf_lvm)),
        }
    }

    /// Create every known plugin
    pub fn all(config: OperatorsConfig) -> Vec<OperatorRef> {
        [PolicyVariant::Lvm, PolicyVariant::OdfLvm]
            .into_iter()
            .map(|variant| Self::for_variant(variant, config))
            .collect()
    }
}

/// Combined operator configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatorsConfig {
    pub lvm: LvmConfig,
    pub odf_lvm: LvmConfig,
}

/// Write rendered manifests of one operator into `dir`.
///
/// Installer manifests keep their names; the operand custom resource goes to
/// `<operator>_custom_resource.yaml`. Returns the written paths in order.
pub fn write_manifests(
    dir: &Path,
    operator: &str,
    manifests: &OperatorManifests,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(manifests.openshift.len() + 1);
    for (name, content) in &manifests.openshift {
        let path = dir.join(name);
        fs::write(&path, content)?;
        written.push(path);
    }

    let custom = dir.join(format!("{}_custom_resource.yaml", operator));
    fs::write(&custom, &manifests.custom)?;
    written.push(custom);

    debug!(dir = %dir.display(), files = written.len(), "manifests written");
    Ok(written)
}
