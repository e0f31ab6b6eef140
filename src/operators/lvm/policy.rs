//! Validator Policies
//!
//! The LVM storage operator shipped under two names over time. Both are
//! validated by the same engine; what differs between them lives here.

use crate::domain::inventory::DriveType;
use crate::domain::validation::MonitoredOperator;
use crate::domain::OperatorType;
use crate::hardware::eligibility::DEFAULT_ELIGIBLE_DRIVE_TYPES;
use serde::{Deserialize, Serialize};

// =============================================================================
// Policy Variant
// =============================================================================

/// Which generation of the LVM operator a validator speaks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyVariant {
    /// Current LVM storage operator
    Lvm,
    /// Legacy ODF LVM operator
    OdfLvm,
}

impl PolicyVariant {
    pub fn policy(self) -> ValidatorPolicy {
        match self {
            PolicyVariant::Lvm => ValidatorPolicy::lvm(),
            PolicyVariant::OdfLvm => ValidatorPolicy::odf_lvm(),
        }
    }
}

impl std::fmt::Display for PolicyVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyVariant::Lvm => write!(f, "lvm"),
            PolicyVariant::OdfLvm => write!(f, "odflvm"),
        }
    }
}

impl std::str::FromStr for PolicyVariant {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.to_lowercase().as_str() {
            "lvm" | "lvms" => Ok(PolicyVariant::Lvm),
            "odflvm" | "odf-lvm" => Ok(PolicyVariant::OdfLvm),
            _ => Err(crate::error::Error::OperatorNotFound { name: s.to_string() }),
        }
    }
}

// =============================================================================
// Policy
// =============================================================================

/// Everything that distinguishes one operator generation from another
#[derive(Debug, Clone)]
pub struct ValidatorPolicy {
    pub variant: PolicyVariant,

    /// Oldest platform version the operator supports
    pub min_platform_version: &'static str,

    /// Drive types that can back the volume group
    pub eligible_drive_types: &'static [DriveType],

    /// Cores required when the administrator configured none
    pub default_cpu_cores: u64,

    /// Memory required when the administrator configured none
    pub default_ram_mib: u64,

    pub cluster_validation_id: &'static str,
    pub host_validation_id: &'static str,

    /// Prefix of rendered manifest file names
    pub manifest_prefix: &'static str,

    /// Catalog source the subscription installs from
    pub catalog_source: &'static str,

    /// Package pinned by the subscription, if any
    pub starting_csv: Option<&'static str>,

    pub monitored: MonitoredOperator,
    pub messages: PolicyMessages,
}

/// User-facing reasons that differ between generations
#[derive(Debug, Clone)]
pub struct PolicyMessages {
    pub topology_unsupported: String,
    pub version_unsupported: String,
    pub insufficient_disks: String,
    pub disk_qualitative: String,
    /// Formats (required, found) core counts
    pub insufficient_cpu: fn(u64, u64) -> String,
    /// Formats (required, found) memory in MiB
    pub insufficient_memory: fn(u64, u64) -> String,
}

impl ValidatorPolicy {
    /// Current LVM storage operator
    pub fn lvm() -> Self {
        let min_platform_version = "4.12.0";
        Self {
            variant: PolicyVariant::Lvm,
            min_platform_version,
            eligible_drive_types: DEFAULT_ELIGIBLE_DRIVE_TYPES,
            default_cpu_cores: 1,
            default_ram_mib: 1200,
            cluster_validation_id: "lvm-requirements-satisfied",
            host_validation_id: "lvm-requirements-satisfied",
            manifest_prefix: "lvm",
            catalog_source: "redhat-operators",
            starting_csv: None,
            monitored: MonitoredOperator {
                name: "lvm".to_string(),
                operator_type: OperatorType::Olm,
                namespace: "openshift-storage".to_string(),
                subscription_name: "odf-lvm-operator".to_string(),
                timeout_seconds: 30 * 60,
            },
            messages: PolicyMessages {
                topology_unsupported:
                    "ODF LVM operator is only supported for Single Node Openshift deployment"
                        .to_string(),
                version_unsupported: format!(
                    "ODF LVM operator is only supported for openshift versions {} and above",
                    min_platform_version
                ),
                insufficient_disks:
                    "Insufficient disks, ODF LVM requires at least one non-installation disk on the host"
                        .to_string(),
                disk_qualitative:
                    "At least 1 non-installation disk with no partitions or filesystems".to_string(),
                insufficient_cpu: |required, found| {
                    format!(
                        "Insufficient CPU to deploy ODF LVM. The required CPU count is {} but found {}",
                        required, found
                    )
                },
                insufficient_memory: |required, found| {
                    format!(
                        "Insufficient memory to deploy ODF LVM. The required memory is {} MiB but found {} MiB",
                        required, found
                    )
                },
            },
        }
    }

    /// Legacy ODF LVM operator
    pub fn odf_lvm() -> Self {
        let min_platform_version = "4.10.0";
        Self {
            variant: PolicyVariant::OdfLvm,
            min_platform_version,
            eligible_drive_types: DEFAULT_ELIGIBLE_DRIVE_TYPES,
            default_cpu_cores: 0,
            default_ram_mib: 0,
            cluster_validation_id: "odf-lvm-requirements-satisfied",
            host_validation_id: "odf-lvm-requirements-satisfied",
            manifest_prefix: "odflvm",
            catalog_source: "redhat-operators",
            starting_csv: Some("odf-lvm-operator.v4.10.0"),
            monitored: MonitoredOperator {
                name: "odflvm".to_string(),
                operator_type: OperatorType::Olm,
                namespace: "openshift-storage".to_string(),
                subscription_name: "odf-lvm-operator".to_string(),
                timeout_seconds: 70 * 60,
            },
            messages: PolicyMessages {
                topology_unsupported:
                    "ODF LVM operator is only supported for Single Node Openshift deployment"
                        .to_string(),
                version_unsupported: format!(
                    "ODF LVM operator is only supported for openshift versions {} and above",
                    min_platform_version
                ),
                insufficient_disks:
                    "Insufficient disks, ODF LVM requires at least one non-bootable disk on the host"
                        .to_string(),
                disk_qualitative:
                    "At least 1 non-bootable disk with no partitions or filesystems".to_string(),
                insufficient_cpu: |required, found| {
                    format!(
                        "Insufficient CPU to deploy ODF LVM. Required CPU count is {} but found {}",
                        required, found
                    )
                },
                insufficient_memory: |required, found| {
                    format!(
                        "Insufficient memory to deploy ODF LVM. Required memory is {} MiB but found {} MiB",
                        required, found
                    )
                },
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.monitored.name
    }
}

impl Default for ValidatorPolicy {
    fn default() -> Self {
        Self::lvm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlatformVersion;

    #[test]
    fn test_variant_round_trip_names() {
        assert_eq!("lvm".parse::<PolicyVariant>().unwrap(), PolicyVariant::Lvm);
        assert_eq!("ODF-LVM".parse::<PolicyVariant>().unwrap(), PolicyVariant::OdfLvm);
        assert!("lso".parse::<PolicyVariant>().is_err());
        assert_eq!(PolicyVariant::OdfLvm.to_string(), "odflvm");
    }

    #[test]
    fn test_policies_differ_where_expected() {
        let current = PolicyVariant::Lvm.policy();
        let legacy = PolicyVariant::OdfLvm.policy();

        assert_ne!(current.name(), legacy.name());
        assert_ne!(current.host_validation_id, legacy.host_validation_id);
        assert_eq!(current.monitored.timeout_seconds, 30 * 60);
        assert_eq!(legacy.monitored.timeout_seconds, 70 * 60);
        assert!(current.messages.version_unsupported.contains("4.12.0"));
        assert_eq!(
            (legacy.messages.insufficient_cpu)(2, 1),
            "Insufficient CPU to deploy ODF LVM. Required CPU count is 2 but found 1"
        );
        assert_eq!(
            (current.messages.insufficient_memory)(1200, 1199),
            "Insufficient memory to deploy ODF LVM. The required memory is 1200 MiB but found 1199 MiB"
        );
    }

    #[test]
    fn test_minimum_versions_parse() {
        for variant in [PolicyVariant::Lvm, PolicyVariant::OdfLvm] {
            assert!(PlatformVersion::parse(variant.policy().min_platform_version).is_ok());
        }
    }
}
