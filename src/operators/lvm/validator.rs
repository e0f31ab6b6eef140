//! Storage Validator
//!
//! Single-shot readiness checks for the LVM operator. Each call runs a fixed
//! sequence of checks and stops at the first one that fails.

use super::policy::ValidatorPolicy;
use crate::domain::cluster::{Cluster, Host};
use crate::domain::inventory::Inventory;
use crate::domain::ports::RequirementCalculatorRef;
use crate::domain::validation::ValidationResult;
use crate::domain::version::PlatformVersion;
use crate::error::{ValidationError, ValidationOutcome};
use crate::hardware::eligibility::DiskEligibility;
use crate::hardware::units::{bytes_to_mib, mib_to_bytes};
use tracing::debug;

/// Reason reported while the discovery agent has not sent an inventory
pub const MISSING_INVENTORY: &str = "Missing Inventory in the host";

/// Reason reported when the inventory document can't be read
pub const UNREADABLE_INVENTORY: &str = "Failed to get inventory from host";

/// Cluster- and host-level readiness checks driven by a [`ValidatorPolicy`]
pub struct StorageValidator {
    policy: ValidatorPolicy,
    requirements: RequirementCalculatorRef,
}

impl StorageValidator {
    pub fn new(policy: ValidatorPolicy, requirements: RequirementCalculatorRef) -> Self {
        Self {
            policy,
            requirements,
        }
    }

    pub fn policy(&self) -> &ValidatorPolicy {
        &self.policy
    }

    /// Topology first, then platform version.
    ///
    /// Never returns `Err`: a malformed version is reported as a failed
    /// verdict carrying the parse error.
    pub fn validate_cluster(&self, cluster: &Cluster) -> ValidationOutcome {
        let id = self.policy.cluster_validation_id;

        if !cluster.is_single_node() {
            debug!(
                cluster = %cluster.id,
                mode = %cluster.high_availability_mode,
                "topology unsupported"
            );
            return Ok(ValidationResult::failure(
                id,
                [self.policy.messages.topology_unsupported.as_str()],
            ));
        }

        let cluster_version = match PlatformVersion::parse(&cluster.openshift_version) {
            Ok(v) => v,
            Err(e) => return Ok(ValidationResult::failure(id, [e.to_string()])),
        };
        let minimum = match PlatformVersion::parse(self.policy.min_platform_version) {
            Ok(v) => v,
            Err(e) => return Ok(ValidationResult::failure(id, [e.to_string()])),
        };

        if cluster_version < minimum {
            debug!(
                cluster = %cluster.id,
                version = %cluster_version,
                minimum = %minimum,
                "platform version below minimum"
            );
            return Ok(ValidationResult::failure(
                id,
                [self.policy.messages.version_unsupported.as_str()],
            ));
        }

        Ok(ValidationResult::success(id))
    }

    /// Inventory presence, inventory shape, disks, then CPU and memory
    pub fn validate_host(&self, cluster: &Cluster, host: &Host) -> ValidationOutcome {
        let id = self.policy.host_validation_id;

        let Some(raw) = host.reported_inventory() else {
            return Ok(ValidationResult::pending(id, MISSING_INVENTORY));
        };

        let inventory = match Inventory::parse(raw) {
            Ok(inventory) => inventory,
            Err(e) => {
                return Err(ValidationError::new(
                    ValidationResult::failure(id, [UNREADABLE_INVENTORY]),
                    e,
                ))
            }
        };

        let eligible = DiskEligibility::new(self.policy.eligible_drive_types)
            .count(&inventory.disks, &host.installation_disk_id);
        if eligible == 0 {
            debug!(host = %host.id, disks = inventory.disks.len(), "no eligible disks");
            return Ok(ValidationResult::failure(
                id,
                [self.policy.messages.insufficient_disks.as_str()],
            ));
        }

        let requirements = match self.requirements.compute(cluster) {
            Ok(requirements) => requirements,
            Err(e) => {
                let message = format!(
                    "Failed to get the host requirements for host with id {}",
                    host.id
                );
                let result = ValidationResult::failure(id, [message, e.to_string()]);
                return Err(ValidationError::new(result, e));
            }
        };

        let cpu = requirements.cpu_cores;
        if inventory.cpu_core_count() < cpu {
            let message = (self.policy.messages.insufficient_cpu)(cpu, inventory.cpu_core_count());
            return Ok(ValidationResult::failure(id, [message]));
        }

        let memory_mib = requirements.ram_mib;
        if inventory.usable_memory_bytes() < mib_to_bytes(memory_mib) {
            let found_mib = bytes_to_mib(inventory.usable_memory_bytes());
            let message = (self.policy.messages.insufficient_memory)(memory_mib, found_mib);
            return Ok(ValidationResult::failure(id, [message]));
        }

        Ok(ValidationResult::success(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cluster::HighAvailabilityMode;
    use crate::domain::inventory::{Cpu, Disk, DriveType, Memory};
    use crate::domain::ports::RequirementCalculator;
    use crate::domain::validation::{HostRequirements, ValidationStatus};
    use crate::error::{Error, Result};
    use crate::hardware::units::{GB, GIB, MIB};
    use crate::operators::lvm::requirements::{ConfiguredRequirements, LvmConfig};
    use assert_matches::assert_matches;
    use std::sync::Arc;

    const DISK_1: &str = "/dev/disk/by-id/test-disk-1";
    const DISK_2: &str = "/dev/disk/by-id/test-disk-2";

    fn validator(policy: ValidatorPolicy) -> StorageValidator {
        let requirements = ConfiguredRequirements::new(LvmConfig::default(), &policy);
        StorageValidator::new(policy, Arc::new(requirements))
    }

    fn host_with(cpus: u64, ram: u64, disks: Vec<Disk>) -> Host {
        let inventory = Inventory {
            cpu: Cpu { count: cpus },
            memory: Memory { usable_bytes: ram },
            disks,
        };
        Host::new("host-1")
            .with_installation_disk(DISK_1)
            .with_inventory(inventory.to_json().unwrap())
    }

    fn two_disks() -> Vec<Disk> {
        vec![
            Disk {
                id: DISK_1.into(),
                size_bytes: 20 * GB,
                drive_type: DriveType::Hdd,
            },
            Disk {
                id: DISK_2.into(),
                size_bytes: 40 * GB,
                drive_type: DriveType::Ssd,
            },
        ]
    }

    fn sno(version: &str) -> Cluster {
        Cluster {
            id: "cluster-1".into(),
            high_availability_mode: HighAvailabilityMode::None,
            openshift_version: version.into(),
            hosts: Vec::new(),
        }
    }

    struct FailingRequirements;

    impl RequirementCalculator for FailingRequirements {
        fn compute(&self, _cluster: &Cluster) -> Result<HostRequirements> {
            Err(Error::RequirementsUnavailable {
                operator: "lvm".into(),
                reason: "cluster state unavailable".into(),
            })
        }
    }

    // -------------------------------------------------------------------------
    // Host validation
    // -------------------------------------------------------------------------

    #[test]
    fn test_host_without_inventory_is_pending() {
        let v = validator(ValidatorPolicy::lvm());
        for host in [Host::new("h"), Host::new("h").with_inventory("")] {
            let result = v.validate_host(&sno("4.12.0"), &host).unwrap();
            assert_eq!(
                result,
                ValidationResult::pending("lvm-requirements-satisfied", MISSING_INVENTORY)
            );
        }
    }

    #[test]
    fn test_host_with_unreadable_inventory_fails_with_error() {
        let v = validator(ValidatorPolicy::lvm());
        let host = Host::new("h").with_inventory("{not-json");

        let err = v.validate_host(&sno("4.12.0"), &host).unwrap_err();
        assert_matches!(err.source, Error::InventoryParse(_));
        assert_eq!(err.result.status, ValidationStatus::Failure);
        assert_eq!(err.result.reasons, vec![UNREADABLE_INVENTORY.to_string()]);
    }

    #[test]
    fn test_host_with_insufficient_disks() {
        let v = validator(ValidatorPolicy::lvm());
        let only_install_disk = vec![two_disks().remove(0)];
        // Plenty of CPU and memory does not help
        let host = host_with(64, 256 * GIB, only_install_disk);

        let result = v.validate_host(&sno("4.12.0"), &host).unwrap();
        assert_eq!(
            result,
            ValidationResult::failure(
                "lvm-requirements-satisfied",
                ["Insufficient disks, ODF LVM requires at least one non-installation disk on the host"]
            )
        );
    }

    #[test]
    fn test_host_with_insufficient_cpu() {
        let v = validator(ValidatorPolicy::lvm());
        let host = host_with(0, 32 * GIB, two_disks());

        let result = v.validate_host(&sno("4.12.0"), &host).unwrap();
        assert_eq!(
            result.reasons,
            vec!["Insufficient CPU to deploy ODF LVM. The required CPU count is 1 but found 0"]
        );
    }

    #[test]
    fn test_host_with_insufficient_ram() {
        let v = validator(ValidatorPolicy::lvm());
        let host = host_with(12, 1199 * MIB, two_disks());

        let result = v.validate_host(&sno("4.12.0"), &host).unwrap();
        assert_eq!(result.status, ValidationStatus::Failure);
        assert_eq!(
            result.reasons,
            vec!["Insufficient memory to deploy ODF LVM. The required memory is 1200 MiB but found 1199 MiB"]
        );
    }

    #[test]
    fn test_host_with_exact_requirements_passes() {
        let v = validator(ValidatorPolicy::lvm());
        let host = host_with(1, 1200 * MIB, two_disks());

        let result = v.validate_host(&sno("4.12.0"), &host).unwrap();
        assert!(result.is_success());
    }

    #[test]
    fn test_host_with_sufficient_resources() {
        let v = validator(ValidatorPolicy::lvm());
        let host = host_with(
            12,
            32 * GIB,
            vec![Disk {
                id: DISK_2.into(),
                size_bytes: 50 * GB,
                drive_type: DriveType::Ssd,
            }],
        );

        let result = v.validate_host(&sno("4.12.0"), &host).unwrap();
        assert_eq!(result, ValidationResult::success("lvm-requirements-satisfied"));
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_host_with_null_disks_has_insufficient_disks() {
        let v = validator(ValidatorPolicy::lvm());
        let host = Host::new("h").with_inventory(
            r#"{"cpu":{"count":12},"memory":{"usable_bytes":34359738368},"disks":null}"#,
        );

        let result = v.validate_host(&sno("4.12.0"), &host).unwrap();
        assert_eq!(
            result,
            ValidationResult::failure(
                "lvm-requirements-satisfied",
                ["Insufficient disks, ODF LVM requires at least one non-installation disk on the host"]
            )
        );
    }

    #[test]
    fn test_requirement_failure_is_propagated() {
        let v = StorageValidator::new(ValidatorPolicy::lvm(), Arc::new(FailingRequirements));
        let host = host_with(12, 32 * GIB, two_disks());

        let err = v.validate_host(&sno("4.12.0"), &host).unwrap_err();
        assert_matches!(err.source, Error::RequirementsUnavailable { .. });
        assert_eq!(err.result.reasons.len(), 2);
        assert_eq!(
            err.result.reasons[0],
            "Failed to get the host requirements for host with id host-1"
        );
        assert!(err.result.reasons[1].contains("cluster state unavailable"));
    }

    #[test]
    fn test_disk_check_precedes_requirements() {
        let v = StorageValidator::new(ValidatorPolicy::lvm(), Arc::new(FailingRequirements));
        let host = host_with(12, 32 * GIB, Vec::new());

        let result = v.validate_host(&sno("4.12.0"), &host).unwrap();
        assert_eq!(result.status, ValidationStatus::Failure);
    }

    #[test]
    fn test_legacy_policy_wording() {
        let v = validator(ValidatorPolicy::odf_lvm());
        let host = host_with(0, 0, Vec::new());

        let result = v.validate_host(&sno("4.10.0"), &host).unwrap();
        assert_eq!(result.validation_id, "odf-lvm-requirements-satisfied");
        assert!(result.reasons[0].contains("non-bootable"));

        // No default requirements for the legacy operator
        let host = host_with(0, 0, two_disks());
        assert!(v.validate_host(&sno("4.10.0"), &host).unwrap().is_success());
    }

    #[test]
    fn test_legacy_policy_resource_wording() {
        let config = LvmConfig {
            cpu_per_host: Some(2),
            memory_mib_per_host: Some(1200),
        };
        let policy = ValidatorPolicy::odf_lvm();
        let requirements = ConfiguredRequirements::new(config, &policy);
        let v = StorageValidator::new(policy, Arc::new(requirements));

        let host = host_with(1, 32 * GIB, two_disks());
        let result = v.validate_host(&sno("4.10.0"), &host).unwrap();
        assert_eq!(
            result.reasons,
            vec!["Insufficient CPU to deploy ODF LVM. Required CPU count is 2 but found 1"]
        );

        let host = host_with(2, 1199 * MIB, two_disks());
        let result = v.validate_host(&sno("4.10.0"), &host).unwrap();
        assert_eq!(
            result.reasons,
            vec!["Insufficient memory to deploy ODF LVM. Required memory is 1200 MiB but found 1199 MiB"]
        );
    }

    // -------------------------------------------------------------------------
    // Cluster validation
    // -------------------------------------------------------------------------

    #[test]
    fn test_cluster_full_ha_fails() {
        let v = validator(ValidatorPolicy::lvm());
        let mut cluster = sno("4.12.0");
        cluster.high_availability_mode = HighAvailabilityMode::Full;

        let result = v.validate_cluster(&cluster).unwrap();
        assert_eq!(
            result,
            ValidationResult::failure(
                "lvm-requirements-satisfied",
                ["ODF LVM operator is only supported for Single Node Openshift deployment"]
            )
        );
    }

    #[test]
    fn test_topology_checked_before_version() {
        let v = validator(ValidatorPolicy::lvm());
        let mut cluster = sno("garbage");
        cluster.high_availability_mode = HighAvailabilityMode::Full;

        let result = v.validate_cluster(&cluster).unwrap();
        assert!(result.reasons[0].contains("Single Node"));
    }

    #[test]
    fn test_cluster_version_below_minimum() {
        let v = validator(ValidatorPolicy::lvm());
        let result = v.validate_cluster(&sno("4.10.0")).unwrap();
        assert_eq!(
            result.reasons,
            vec!["ODF LVM operator is only supported for openshift versions 4.12.0 and above"]
        );
    }

    #[test]
    fn test_cluster_version_at_or_above_minimum() {
        let v = validator(ValidatorPolicy::lvm());
        for version in ["4.12.0", "4.12", "4.13.2", "5.0.0"] {
            let result = v.validate_cluster(&sno(version)).unwrap();
            assert!(result.is_success(), "{version} should pass");
        }
        assert!(!v.validate_cluster(&sno("4.12.0-rc.1")).unwrap().is_success());
        assert!(!v.validate_cluster(&sno("4.9.30")).unwrap().is_success());
    }

    #[test]
    fn test_cluster_malformed_version_is_failure() {
        let v = validator(ValidatorPolicy::lvm());
        let result = v.validate_cluster(&sno("not-a-version")).unwrap();
        assert_eq!(result.status, ValidationStatus::Failure);
        assert_eq!(result.reasons.len(), 1);
        assert!(result.reasons[0].starts_with("Malformed version: not-a-version"));
    }

    #[test]
    fn test_legacy_minimum_version() {
        let v = validator(ValidatorPolicy::odf_lvm());
        assert!(v.validate_cluster(&sno("4.10.0")).unwrap().is_success());
        assert!(!v.validate_cluster(&sno("4.9.0")).unwrap().is_success());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let v = validator(ValidatorPolicy::lvm());
        let cluster = sno("4.12.0");
        let host = host_with(12, 1199 * MIB, two_disks());

        assert_eq!(
            v.validate_host(&cluster, &host).unwrap(),
            v.validate_host(&cluster, &host).unwrap()
        );
        assert_eq!(
            v.validate_cluster(&cluster).unwrap(),
            v.validate_cluster(&cluster).unwrap()
        );
    }
}
