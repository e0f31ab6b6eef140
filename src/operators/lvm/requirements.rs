//! Requirement Calculator
//!
//! Turns administrator configuration plus policy defaults into the
//! requirements a host must meet.

use super::policy::ValidatorPolicy;
use crate::domain::cluster::Cluster;
use crate::domain::ports::RequirementCalculator;
use crate::domain::validation::HostRequirements;
use crate::error::Result;

/// Administrator overrides for host requirements.
///
/// `None` means "not configured" and falls back to the policy default;
/// `Some(0)` is an explicit zero requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LvmConfig {
    pub cpu_per_host: Option<u64>,
    pub memory_mib_per_host: Option<u64>,
}

/// Requirements derived from static configuration
#[derive(Debug, Clone)]
pub struct ConfiguredRequirements {
    cpu_cores: u64,
    ram_mib: u64,
    qualitative: Vec<String>,
}

impl ConfiguredRequirements {
    pub fn new(config: LvmConfig, policy: &ValidatorPolicy) -> Self {
        Self {
            cpu_cores: config.cpu_per_host.unwrap_or(policy.default_cpu_cores),
            ram_mib: config.memory_mib_per_host.unwrap_or(policy.default_ram_mib),
            qualitative: vec![policy.messages.disk_qualitative.clone()],
        }
    }
}

impl RequirementCalculator for ConfiguredRequirements {
    fn compute(&self, _cluster: &Cluster) -> Result<HostRequirements> {
        Ok(HostRequirements {
            cpu_cores: self.cpu_cores,
            ram_mib: self.ram_mib,
            minimum_disk_count: 1,
            qualitative: self.qualitative.clone(),
        })
    }
}
