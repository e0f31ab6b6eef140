//! Cluster Context
//!
//! Read-only view of the cluster being installed: topology, platform
//! version and the hosts that registered so far.

use serde::{Deserialize, Serialize};

/// High availability mode of the control plane
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighAvailabilityMode {
    /// Three or more control plane hosts
    #[default]
    Full,
    /// Single-node topology
    None,
}

impl std::fmt::Display for HighAvailabilityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HighAvailabilityMode::Full => write!(f, "Full"),
            HighAvailabilityMode::None => write!(f, "None"),
        }
    }
}

/// A host as known to the cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub id: String,

    /// Disk the OS is installed on; never counted as storage
    #[serde(default)]
    pub installation_disk_id: String,

    /// Raw inventory document from the discovery agent, if it reported yet
    #[serde(default)]
    pub inventory: Option<String>,
}

impl Host {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_installation_disk(mut self, disk_id: impl Into<String>) -> Self {
        self.installation_disk_id = disk_id.into();
        self
    }

    pub fn with_inventory(mut self, inventory: impl Into<String>) -> Self {
        self.inventory = Some(inventory.into());
        self
    }

    /// Raw inventory, treating an empty document the same as a missing one
    pub fn reported_inventory(&self) -> Option<&str> {
        self.inventory
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
    }
}

/// Cluster being validated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,

    #[serde(default)]
    pub high_availability_mode: HighAvailabilityMode,

    /// Platform version string, parsed lazily by validators
    #[serde(default)]
    pub openshift_version: String,

    #[serde(default)]
    pub hosts: Vec<Host>,
}

impl Cluster {
    pub fn is_single_node(&self) -> bool {
        self.high_availability_mode == HighAvailabilityMode::None
    }

    pub fn host(&self, host_id: &str) -> Option<&Host> {
        self.hosts.iter().find(|h| h.id == host_id)
    }
}
