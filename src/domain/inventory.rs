//! Host Inventory Model
//!
//! Read-only snapshot of a host's disks, CPU and memory as reported by the
//! discovery agent. The agent ships it as a JSON document; unknown fields
//! are ignored.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Drive Type
// =============================================================================

/// Drive type as reported by the discovery agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriveType {
    #[serde(rename = "HDD")]
    Hdd,
    #[serde(rename = "SSD")]
    Ssd,
    /// Optical, multipath, RAID, LVM, FC, iSCSI and anything else
    #[default]
    #[serde(other)]
    Other,
}

impl std::fmt::Display for DriveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriveType::Hdd => write!(f, "HDD"),
            DriveType::Ssd => write!(f, "SSD"),
            DriveType::Other => write!(f, "other"),
        }
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// A disk attached to a host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
    /// Stable disk identifier (e.g., /dev/disk/by-id/wwn-0x5000c500a0b1c2d3)
    pub id: String,
    /// Size in bytes
    #[serde(default)]
    pub size_bytes: u64,
    /// Drive type
    #[serde(default)]
    pub drive_type: DriveType,
}

/// CPU facts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cpu {
    /// Number of cores
    #[serde(default)]
    pub count: u64,
}

/// Memory facts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    /// Memory usable by the OS in bytes
    #[serde(default)]
    pub usable_bytes: u64,
}

/// Hardware inventory of one host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cpu: Cpu,
    #[serde(default, deserialize_with = "null_as_default")]
    pub memory: Memory,
    // Go agents encode an empty slice as null
    #[serde(default, deserialize_with = "null_as_default")]
    pub disks: Vec<Disk>,
}

impl Inventory {
    /// Parse the agent's JSON document
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(Error::InventoryParse)
    }

    /// Serialize back into the agent's JSON format
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn cpu_core_count(&self) -> u64 {
        self.cpu.count
    }

    pub fn usable_memory_bytes(&self) -> u64 {
        self.memory.usable_bytes
    }
}
