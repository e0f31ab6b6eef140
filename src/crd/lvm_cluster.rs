//! LVMCluster CRD
//!
//! Operand resource of the LVM storage operator: which volume groups to
//! build from the host's free disks.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Name of the volume group created on every host
pub const DEFAULT_DEVICE_CLASS: &str = "vg1";

/// LVMCluster describes the volume groups the operator builds from the
/// eligible disks of each host.
#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "lvm.topolvm.io",
    version = "v1alpha1",
    kind = "LVMCluster",
    root = "LvmCluster",
    plural = "lvmclusters",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct LvmClusterSpec {
    pub storage: LvmStorage,
}

/// Storage section of the LVMCluster
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LvmStorage {
    #[serde(default)]
    pub device_classes: Vec<DeviceClass>,
}

/// A volume group and the storage class built on it
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceClass {
    pub name: String,

    /// Back the default storage class
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub default: bool,
}

impl LvmClusterSpec {
    /// Single volume group spanning every eligible disk
    pub fn single_device_class() -> Self {
        Self {
            storage: LvmStorage {
                device_classes: vec![DeviceClass {
                    name: DEFAULT_DEVICE_CLASS.to_string(),
                    default: true,
                }],
            },
        }
    }
}
