//! Kubernetes resource types used in rendered manifests
//!
//! This module contains the custom resources an add-on install needs:
//! - Subscription / OperatorGroup: OLM install objects
//! - LvmCluster: operand of the LVM storage operator

pub mod lvm_cluster;
pub mod olm;

pub use lvm_cluster::*;
pub use olm::*;
