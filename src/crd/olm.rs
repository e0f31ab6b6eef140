//! Operator Lifecycle Manager resources
//!
//! Subscription and OperatorGroup, the two OLM objects needed to get an
//! operator installed from a catalog.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// Subscription
// =============================================================================

/// Subscription asks OLM to install and keep an operator up to date from a
/// catalog source.
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "operators.coreos.com",
    version = "v1alpha1",
    kind = "Subscription",
    plural = "subscriptions",
    shortname = "sub",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSpec {
    /// Package name in the catalog
    pub name: String,

    /// Catalog source providing the package
    pub source: String,

    /// Namespace of the catalog source
    pub source_namespace: String,

    /// Update channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    /// Install plan approval mode
    #[serde(default)]
    pub install_plan_approval: InstallPlanApproval,

    /// Pin the first ClusterServiceVersion to install
    #[serde(
        default,
        rename = "startingCSV",
        skip_serializing_if = "Option::is_none"
    )]
    pub starting_csv: Option<String>,
}

/// Install plan approval mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum InstallPlanApproval {
    #[default]
    Automatic,
    Manual,
}

// =============================================================================
// OperatorGroup
// =============================================================================

/// OperatorGroup selects the namespaces an operator watches.
#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "operators.coreos.com",
    version = "v1",
    kind = "OperatorGroup",
    plural = "operatorgroups",
    shortname = "og",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct OperatorGroupSpec {
    /// Namespaces the member operators watch
    #[serde(default)]
    pub target_namespaces: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::Resource;

    #[test]
    fn test_subscription_serialization() {
        let sub = Subscription::new(
            "lvms-operator",
            SubscriptionSpec {
                name: "lvms-operator".into(),
                source: "redhat-operators".into(),
                source_namespace: "openshift-marketplace".into(),
                channel: None,
                install_plan_approval: InstallPlanApproval::Automatic,
                starting_csv: Some("odf-lvm-operator.v4.10.0".into()),
            },
        );

        let value = serde_json::to_value(&sub).unwrap();
        assert_eq!(value["apiVersion"], "operators.coreos.com/v1alpha1");
        assert_eq!(value["kind"], "Subscription");
        assert_eq!(value["spec"]["sourceNamespace"], "openshift-marketplace");
        assert_eq!(value["spec"]["installPlanApproval"], "Automatic");
        assert_eq!(value["spec"]["startingCSV"], "odf-lvm-operator.v4.10.0");
        assert!(value["spec"].get("channel").is_none());
    }

    #[test]
    fn test_operator_group_kind() {
        assert_eq!(OperatorGroup::kind(&()), "OperatorGroup");
        assert_eq!(OperatorGroup::api_version(&()), "operators.coreos.com/v1");
    }
}
