//! Manifest Rendering
//!
//! Builds the OLM install manifests and the LVMCluster operand from
//! placeholder values. Documents are built as typed Kubernetes objects and
//! serialized with serde_yaml.

use super::policy::ValidatorPolicy;
use crate::crd::{
    InstallPlanApproval, LvmCluster, LvmClusterSpec, OperatorGroup, OperatorGroupSpec,
    Subscription, SubscriptionSpec,
};
use crate::domain::ports::{
    ManifestDocument, ManifestRenderer, ManifestValues, OperatorManifests, OPERATOR_NAMESPACE,
    OPERATOR_SOURCE, OPERATOR_SUBSCRIPTION_NAME,
};
use crate::error::{Error, Result};
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

/// Namespace of the default catalog sources
const MARKETPLACE_NAMESPACE: &str = "openshift-marketplace";

/// Package name of the operator in the catalog
const PACKAGE_NAME: &str = "odf-lvm-operator";

const LVM_CLUSTER_NAME: &str = "lvmcluster";

// =============================================================================
// Renderer
// =============================================================================

/// Renders install documents for the LVM operator
#[derive(Debug, Clone, Default)]
pub struct YamlManifestRenderer {
    starting_csv: Option<String>,
}

impl YamlManifestRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the first ClusterServiceVersion the subscription installs
    pub fn with_starting_csv(mut self, csv: impl Into<String>) -> Self {
        self.starting_csv = Some(csv.into());
        self
    }

    fn subscription(&self, values: &ManifestValues) -> Result<String> {
        let doc = ManifestDocument::Subscription;
        let mut sub = Subscription::new(
            lookup(values, OPERATOR_SUBSCRIPTION_NAME, doc)?,
            SubscriptionSpec {
                name: PACKAGE_NAME.to_string(),
                source: lookup(values, OPERATOR_SOURCE, doc)?.to_string(),
                source_namespace: MARKETPLACE_NAMESPACE.to_string(),
                channel: None,
                install_plan_approval: InstallPlanApproval::Automatic,
                starting_csv: self.starting_csv.clone(),
            },
        );
        sub.metadata.namespace = Some(lookup(values, OPERATOR_NAMESPACE, doc)?.to_string());
        Ok(serde_yaml::to_string(&sub)?)
    }

    fn namespace(&self, values: &ManifestValues) -> Result<String> {
        let name = lookup(values, OPERATOR_NAMESPACE, ManifestDocument::Namespace)?;
        let ns = Namespace {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                labels: Some(BTreeMap::from([(
                    "openshift.io/cluster-monitoring".to_string(),
                    "true".to_string(),
                )])),
                ..Default::default()
            },
            ..Default::default()
        };
        Ok(serde_yaml::to_string(&ns)?)
    }

    fn operator_group(&self, values: &ManifestValues) -> Result<String> {
        let namespace = lookup(values, OPERATOR_NAMESPACE, ManifestDocument::OperatorGroup)?;
        let mut group = OperatorGroup::new(
            &format!("{}-operatorgroup", namespace),
            OperatorGroupSpec {
                target_namespaces: vec![namespace.to_string()],
            },
        );
        group.metadata.namespace = Some(namespace.to_string());
        Ok(serde_yaml::to_string(&group)?)
    }

    fn lvm_cluster(&self, values: &ManifestValues) -> Result<String> {
        let namespace = lookup(values, OPERATOR_NAMESPACE, ManifestDocument::CustomResource)?;
        let mut cr = LvmCluster::new(LVM_CLUSTER_NAME, LvmClusterSpec::single_device_class());
        cr.metadata.namespace = Some(namespace.to_string());
        Ok(serde_yaml::to_string(&cr)?)
    }
}

impl ManifestRenderer for YamlManifestRenderer {
    fn render(&self, document: ManifestDocument, values: &ManifestValues) -> Result<Vec<u8>> {
        let yaml = match document {
            ManifestDocument::Subscription => self.subscription(values)?,
            ManifestDocument::Namespace => self.namespace(values)?,
            ManifestDocument::OperatorGroup => self.operator_group(values)?,
            ManifestDocument::CustomResource => self.lvm_cluster(values)?,
        };
        Ok(yaml.into_bytes())
    }
}

fn lookup<'a>(
    values: &'a ManifestValues,
    key: &str,
    document: ManifestDocument,
) -> Result<&'a str> {
    values
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::ManifestRender {
            document: document.to_string(),
            reason: format!("missing value for {}", key),
        })
}

// =============================================================================
// Manifest Set
// =============================================================================

/// Placeholder values derived from a policy
pub fn manifest_values(policy: &ValidatorPolicy) -> ManifestValues {
    BTreeMap::from([
        (
            OPERATOR_NAMESPACE.to_string(),
            policy.monitored.namespace.clone(),
        ),
        (
            OPERATOR_SUBSCRIPTION_NAME.to_string(),
            policy.monitored.subscription_name.clone(),
        ),
        (OPERATOR_SOURCE.to_string(), policy.catalog_source.to_string()),
    ])
}

/// Render every document the operator needs
pub fn render_manifests(
    policy: &ValidatorPolicy,
    renderer: &dyn ManifestRenderer,
) -> Result<OperatorManifests> {
    let values = manifest_values(policy);
    let prefix = policy.manifest_prefix;

    let mut openshift = BTreeMap::new();
    openshift.insert(
        format!("50_openshift-{}_subscription.yaml", prefix),
        renderer.render(ManifestDocument::Subscription, &values)?,
    );
    openshift.insert(
        format!("50_openshift-{}_ns.yaml", prefix),
        renderer.render(ManifestDocument::Namespace, &values)?,
    );
    openshift.insert(
        format!("50_openshift-{}_operator_group.yaml", prefix),
        renderer.render(ManifestDocument::OperatorGroup, &values)?,
    );

    Ok(OperatorManifests {
        openshift,
        custom: renderer.render(ManifestDocument::CustomResource, &values)?,
    })
}
