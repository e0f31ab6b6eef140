//! End-to-end readiness scenarios through the public API

use assert_matches::assert_matches;
use lvm_readiness::domain::inventory::{Cpu, Disk, DriveType, Memory};
use lvm_readiness::hardware::units::{GB, GIB, MIB};
use lvm_readiness::operators::write_manifests;
use lvm_readiness::{
    Cluster, Error, HighAvailabilityMode, Host, Inventory, LvmConfig, LvmOperator, Operator,
    OperatorFactory, OperatorRegistry, OperatorsConfig, Orchestrator, PolicyVariant, RestRouter,
    ValidationMetrics, ValidationStatus,
};
use std::sync::Arc;

const INSTALL_DISK: &str = "/dev/disk/by-id/install";
const DATA_DISK: &str = "/dev/disk/by-id/data";

fn host(cpus: u64, usable_bytes: u64, disks: Vec<Disk>) -> Host {
    let inventory = Inventory {
        cpu: Cpu { count: cpus },
        memory: Memory { usable_bytes },
        disks,
    };
    Host::new("host-1")
        .with_installation_disk(INSTALL_DISK)
        .with_inventory(inventory.to_json().unwrap())
}

fn disks() -> Vec<Disk> {
    vec![
        Disk {
            id: INSTALL_DISK.into(),
            size_bytes: 120 * GB,
            drive_type: DriveType::Ssd,
        },
        Disk {
            id: DATA_DISK.into(),
            size_bytes: 50 * GB,
            drive_type: DriveType::Ssd,
        },
    ]
}

fn sno(version: &str, hosts: Vec<Host>) -> Cluster {
    Cluster {
        id: "cluster-1".into(),
        high_availability_mode: HighAvailabilityMode::None,
        openshift_version: version.into(),
        hosts,
    }
}

fn lvm() -> LvmOperator {
    LvmOperator::new(
        PolicyVariant::Lvm,
        LvmConfig {
            cpu_per_host: Some(1),
            memory_mib_per_host: Some(1200),
        },
    )
}

#[test]
fn sno_host_with_spare_disk_is_ready() {
    let h = host(12, 32 * GIB, disks());
    let cluster = sno("4.14.0", vec![h.clone()]);
    let op = lvm();

    let cluster_verdict = op.validate_cluster(&cluster).unwrap();
    assert_eq!(cluster_verdict.status, ValidationStatus::Success);

    let host_verdict = op.validate_host(&cluster, &h).unwrap();
    assert_eq!(host_verdict.status, ValidationStatus::Success);
    assert!(host_verdict.reasons.is_empty());

    // Identical inputs, identical verdicts
    assert_eq!(op.validate_host(&cluster, &h).unwrap(), host_verdict);
}

#[test]
fn memory_one_mib_short_fails() {
    let h = host(12, 1199 * MIB, disks());
    let cluster = sno("4.14.0", vec![h.clone()]);

    let verdict = lvm().validate_host(&cluster, &h).unwrap();
    assert_eq!(verdict.status, ValidationStatus::Failure);
    assert!(verdict.reasons[0].contains("1200 MiB"));
    assert!(verdict.reasons[0].contains("1199 MiB"));
}

#[test]
fn old_platform_version_fails() {
    let cluster = sno("4.10.0", vec![]);
    let verdict = lvm().validate_cluster(&cluster).unwrap();
    assert_eq!(verdict.status, ValidationStatus::Failure);
    assert!(verdict.reasons[0].contains("4.12.0"));

    // The legacy generation accepts it
    let legacy = LvmOperator::new(PolicyVariant::OdfLvm, LvmConfig::default());
    assert!(legacy.validate_cluster(&cluster).unwrap().is_success());
}

#[test]
fn multi_node_cluster_fails() {
    let mut cluster = sno("4.14.0", vec![]);
    cluster.high_availability_mode = HighAvailabilityMode::Full;
    let verdict = lvm().validate_cluster(&cluster).unwrap();
    assert_eq!(verdict.status, ValidationStatus::Failure);
    assert_eq!(verdict.reasons.len(), 1);
}

#[test]
fn missing_inventory_is_pending() {
    let cluster = sno("4.14.0", vec![Host::new("host-1")]);
    let verdict = lvm().validate_host(&cluster, &cluster.hosts[0]).unwrap();
    assert_eq!(verdict.status, ValidationStatus::Pending);
}

#[test]
fn only_install_disk_fails_regardless_of_capacity() {
    let h = host(64, 512 * GIB, disks().into_iter().take(1).collect());
    let cluster = sno("4.14.0", vec![h.clone()]);
    let verdict = lvm().validate_host(&cluster, &h).unwrap();
    assert_eq!(verdict.status, ValidationStatus::Failure);
    assert!(verdict.reasons[0].starts_with("Insufficient disks"));
}

#[test]
fn malformed_inventory_surfaces_error() {
    let h = Host::new("host-1").with_inventory("{not json");
    let cluster = sno("4.14.0", vec![h.clone()]);
    let err = lvm().validate_host(&cluster, &h).unwrap_err();
    assert_eq!(err.result.status, ValidationStatus::Failure);
    assert_matches!(err.source, Error::InventoryParse(_));
}

#[test]
fn installability_across_hosts() {
    let ready = host(12, 32 * GIB, disks());
    let mut waiting = Host::new("host-2");
    waiting.installation_disk_id = INSTALL_DISK.into();
    let cluster = sno("4.14.0", vec![ready, waiting]);

    let registry =
        OperatorRegistry::with_operators(OperatorFactory::all(OperatorsConfig::default())).unwrap();
    let orchestrator = Orchestrator::new(registry, ValidationMetrics::new().unwrap());

    let report = orchestrator
        .installability(&cluster, &["lvm".to_string()])
        .unwrap();
    assert_eq!(report.status, ValidationStatus::Pending);
    assert!(report.hosts["host-1"][0].is_success());
    assert_eq!(report.hosts["host-2"][0].status, ValidationStatus::Pending);
}

#[test]
fn manifests_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let cluster = sno("4.14.0", vec![]);
    let op = lvm();

    let manifests = op.generate_manifests(&cluster).unwrap();
    let written = write_manifests(dir.path(), op.name(), &manifests).unwrap();
    assert_eq!(written.len(), 4);

    let subscription =
        std::fs::read_to_string(dir.path().join("50_openshift-lvm_subscription.yaml")).unwrap();
    assert!(subscription.contains("kind: Subscription"));
    assert!(subscription.contains("openshift-storage"));
}

#[test]
fn rest_round_trip() {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    let registry =
        OperatorRegistry::with_operators(OperatorFactory::all(OperatorsConfig::default())).unwrap();
    let orchestrator = Orchestrator::new(registry.clone(), ValidationMetrics::new().unwrap());
    let app = RestRouter::new(Arc::clone(&orchestrator), registry).build();

    let body = serde_json::to_vec(&sno("4.14.0", vec![])).unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/v1/operators/odflvm/cluster-validation")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = tokio_test::block_on(app.oneshot(request)).unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
