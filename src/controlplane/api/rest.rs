//! REST API Handlers
//!
//! Implements the REST API endpoints for operator discovery, cluster and
//! host validation, preflight requirements and installability reports.

use crate::controlplane::Orchestrator;
use crate::controlplane::OperatorRegistry;
use crate::domain::cluster::Cluster;
use crate::domain::ports::OperatorRef;
use crate::domain::validation::{OperatorType, ValidationResult};
use crate::error::{Error, ValidationOutcome};
use axum::{
    extract::{Json, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Operator descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorInfoResponse {
    pub name: String,
    pub operator_type: OperatorType,
    pub namespace: String,
    pub subscription_name: String,
    pub timeout_seconds: u64,
    pub cluster_validation_id: String,
    pub host_validation_id: String,
}

impl From<&OperatorRef> for OperatorInfoResponse {
    fn from(operator: &OperatorRef) -> Self {
        let monitored = operator.monitored_operator();
        Self {
            name: operator.name().to_string(),
            operator_type: monitored.operator_type,
            namespace: monitored.namespace.clone(),
            subscription_name: monitored.subscription_name.clone(),
            timeout_seconds: monitored.timeout_seconds,
            cluster_validation_id: operator.cluster_validation_id().to_string(),
            host_validation_id: operator.host_validation_id().to_string(),
        }
    }
}

/// Host validation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostValidationRequest {
    pub cluster: Cluster,
    pub host_id: String,
}

/// Installability request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallabilityRequest {
    pub cluster: Cluster,
    /// Operators to install; every registered operator when empty
    #[serde(default)]
    pub operators: Vec<String>,
}

/// Verdict of a single validation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub result: ValidationResult,
    /// Error surfaced alongside the verdict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

// =============================================================================
// REST Router
// =============================================================================

/// REST API router builder
pub struct RestRouter {
    orchestrator: Arc<Orchestrator>,
    registry: Arc<OperatorRegistry>,
}

impl RestRouter {
    /// Create a new REST router
    pub fn new(orchestrator: Arc<Orchestrator>, registry: Arc<OperatorRegistry>) -> Self {
        Self {
            orchestrator,
            registry,
        }
    }

    /// Build the Axum router
    pub fn build(self) -> Router {
        let state = AppState {
            orchestrator: self.orchestrator,
            registry: self.registry,
        };

        Router::new()
            // Operator endpoints
            .route("/v1/operators", get(list_operators))
            .route("/v1/operators/:name/cluster-validation", post(validate_cluster))
            .route("/v1/operators/:name/host-validation", post(validate_host))
            .route(
                "/v1/operators/:name/preflight-requirements",
                post(preflight_requirements),
            )
            // Aggregate endpoint
            .route("/v1/installability", post(installability))
            // Health and metrics
            .route("/healthz", get(health_check))
            .route("/readyz", get(readiness_check))
            .route("/metrics", get(metrics))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    orchestrator: Arc<Orchestrator>,
    registry: Arc<OperatorRegistry>,
}

impl AppState {
    fn operator(&self, name: &str) -> Result<OperatorRef, Response> {
        self.registry.get(name).ok_or_else(|| {
            error_response(&Error::OperatorNotFound {
                name: name.to_string(),
            })
        })
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// List registered operators
async fn list_operators(State(state): State<AppState>) -> impl IntoResponse {
    let operators: Vec<OperatorInfoResponse> =
        state.registry.all().iter().map(OperatorInfoResponse::from).collect();
    (StatusCode::OK, Json(operators))
}

/// Validate a cluster for one operator
async fn validate_cluster(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(cluster): Json<Cluster>,
) -> Response {
    let operator = match state.operator(&name) {
        Ok(operator) => operator,
        Err(response) => return response,
    };

    debug!(operator = %name, cluster = %cluster.id, "cluster validation requested");
    validation_response(state.orchestrator.cluster_outcome(&operator, &cluster))
}

/// Validate one host of a cluster for one operator
async fn validate_host(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<HostValidationRequest>,
) -> Response {
    let operator = match state.operator(&name) {
        Ok(operator) => operator,
        Err(response) => return response,
    };

    let Some(host) = request.cluster.host(&request.host_id) else {
        return error_response(&Error::HostNotFound {
            host_id: request.host_id.clone(),
        });
    };

    debug!(operator = %name, host = %host.id, "host validation requested");
    validation_response(state.orchestrator.host_outcome(&operator, &request.cluster, host))
}

/// Preflight requirements of one operator and its dependencies
async fn preflight_requirements(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(cluster): Json<Cluster>,
) -> Response {
    match state.orchestrator.preflight_requirements(&cluster, &[name]) {
        Ok(requirements) => (StatusCode::OK, Json(requirements)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Installability report for a set of operators
async fn installability(
    State(state): State<AppState>,
    Json(request): Json<InstallabilityRequest>,
) -> Response {
    let operators = if request.operators.is_empty() {
        state.registry.names()
    } else {
        request.operators
    };

    match state.orchestrator.installability(&request.cluster, &operators) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Health check
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Readiness check
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.registry.is_empty() {
        (StatusCode::SERVICE_UNAVAILABLE, "no operators registered")
    } else {
        (StatusCode::OK, "ready")
    }
}

/// Prometheus metrics
async fn metrics(State(state): State<AppState>) -> Response {
    match state.orchestrator.metrics().encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// Utility Functions
// =============================================================================

/// A verdict is always returned; a propagated error turns it into 422
fn validation_response(outcome: ValidationOutcome) -> Response {
    match outcome {
        Ok(result) => (
            StatusCode::OK,
            Json(ValidationResponse {
                result,
                error: None,
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationResponse {
                error: Some(e.source.to_string()),
                result: e.result,
            }),
        )
            .into_response(),
    }
}

fn error_response(e: &Error) -> Response {
    let (status, code) = match e {
        Error::OperatorNotFound { .. } => (StatusCode::NOT_FOUND, "operator_not_found"),
        Error::HostNotFound { .. } => (StatusCode::NOT_FOUND, "host_not_found"),
        Error::DependencyCycle { .. } => (StatusCode::CONFLICT, "dependency_cycle"),
        e if e.is_malformed_input() => (StatusCode::BAD_REQUEST, "malformed_input"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };

    if status.is_server_error() {
        error!(error = %e, "request failed");
    }

    (
        status,
        Json(ApiErrorResponse {
            error: code.into(),
            message: e.to_string(),
            details: None,
        }),
    )
        .into_response()
}
