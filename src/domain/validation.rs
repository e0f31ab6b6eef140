//! Validation Verdicts and Requirements
//!
//! Value types exchanged between operator plugins and the orchestrator.

use serde::{Deserialize, Serialize};

// =============================================================================
// Verdicts
// =============================================================================

/// Outcome of one validation check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Success,
    Failure,
    /// Required input (host inventory) has not been reported yet
    Pending,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationStatus::Success => write!(f, "success"),
            ValidationStatus::Failure => write!(f, "failure"),
            ValidationStatus::Pending => write!(f, "pending"),
        }
    }
}

/// Verdict of a single validation.
///
/// `reasons` is empty exactly when `status` is [`ValidationStatus::Success`];
/// the constructors are the only way the crate builds verdicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub validation_id: String,
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl ValidationResult {
    pub fn success(validation_id: impl Into<String>) -> Self {
        Self {
            status: ValidationStatus::Success,
            validation_id: validation_id.into(),
            reasons: Vec::new(),
        }
    }

    pub fn failure<I, S>(validation_id: impl Into<String>, reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_reasons(ValidationStatus::Failure, validation_id, reasons)
    }

    pub fn pending(validation_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::with_reasons(ValidationStatus::Pending, validation_id, [reason])
    }

    fn with_reasons<I, S>(
        status: ValidationStatus,
        validation_id: impl Into<String>,
        reasons: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut reasons: Vec<String> = reasons.into_iter().map(Into::into).collect();
        if reasons.is_empty() {
            reasons.push(format!("validation {}", status));
        }
        Self {
            status,
            validation_id: validation_id.into(),
            reasons,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ValidationStatus::Success
    }
}

// =============================================================================
// Requirements
// =============================================================================

/// Requirements an operator places on a single host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostRequirements {
    pub cpu_cores: u64,
    pub ram_mib: u64,
    /// Eligible, non-installation disks the host must have
    pub minimum_disk_count: u64,
    /// Human-readable requirements that can't be expressed as numbers
    #[serde(default)]
    pub qualitative: Vec<String>,
}

/// Requirements split by host role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostTypeRequirements {
    pub master: HostRequirements,
    pub worker: HostRequirements,
}

/// Hardware requirements that can be determined from cluster data only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreflightRequirements {
    pub operator_name: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub requirements: HostTypeRequirements,
}

// =============================================================================
// Monitored Operator
// =============================================================================

/// How the operator gets installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorType {
    /// Installed through the Operator Lifecycle Manager
    Olm,
    /// Part of the platform payload
    Builtin,
}

/// Static metadata the installer uses to track the operator after install
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoredOperator {
    pub name: String,
    pub operator_type: OperatorType,
    pub namespace: String,
    pub subscription_name: String,
    pub timeout_seconds: u64,
}
