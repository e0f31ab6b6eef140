//! Error types for the LVM readiness validator
//!
//! Provides structured error types for inventory parsing, version handling,
//! requirement computation, manifest rendering and operator registration.

use crate::domain::validation::ValidationResult;
use std::time::Duration;
use thiserror::Error;

/// Unified error type for the validator
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Inventory parse error: {0}")]
    InventoryParse(#[source] serde_json::Error),

    #[error("Malformed version: {value}: {reason}")]
    VersionParse { value: String, reason: String },

    #[error("Host not found: {host_id}")]
    HostNotFound { host_id: String },

    // =========================================================================
    // Requirement Errors
    // =========================================================================
    #[error("Requirements unavailable for {operator}: {reason}")]
    RequirementsUnavailable { operator: String, reason: String },

    // =========================================================================
    // Operator Registry Errors
    // =========================================================================
    #[error("Operator not found: {name}")]
    OperatorNotFound { name: String },

    #[error("Operator already registered: {name}")]
    OperatorAlreadyRegistered { name: String },

    #[error("Operator dependency cycle: {}", path.join(" -> "))]
    DependencyCycle { path: Vec<String> },

    // =========================================================================
    // Manifest Errors
    // =========================================================================
    #[error("Manifest render error: {document} - {reason}")]
    ManifestRender { document: String, reason: String },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // =========================================================================
    // Parse / IO Errors
    // =========================================================================
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Action the caller should take for an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    /// Re-evaluate with exponential backoff
    RequeueWithBackoff,
    /// Re-evaluate once the input changes (new inventory, new cluster spec)
    WaitForChange,
    /// Re-evaluate after a fixed delay
    RequeueAfter(Duration),
    /// Don't re-evaluate automatically
    NoRequeue,
}

impl Error {
    /// Determine what action to take for this error
    pub fn action(&self) -> ErrorAction {
        match self {
            // Malformed input only changes when the agent re-reports
            Error::InventoryParse(_)
            | Error::VersionParse { .. }
            | Error::HostNotFound { .. }
            | Error::JsonParse(_) => ErrorAction::WaitForChange,

            Error::RequirementsUnavailable { .. } => {
                ErrorAction::RequeueAfter(Duration::from_secs(30))
            }

            // Programming or configuration defects
            Error::Configuration(_)
            | Error::OperatorNotFound { .. }
            | Error::OperatorAlreadyRegistered { .. }
            | Error::DependencyCycle { .. }
            | Error::ManifestRender { .. }
            | Error::Yaml(_) => ErrorAction::NoRequeue,

            Error::Internal(_) | Error::Io(_) => ErrorAction::RequeueWithBackoff,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        !matches!(self.action(), ErrorAction::NoRequeue)
    }

    /// Check if this error comes from malformed caller input
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Error::InventoryParse(_) | Error::VersionParse { .. } | Error::JsonParse(_)
        )
    }
}

/// Result type alias for the validator
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Validation Error
// =============================================================================

/// A failed validation that must also be surfaced to the caller.
///
/// The verdict is still meaningful for the end user, so it travels with the
/// underlying error instead of being replaced by it.
#[derive(Error, Debug)]
#[error("validation {} failed: {source}", result.validation_id)]
pub struct ValidationError {
    /// Verdict to report alongside the error
    pub result: ValidationResult,
    /// Underlying cause
    #[source]
    pub source: Error,
}

impl ValidationError {
    pub fn new(result: ValidationResult, source: Error) -> Self {
        Self { result, source }
    }

    /// Discard the error and keep the verdict
    pub fn into_result(self) -> ValidationResult {
        self.result
    }
}

/// Outcome of a single validation call
pub type ValidationOutcome = std::result::Result<ValidationResult, ValidationError>;
