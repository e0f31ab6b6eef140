//! Validation Metrics
//!
//! Prometheus counters for validation verdicts. Metrics live in their own
//! registry so several orchestrators can coexist in one process.

use crate::domain::validation::ValidationStatus;
use crate::error::{Error, Result};
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Validation level a verdict belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    Cluster,
    Host,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Cluster => "cluster",
            ValidationLevel::Host => "host",
        }
    }
}

/// Counters for validation outcomes
#[derive(Clone)]
pub struct ValidationMetrics {
    registry: Registry,
    validations: IntCounterVec,
    errors: IntCounterVec,
}

impl ValidationMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let validations = IntCounterVec::new(
            Opts::new(
                "operator_validations_total",
                "Validation verdicts by operator, level and status",
            ),
            &["operator", "level", "status"],
        )
        .map_err(metrics_error)?;
        let errors = IntCounterVec::new(
            Opts::new(
                "operator_validation_errors_total",
                "Validations that surfaced an error to the caller",
            ),
            &["operator", "level"],
        )
        .map_err(metrics_error)?;

        registry
            .register(Box::new(validations.clone()))
            .map_err(metrics_error)?;
        registry
            .register(Box::new(errors.clone()))
            .map_err(metrics_error)?;

        Ok(Self {
            registry,
            validations,
            errors,
        })
    }

    pub fn record(&self, operator: &str, level: ValidationLevel, status: ValidationStatus) {
        let status = status.to_string();
        self.validations
            .with_label_values(&[operator, level.as_str(), status.as_str()])
            .inc();
    }

    pub fn record_error(&self, operator: &str, level: ValidationLevel) {
        self.errors
            .with_label_values(&[operator, level.as_str()])
            .inc();
    }

    pub fn validations(
        &self,
        operator: &str,
        level: ValidationLevel,
        status: ValidationStatus,
    ) -> u64 {
        let status = status.to_string();
        self.validations
            .with_label_values(&[operator, level.as_str(), status.as_str()])
            .get()
    }

    pub fn errors(&self, operator: &str, level: ValidationLevel) -> u64 {
        self.errors.with_label_values(&[operator, level.as_str()]).get()
    }

    /// Text exposition format
    pub fn encode(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(metrics_error)?;
        String::from_utf8(buffer).map_err(|e| Error::Internal(format!("metrics encoding: {}", e)))
    }
}

fn metrics_error(e: prometheus::Error) -> Error {
    Error::Internal(format!("metrics: {}", e))
}
