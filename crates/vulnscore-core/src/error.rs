//! Error types for vulnscore

use crate::metric::Metric;
use thiserror::Error;

/// Result type alias using vulnscore Error
pub type Result<T> = std::result::Result<T, Error>;

/// vulnscore error types
///
/// Every variant is terminal for the call that produced it: no partial
/// score or partial record is ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // === Metric Errors ===
    #[error("Invalid value '{value}' for metric {metric}")]
    InvalidMetricValue { metric: Metric, value: String },

    #[error("Missing mandatory metric: {metric}")]
    MissingMandatoryMetric { metric: Metric },

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Metric {metric} has no numeric weight")]
    UnweightedMetric { metric: Metric },

    // === Vector Errors ===
    #[error("Malformed vector segment: '{segment}'")]
    MalformedVector { segment: String },

    #[error("Metric {metric} defined more than once")]
    DuplicateMetric { metric: Metric },

    #[error("Invalid extension '{key}': {reason}")]
    InvalidExtension { key: String, reason: &'static str },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfig { key: String, message: String },
}

impl Error {
    pub(crate) fn invalid_value(metric: Metric, value: impl Into<String>) -> Self {
        Error::InvalidMetricValue {
            metric,
            value: value.into(),
        }
    }

    pub(crate) fn malformed(segment: impl Into<String>) -> Self {
        Error::MalformedVector {
            segment: segment.into(),
        }
    }

    /// Check if this error came from the caller's metrics or vector input
    pub fn is_input_error(&self) -> bool {
        !matches!(
            self,
            Error::Configuration(_) | Error::InvalidConfig { .. }
        )
    }

    /// Get an error code for logging
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidMetricValue { .. } => "INVALID_METRIC_VALUE",
            Error::MissingMandatoryMetric { .. } => "MISSING_MANDATORY_METRIC",
            Error::UnknownMetric(_) => "UNKNOWN_METRIC",
            Error::UnweightedMetric { .. } => "UNWEIGHTED_METRIC",
            Error::MalformedVector { .. } => "MALFORMED_VECTOR",
            Error::DuplicateMetric { .. } => "DUPLICATE_METRIC",
            Error::InvalidExtension { .. } => "INVALID_EXTENSION",
            Error::Configuration(_) => "CONFIG_ERROR",
            Error::InvalidConfig { .. } => "INVALID_CONFIG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_display() {
        let err = Error::invalid_value(Metric::AttackVector, "Q");
        assert_eq!(err.to_string(), "Invalid value 'Q' for metric AV");
        assert_eq!(err.code(), "INVALID_METRIC_VALUE");
    }

    #[test]
    fn test_missing_metric_display() {
        let err = Error::MissingMandatoryMetric {
            metric: Metric::Scope,
        };
        assert_eq!(err.to_string(), "Missing mandatory metric: S");
    }

    #[test]
    fn test_unweighted_metric_display() {
        let err = Error::UnweightedMetric {
            metric: Metric::ModifiedScope,
        };
        assert_eq!(err.to_string(), "Metric MS has no numeric weight");
        assert_eq!(err.code(), "UNWEIGHTED_METRIC");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_input_error_classification() {
        assert!(Error::malformed("AV").is_input_error());
        assert!(!Error::Configuration("bad".into()).is_input_error());
    }
}
