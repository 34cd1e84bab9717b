//! Error types for the temporal-norm library.

use thiserror::Error;

/// Result type alias for normalization operations.
pub type Result<T> = std::result::Result<T, NormError>;

/// Errors that can occur while computing or inverting a normalization.
///
/// Numerical degeneracy (an all-invalid slice, a zero variance or a zero
/// range) is never reported here; it is absorbed by the scale guard.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormError {
    /// Unknown scaler name or invalid parameter at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Arrays that cannot be broadcast together, or a reduction axis that
    /// does not exist.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Inverse requested before any statistics were computed or supplied.
    #[error("state precondition violated: {0}")]
    StatePrecondition(String),
}

impl From<serde_json::Error> for NormError {
    fn from(err: serde_json::Error) -> Self {
        NormError::InvalidConfiguration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = NormError::InvalidConfiguration("unknown scaler 'zscore'".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: unknown scaler 'zscore'"
        );

        let err = NormError::ShapeMismatch("axis 3 out of range for 3-d array".to_string());
        assert_eq!(
            err.to_string(),
            "shape mismatch: axis 3 out of range for 3-d array"
        );

        let err = NormError::StatePrecondition("no statistics".to_string());
        assert_eq!(err.to_string(), "state precondition violated: no statistics");
    }

    #[test]
    fn json_errors_become_configuration_errors() {
        let err: NormError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, NormError::InvalidConfiguration(_)));
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = NormError::StatePrecondition("x".to_string());
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
