//! Store error types.

use crate::domain::DomainError;

/// Errors from the persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with this id
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    /// Record rejected by validation
    #[error("invalid record: {0}")]
    Invalid(#[from] DomainError),

    /// Reading or writing the backing file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing document is not valid JSON for a snapshot
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend could not serve the request
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn not_found(kind: &'static str, id: i64) -> Self {
        StoreError::NotFound { kind, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StationId, TrainId};

    #[test]
    fn error_display() {
        let err = StoreError::not_found("stop", 12);
        assert_eq!(err.to_string(), "stop 12 not found");

        let err = StoreError::from(DomainError::NegativeDwell {
            train: TrainId(1),
            station: StationId(2),
        });
        assert_eq!(
            err.to_string(),
            "invalid record: train 1: stop at station 2 departs before it arrives"
        );

        let err = StoreError::Unavailable("connection refused".into());
        assert_eq!(err.to_string(), "store unavailable: connection refused");
    }

    #[test]
    fn json_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StoreError = parse.into();
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
