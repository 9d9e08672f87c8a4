//! Engine-level errors.
//!
//! Per-subject failures are not errors: they are reported through
//! [`SubjectOutcome`](crate::scheduler::SubjectOutcome). The types here
//! cover what aborts a chunk ([`StoreError`]) or a whole run before it
//! starts ([`EngineError`]).

use thiserror::Error;

use crate::validation::ValidationError;

/// Persistence failure raised by an [`EntryStore`](crate::store::EntryStore).
///
/// Aborts only the chunk being committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store refused the write (constraint, integrity, ...).
    #[error("store rejected write: {0}")]
    Rejected(String),
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Invalid engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Chunk size must be at least one subject.
    #[error("chunk size must be at least 1")]
    ZeroChunkSize,
    /// Institutional hour length must be positive.
    #[error("hour length must be positive, got {0} minutes")]
    NonPositiveHourLength(i32),
    /// Configuration JSON could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error that prevents a run from starting.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Structurally invalid request.
    #[error("invalid request: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.message.clone(),
        [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::InvalidInput(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate room ID: R1"),
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate room ID: R2"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid request: Duplicate room ID: R1 (and 1 more)"
        );

        let err = EngineError::from(ConfigError::ZeroChunkSize);
        assert_eq!(err.to_string(), "chunk size must be at least 1");
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Rejected("unique constraint".into());
        assert_eq!(err.to_string(), "store rejected write: unique constraint");
    }
}
