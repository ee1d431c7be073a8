use thiserror::Error;

use crate::types::MarkerKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkerError {
    #[error("The marker detector runtime is missing or disabled")]
    MissingCollaborator,
    #[error("No tracking origin found, marker poses cannot be placed in the world")]
    MissingOrigin,
    #[error("No marker prefabs were provided")]
    MissingPrefabs,
    #[error("Marker tracking is disabled")]
    Disabled,
    #[error("Marker id '{0}' is not a marker number")]
    InvalidMarkerId(String),
    #[error("No pose is given for {0} markers")]
    UnsupportedKind(MarkerKind),
    #[error("Failed to create {kind} detector: {reason}")]
    DetectorCreation { kind: MarkerKind, reason: String },
}

impl MarkerError {
    /// Fatal errors disable marker tracking for the rest of the session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MarkerError::MissingCollaborator
                | MarkerError::MissingOrigin
                | MarkerError::MissingPrefabs
                | MarkerError::Disabled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_classification() {
        assert!(MarkerError::MissingCollaborator.is_fatal());
        assert!(MarkerError::MissingOrigin.is_fatal());
        assert!(!MarkerError::InvalidMarkerId("hello".into()).is_fatal());
        assert!(!MarkerError::UnsupportedKind(MarkerKind::Upca).is_fatal());
    }

    #[test]
    fn messages() {
        assert_eq!(
            MarkerError::UnsupportedKind(MarkerKind::Upca).to_string(),
            "No pose is given for UPC-A markers"
        );
        assert_eq!(
            MarkerError::InvalidMarkerId("abc".into()).to_string(),
            "Marker id 'abc' is not a marker number"
        );
    }
}
