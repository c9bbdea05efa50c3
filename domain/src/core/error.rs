//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Topic cannot be empty")]
    EmptyTopic,

    #[error("Topic is too long ({len} bytes, limit {limit})")]
    TopicTooLong { len: usize, limit: usize },

    #[error("At least one perspective is required")]
    EmptyPerspectiveSet,

    #[error("Unregistered perspective: {0}")]
    UnregisteredPerspective(String),

    #[error("Too many agents requested ({requested}, limit {limit})")]
    TooManyAgents { requested: usize, limit: usize },

    #[error("Malformed agent response: {0}")]
    MalformedResponse(String),

    #[error("Invalid council transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl DomainError {
    /// Configuration errors are raised before any agent is spawned.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyTopic
                | DomainError::TopicTooLong { .. }
                | DomainError::EmptyPerspectiveSet
                | DomainError::UnregisteredPerspective(_)
                | DomainError::TooManyAgents { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_perspective_display() {
        let error = DomainError::UnregisteredPerspective("legal".to_string());
        assert_eq!(error.to_string(), "Unregistered perspective: legal");
    }

    #[test]
    fn test_is_configuration_error() {
        assert!(DomainError::EmptyTopic.is_configuration_error());
        assert!(DomainError::EmptyPerspectiveSet.is_configuration_error());
        assert!(
            DomainError::TooManyAgents {
                requested: 6,
                limit: 5
            }
            .is_configuration_error()
        );
        assert!(!DomainError::MalformedResponse("no position".into()).is_configuration_error());
    }
}
