//! Topic value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The decision a council debates (Value Object)
///
/// Construction validates the content, so a `Topic` in hand is always
/// non-blank and within [`Topic::MAX_LEN`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    content: String,
}

impl Topic {
    /// Upper bound on topic size in bytes.
    pub const MAX_LEN: usize = 4000;

    /// Create a new topic, rejecting blank or oversized content
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyTopic);
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(DomainError::TopicTooLong {
                len: trimmed.len(),
                limit: Self::MAX_LEN,
            });
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Get the topic content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Topic {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Topic::new(s)
    }
}
