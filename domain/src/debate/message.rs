//! Inter-agent messages and `@mention` resolution

use crate::core::now_millis;
use serde::{Deserialize, Serialize};

/// Extract the first `@agent_id` mention from a message body.
///
/// A mention must start a word (so `ops@example.com` is not one) and
/// consists of ASCII alphanumerics, `_` and `-`.
///
/// ```
/// use council_domain::parse_mention;
///
/// assert_eq!(
///     parse_mention("@cost_analyst reconsider your ROI number"),
///     Some("cost_analyst".to_string())
/// );
/// assert_eq!(parse_mention("mail ops@example.com"), None);
/// ```
pub fn parse_mention(body: &str) -> Option<String> {
    body.split_whitespace().find_map(|word| {
        let word = word.trim_start_matches(['(', '[', '"', '\'']);
        let name: String = word
            .strip_prefix('@')?
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        (!name.is_empty()).then_some(name)
    })
}

/// A message on the bus
///
/// `to_agent == None` means broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub from_agent: String,
    pub to_agent: Option<String>,
    pub body: String,
    pub timestamp: u64,
}

impl Message {
    /// Create a message, inferring the target from an `@mention` when none is given
    pub fn new(from_agent: impl Into<String>, to_agent: Option<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        let to_agent = to_agent.or_else(|| parse_mention(&body));
        Self {
            from_agent: from_agent.into(),
            to_agent,
            body,
            timestamp: now_millis(),
        }
    }

    pub fn is_broadcast(&self) -> bool {
        self.to_agent.is_none()
    }
}
