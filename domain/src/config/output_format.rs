//! Output format value object

use serde::{Deserialize, Serialize};

/// How a council result is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Recommendation, votes, considerations and every round's arguments
    Full,
    /// Recommendation, votes and key considerations (default)
    #[default]
    Summary,
    /// The `DebateResult` as JSON
    Json,
    /// Markdown decision record
    Adr,
}
