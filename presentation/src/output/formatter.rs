//! Output formatter trait

use council_domain::{DebateResult, OutputFormat};

/// Trait for formatting council results
pub trait OutputFormatter {
    /// Format the complete result, round by round
    fn format(&self, result: &DebateResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &DebateResult) -> String;

    /// Format the verdict only (concise output)
    fn format_summary(&self, result: &DebateResult) -> String;

    /// Dispatch on an [`OutputFormat`]. `Adr` falls back to the full view.
    fn render(&self, result: &DebateResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full | OutputFormat::Adr => self.format(result),
            OutputFormat::Summary => self.format_summary(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
