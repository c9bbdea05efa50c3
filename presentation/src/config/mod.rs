//! Presentation-level configuration
//!
//! Resolves how results are rendered from CLI flags and file settings.

use crate::cli::commands::OutputFormat as CliOutputFormat;
use council_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// CLI flags win over the config file; `--quiet` hides progress.
    pub fn resolve(
        cli_format: Option<CliOutputFormat>,
        file_format: Option<OutputFormat>,
        color: bool,
        show_progress: bool,
        quiet: bool,
    ) -> Self {
        let format = cli_format
            .map(OutputFormat::from)
            .or(file_format)
            .unwrap_or_default();
        Self {
            format,
            color,
            // JSON output stays free of spinner noise
            show_progress: show_progress && !quiet && format != OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_format_wins() {
        let config = OutputConfig::resolve(
            Some(CliOutputFormat::Full),
            Some(OutputFormat::Adr),
            true,
            true,
            false,
        );
        assert_eq!(config.format, OutputFormat::Full);
        assert!(config.show_progress);
    }

    #[test]
    fn test_falls_back_to_file_then_default() {
        let from_file = OutputConfig::resolve(None, Some(OutputFormat::Adr), true, true, false);
        assert_eq!(from_file.format, OutputFormat::Adr);

        let default = OutputConfig::resolve(None, None, true, true, false);
        assert_eq!(default.format, OutputFormat::Summary);
    }

    #[test]
    fn test_json_and_quiet_hide_progress() {
        assert!(!OutputConfig::resolve(Some(CliOutputFormat::Json), None, true, true, false).show_progress);
        assert!(!OutputConfig::resolve(None, None, true, true, true).show_progress);
    }
}
