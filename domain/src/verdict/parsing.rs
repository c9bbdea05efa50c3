//! Response parsing for reasoning-backed agents.
//!
//! Pure text handling, no I/O: turns a free-form model response into a
//! position, a confidence and the side effects the agent wants (evidence to
//! share, messages to send).
//!
//! # Recognized directives
//!
//! | Line | Meaning |
//! |------|---------|
//! | `POSITION: SUPPORT` | stance (required) |
//! | `CONFIDENCE: 0.8` / `80%` | self-reported confidence |
//! | `EVIDENCE: source \| content` | evidence for the shared pool |
//! | `MESSAGE: @agent text` | message for the bus |
//!
//! Every other non-empty line is kept as reasoning. Directive keys are
//! case-insensitive and may be wrapped in markdown emphasis or list markers.

use crate::core::error::DomainError;
use crate::debate::{ArgumentDraft, Position};

/// Confidence assumed when a response states a position but no confidence
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Structured form of an agent response
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArgument {
    pub draft: ArgumentDraft,
    /// `(source, content)` pairs
    pub evidence: Vec<(String, String)>,
    pub messages: Vec<String>,
}

/// Parse a confidence value: `0.8`, `.8`, `80%` or `80` all mean 0.8
pub fn parse_confidence(value: &str) -> Option<f64> {
    let cleaned = value.trim().trim_matches('*').trim();
    let (number, percent) = match cleaned.strip_suffix('%') {
        Some(n) => (n.trim(), true),
        None => (cleaned, false),
    };
    let number = number
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default();
    let parsed: f64 = number.parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    let scaled = if percent || parsed > 1.0 {
        parsed / 100.0
    } else {
        parsed
    };
    Some(scaled.clamp(0.0, 1.0))
}

/// Parse a model response into an argument.
///
/// # Errors
///
/// [`DomainError::MalformedResponse`] when no valid `POSITION:` line exists.
///
/// ```
/// use council_domain::{Position, parse_argument_response};
///
/// let parsed = parse_argument_response(
///     "POSITION: OPPOSE\nCONFIDENCE: 70%\nThe audit trail is incomplete.",
/// ).unwrap();
/// assert_eq!(parsed.draft.position, Position::Oppose);
/// assert_eq!(parsed.draft.confidence, 0.7);
/// ```
pub fn parse_argument_response(response: &str) -> Result<ParsedArgument, DomainError> {
    let mut position = None;
    let mut confidence = None;
    let mut evidence = Vec::new();
    let mut messages = Vec::new();
    let mut reasoning: Vec<&str> = Vec::new();

    for raw_line in response.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with("```") {
            continue;
        }

        let stripped = line.trim_start_matches(['-', '*', '#', '>', ' ']);
        let directive = stripped.split_once(':').and_then(|(key, value)| {
            let key = key.trim().trim_matches('*').trim().to_uppercase();
            let value = value.trim().trim_start_matches('*').trim();
            match key.as_str() {
                "POSITION" | "STANCE" | "VOTE" => Some(("POSITION", value)),
                "CONFIDENCE" => Some(("CONFIDENCE", value)),
                "EVIDENCE" => Some(("EVIDENCE", value)),
                "MESSAGE" => Some(("MESSAGE", value)),
                "REASONING" => Some(("REASONING", value)),
                _ => None,
            }
        });

        match directive {
            Some(("POSITION", value)) => {
                if position.is_none() {
                    let word = value.split_whitespace().next().unwrap_or_default();
                    position = word.parse::<Position>().ok();
                }
            }
            Some(("CONFIDENCE", value)) => {
                if confidence.is_none() {
                    confidence = parse_confidence(value);
                }
            }
            Some(("EVIDENCE", value)) => {
                let (source, content) = match value.split_once('|') {
                    Some((s, c)) => (s.trim(), c.trim()),
                    None => ("agent analysis", value),
                };
                if !content.is_empty() {
                    evidence.push((source.to_string(), content.to_string()));
                }
            }
            Some(("MESSAGE", value)) => {
                if !value.is_empty() {
                    messages.push(value.to_string());
                }
            }
            Some((_, value)) => {
                if !value.is_empty() {
                    reasoning.push(value);
                }
            }
            None => reasoning.push(line),
        }
    }

    let position = position.ok_or_else(|| {
        DomainError::MalformedResponse("response does not state a POSITION".to_string())
    })?;

    Ok(ParsedArgument {
        draft: ArgumentDraft::new(
            position,
            reasoning.join("\n"),
            confidence.unwrap_or(DEFAULT_CONFIDENCE),
        ),
        evidence,
        messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let response = r#"
**POSITION:** SUPPORT
**CONFIDENCE:** 0.85
REASONING: Managed Postgres removes two on-call rotations.
- EVIDENCE: pricing page | $0.12 per vCPU hour
MESSAGE: @security_analyst is encryption at rest enabled by default?
Backups are automated.
"#;
        let parsed = parse_argument_response(response).unwrap();
        assert_eq!(parsed.draft.position, Position::Support);
        assert_eq!(parsed.draft.confidence, 0.85);
        assert_eq!(
            parsed.draft.reasoning,
            "Managed Postgres removes two on-call rotations.\nBackups are automated."
        );
        assert_eq!(
            parsed.evidence,
            vec![("pricing page".to_string(), "$0.12 per vCPU hour".to_string())]
        );
        assert_eq!(parsed.messages.len(), 1);
        assert!(parsed.messages[0].starts_with("@security_analyst"));
    }

    #[test]
    fn test_missing_position_is_malformed() {
        let err = parse_argument_response("I think it is fine.").unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));

        let err = parse_argument_response("POSITION: perhaps").unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_confidence_defaults() {
        let parsed = parse_argument_response("Position: neutral\nTrade-offs both ways.").unwrap();
        assert_eq!(parsed.draft.position, Position::Neutral);
        assert_eq!(parsed.draft.confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_parse_confidence_forms() {
        assert_eq!(parse_confidence("0.8"), Some(0.8));
        assert_eq!(parse_confidence("80%"), Some(0.8));
        assert_eq!(parse_confidence("80"), Some(0.8));
        assert_eq!(parse_confidence("0.9 (high)"), Some(0.9));
        assert_eq!(parse_confidence("150%"), Some(1.0));
        assert_eq!(parse_confidence("high"), None);
    }

    #[test]
    fn test_evidence_without_source() {
        let parsed = parse_argument_response("POSITION: OPPOSE\nEVIDENCE: p99 latency is 40ms").unwrap();
        assert_eq!(parsed.evidence[0].0, "agent analysis");
        assert_eq!(parsed.evidence[0].1, "p99 latency is 40ms");
    }
}
