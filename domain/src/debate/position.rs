//! Agent stance on a topic

use serde::{Deserialize, Serialize};

/// Stance an agent takes on the debated topic
///
/// `Neutral` is a real outcome ("trade-offs present, no clear preference"),
/// not an unset marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    Support,
    Oppose,
    Neutral,
}

impl Position {
    /// All positions in display order
    pub const ALL: [Position; 3] = [Position::Support, Position::Oppose, Position::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Support => "SUPPORT",
            Position::Oppose => "OPPOSE",
            Position::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches(|c: char| !c.is_alphanumeric()).to_uppercase().as_str() {
            "SUPPORT" | "SUPPORTS" | "FOR" => Ok(Position::Support),
            "OPPOSE" | "OPPOSES" | "AGAINST" => Ok(Position::Oppose),
            "NEUTRAL" => Ok(Position::Neutral),
            other => Err(format!(
                "Unknown position: {}. Valid: SUPPORT, OPPOSE, NEUTRAL",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!("support".parse::<Position>(), Ok(Position::Support));
        assert_eq!(" OPPOSE ".parse::<Position>(), Ok(Position::Oppose));
        assert_eq!("**NEUTRAL**".parse::<Position>(), Ok(Position::Neutral));
        assert!("maybe".parse::<Position>().is_err());
    }

    #[test]
    fn test_serde_uses_uppercase() {
        let json = serde_json::to_string(&Position::Support).unwrap();
        assert_eq!(json, "\"SUPPORT\"");
        let back: Position = serde_json::from_str("\"NEUTRAL\"").unwrap();
        assert_eq!(back, Position::Neutral);
    }
}
