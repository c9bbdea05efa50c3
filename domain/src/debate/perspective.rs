//! Perspective value object representing an analytical viewpoint

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Named analytical viewpoint bound to one agent (Value Object)
///
/// Built-in perspectives carry a focus brief for prompting; anything else
/// is a `Custom` perspective that must be registered before use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Perspective {
    Cost,
    Security,
    Performance,
    Integration,
    Alternatives,
    Custom(String),
}

impl Perspective {
    /// Get the string identifier for this perspective
    pub fn as_str(&self) -> &str {
        match self {
            Perspective::Cost => "cost",
            Perspective::Security => "security",
            Perspective::Performance => "performance",
            Perspective::Integration => "integration",
            Perspective::Alternatives => "alternatives",
            Perspective::Custom(s) => s,
        }
    }

    /// The built-in perspectives, in their canonical order
    pub fn builtins() -> Vec<Perspective> {
        vec![
            Perspective::Cost,
            Perspective::Security,
            Perspective::Performance,
            Perspective::Integration,
            Perspective::Alternatives,
        ]
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Perspective::Custom(_))
    }

    /// Agent identifier for the agent holding this perspective
    ///
    /// E.g., `cost` -> `cost_analyst`
    pub fn agent_id(&self) -> String {
        format!("{}_analyst", self.as_str())
    }

    /// What an agent holding this perspective pays attention to
    pub fn focus(&self) -> String {
        match self {
            Perspective::Cost => {
                "total cost of ownership, licensing, migration effort and return on investment"
                    .to_string()
            }
            Perspective::Security => {
                "attack surface, data protection, compliance obligations and supply-chain risk"
                    .to_string()
            }
            Perspective::Performance => {
                "latency, throughput, resource usage and behaviour under load".to_string()
            }
            Perspective::Integration => {
                "fit with existing systems, operational burden, team skills and migration path"
                    .to_string()
            }
            Perspective::Alternatives => {
                "competing options, opportunity cost and whether a simpler choice exists"
                    .to_string()
            }
            Perspective::Custom(name) => format!("the {} implications of the decision", name),
        }
    }
}

impl std::fmt::Display for Perspective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Perspective {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        let name = normalized.strip_suffix("_analyst").unwrap_or(&normalized);
        Ok(match name {
            "cost" => Perspective::Cost,
            "security" => Perspective::Security,
            "performance" => Perspective::Performance,
            "integration" => Perspective::Integration,
            "alternatives" => Perspective::Alternatives,
            other => Perspective::Custom(other.to_string()),
        })
    }
}

impl Serialize for Perspective {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Perspective {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(perspective) = s.parse::<Perspective>();
        Ok(perspective)
    }
}
