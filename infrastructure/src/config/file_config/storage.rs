//! Manifest and knowledge locations from TOML (`[manifest]`, `[knowledge]`)

use serde::{Deserialize, Serialize};

/// Raw manifest configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileManifestConfig {
    /// Record manifests to disk (in memory only when false)
    pub enabled: bool,
    /// Directory holding one `<council_id>.jsonl` per council
    pub dir: String,
}

impl Default for FileManifestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: ".council/manifests".to_string(),
        }
    }
}

/// Raw knowledge store configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileKnowledgeConfig {
    /// Directory of `.md`/`.txt` reference files agents may consult
    pub dir: Option<String>,
}
