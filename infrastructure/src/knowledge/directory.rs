//! Directory-backed knowledge store.
//!
//! Loads every `.md` and `.txt` file under a directory once, splits them
//! into paragraphs and answers lookups by keyword overlap with the query.

use council_application::{KnowledgeEntry, KnowledgeStore};
use council_domain::core::text::{truncate, word_set};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const EXCERPT_LEN: usize = 400;
const MIN_WORD_LEN: usize = 3;

struct Passage {
    source: String,
    text: String,
    words: BTreeSet<String>,
}

/// Read-only knowledge store over a directory of text files
pub struct DirectoryKnowledgeStore {
    root: PathBuf,
    passages: Vec<Passage>,
}

impl DirectoryKnowledgeStore {
    /// Index `root` recursively. Unreadable files are skipped with a warning.
    pub fn open(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let mut passages = Vec::new();

        for path in Self::files(&root) {
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping knowledge file {}: {}", path.display(), e);
                    continue;
                }
            };
            let source = path
                .strip_prefix(&root)
                .unwrap_or(&path)
                .display()
                .to_string();
            passages.extend(content.split("\n\n").filter_map(|para| {
                let text = para.trim();
                if text.is_empty() {
                    return None;
                }
                Some(Passage {
                    source: source.clone(),
                    text: text.to_string(),
                    words: keywords(text),
                })
            }));
        }

        debug!(
            "Indexed {} knowledge passages under {}",
            passages.len(),
            root.display()
        );
        Self { root, passages }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }

    fn files(root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for ext in ["md", "txt"] {
            let pattern = root.join("**").join(format!("*.{}", ext));
            let Some(pattern) = pattern.to_str() else {
                continue;
            };
            match glob::glob(pattern) {
                Ok(paths) => files.extend(paths.flatten()),
                Err(e) => warn!("Invalid knowledge pattern {}: {}", pattern, e),
            }
        }
        files.sort();
        files
    }
}

fn keywords(text: &str) -> BTreeSet<String> {
    word_set(text)
        .into_iter()
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        .collect()
}

impl KnowledgeStore for DirectoryKnowledgeStore {
    fn lookup(&self, query: &str, limit: usize) -> Vec<KnowledgeEntry> {
        let query = keywords(query);
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &Passage)> = self
            .passages
            .iter()
            .map(|p| (p.words.intersection(&query).count(), p))
            .filter(|(score, _)| *score > 0)
            .collect();
        // stable sort keeps file order among equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(limit)
            .map(|(_, p)| KnowledgeEntry::new(p.source.clone(), truncate(&p.text, EXCERPT_LEN)))
            .collect()
    }
}
