//! JSONL file store for debate manifests.
//!
//! Each council gets its own `<council_id>.jsonl` file under the manifest
//! directory; each [`ManifestEvent`] is one JSON line, appended through a
//! buffered writer and flushed per event. A council's writer is closed once
//! its recommendation is logged. Timelines are read back from disk, so a
//! later process can replay a council it never ran.

use council_application::ports::manifest::DebateManifest;
use council_domain::{CouncilId, ManifestEvent, ManifestEventType};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors reading a manifest file back
#[derive(Error, Debug)]
pub enum ManifestReadError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}:{line}: invalid manifest event: {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
}

/// Manifest store writing one JSONL file per council.
///
/// Thread-safe via `Mutex<HashMap<_, BufWriter<File>>>`. Only councils that
/// are still running hold an open writer. Flushes on `Drop`.
pub struct JsonlManifest {
    dir: PathBuf,
    writers: Mutex<HashMap<CouncilId, BufWriter<File>>>,
}

impl JsonlManifest {
    /// Create a store under `dir`.
    ///
    /// Creates the directory if it doesn't exist.
    /// Returns `None` if the directory cannot be created.
    pub fn new(dir: impl AsRef<Path>) -> Option<Self> {
        let dir = dir.as_ref();
        if let Err(e) = std::fs::create_dir_all(dir) {
            warn!(
                "Could not create manifest directory {}: {}",
                dir.display(),
                e
            );
            return None;
        }
        Some(Self {
            dir: dir.to_path_buf(),
            writers: Mutex::new(HashMap::new()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `council_id`'s events
    pub fn path_for(&self, council_id: &CouncilId) -> PathBuf {
        let name: String = council_id
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.jsonl", name))
    }

    /// Council ids with a manifest file in the directory, sorted
    pub fn councils(&self) -> Vec<CouncilId> {
        let pattern = self.dir.join("*.jsonl");
        let Some(pattern) = pattern.to_str() else {
            return Vec::new();
        };
        let Ok(paths) = glob::glob(pattern) else {
            return Vec::new();
        };
        let mut ids: Vec<CouncilId> = paths
            .flatten()
            .filter_map(|p| p.file_stem().map(|s| CouncilId::from(s.to_string_lossy().as_ref())))
            .collect();
        ids.sort();
        ids
    }

    /// Parse every event in a manifest file.
    ///
    /// Blank lines are skipped; any other malformed line is an error.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<ManifestEvent>, ManifestReadError> {
        let path = path.as_ref();
        let io_error = |source| ManifestReadError::Io {
            path: path.to_path_buf(),
            source,
        };
        let reader = BufReader::new(File::open(path).map_err(io_error)?);

        let mut events = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(io_error)?;
            if line.trim().is_empty() {
                continue;
            }
            let event = serde_json::from_str(&line).map_err(|source| ManifestReadError::Parse {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })?;
            events.push(event);
        }
        Ok(events)
    }

    fn open_writer(&self, council_id: &CouncilId) -> Option<BufWriter<File>> {
        let path = self.path_for(council_id);
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                debug!("Recording manifest to {}", path.display());
                Some(BufWriter::new(file))
            }
            Err(e) => {
                warn!("Could not open manifest file {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl DebateManifest for JsonlManifest {
    fn log_event(&self, event: ManifestEvent) {
        let Ok(line) = serde_json::to_string(&event) else {
            return;
        };

        let mut writers = self.writers.lock().unwrap_or_else(PoisonError::into_inner);
        if !writers.contains_key(&event.council_id) {
            let Some(writer) = self.open_writer(&event.council_id) else {
                return;
            };
            writers.insert(event.council_id.clone(), writer);
        }
        if let Some(writer) = writers.get_mut(&event.council_id)
            && let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush())
        {
            warn!("Could not write manifest event: {}", e);
        }

        // recommendation_emitted is the last event a council logs
        if event.event == ManifestEventType::RecommendationEmitted
            && let Some(mut writer) = writers.remove(&event.council_id)
        {
            let _ = writer.flush();
            debug!("Closed manifest for {}", event.council_id);
        }
    }

    fn timeline(&self, council_id: &CouncilId) -> Vec<ManifestEvent> {
        let path = self.path_for(council_id);
        if !path.exists() {
            return Vec::new();
        }
        match Self::read_file(&path) {
            Ok(events) => events
                .into_iter()
                .filter(|e| &e.council_id == council_id)
                .collect(),
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        }
    }

    fn reference(&self, council_id: &CouncilId) -> Option<String> {
        Some(self.path_for(council_id).display().to_string())
    }
}

impl Drop for JsonlManifest {
    fn drop(&mut self) {
        let mut writers = self.writers.lock().unwrap_or_else(PoisonError::into_inner);
        for writer in writers.values_mut() {
            let _ = writer.flush();
        }
    }
}
