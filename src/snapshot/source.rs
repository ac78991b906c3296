//! Snapshot sources.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SourceConfig;
use crate::parser::{parse_objects, parse_status, ParseError};
use crate::snapshot::model::Snapshots;

/// Errors that make the monitoring data unavailable.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// A snapshot file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot file does not follow its grammar.
    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// No snapshot has been loaded successfully yet.
    #[error("no snapshot loaded yet")]
    NotLoaded,

    /// A recent refresh failed and the next attempt is not due yet.
    #[error("snapshot refresh failed recently, retrying later: {0}")]
    Backoff(String),

    /// The blocking parse task failed to complete.
    #[error("snapshot task failed: {0}")]
    Task(String),
}

/// Something that can build a fresh pair of snapshots.
///
/// `load` blocks; callers run it on the blocking pool.
pub trait SnapshotSource: Send + Sync {
    fn load(&self) -> Result<Snapshots, SnapshotError>;

    /// Files whose modification should trigger a reload.
    fn watched_paths(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// Reads `status.dat` and `objects.cache` from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    status_path: PathBuf,
    objects_path: PathBuf,
}

impl FileSource {
    pub fn new(status_path: impl Into<PathBuf>, objects_path: impl Into<PathBuf>) -> Self {
        Self {
            status_path: status_path.into(),
            objects_path: objects_path.into(),
        }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(&config.status_path, &config.objects_path)
    }
}

impl SnapshotSource for FileSource {
    fn load(&self) -> Result<Snapshots, SnapshotError> {
        let status_text = read(&self.status_path)?;
        let status = parse_status(&status_text).map_err(|source| SnapshotError::Parse {
            path: self.status_path.clone(),
            source,
        })?;

        let objects_text = read(&self.objects_path)?;
        let objects = parse_objects(&objects_text).map_err(|source| SnapshotError::Parse {
            path: self.objects_path.clone(),
            source,
        })?;

        tracing::debug!(
            hosts = status.len(),
            classes = objects.len(),
            "Snapshot files parsed"
        );
        Ok(Snapshots::new(status, objects))
    }

    fn watched_paths(&self) -> Vec<PathBuf> {
        vec![self.status_path.clone(), self.objects_path.clone()]
    }
}

fn read(path: &Path) -> Result<String, SnapshotError> {
    fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })
}
