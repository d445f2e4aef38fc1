//! Tracking of in-progress files
//!
//! Downloads and output are written to temporary files next to their
//! destination and persisted in one rename. Until then the temporary path
//! is registered here so an interrupted run can remove it.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Registry of temporary files that have not been persisted yet
#[derive(Debug, Clone, Default)]
pub struct WorkFiles {
    pending: Arc<Mutex<Vec<PathBuf>>>,
}

impl WorkFiles {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace `dest` with `contents`
    pub fn write<F>(&self, dest: &Path, contents: F) -> Result<()>
    where
        F: FnOnce(&mut NamedTempFile) -> std::io::Result<()>,
    {
        let dir = match dest.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        // Created under the lock so an interrupt never sees it unregistered
        let mut file = {
            let mut pending = self.pending.lock();
            let file = NamedTempFile::new_in(dir)
                .with_context(|| format!("Failed to create work file in {}", dir.display()))?;
            pending.push(file.path().to_path_buf());
            file
        };
        let work_path = file.path().to_path_buf();
        debug!(work = %work_path.display(), dest = %dest.display(), "Writing work file");

        let written = contents(&mut file).and_then(|()| file.flush());
        let result = match written {
            Ok(()) => file
                .persist(dest)
                .map(drop)
                .map_err(|e| e.error)
                .with_context(|| format!("Failed to write {}", dest.display())),
            Err(e) => Err(e).with_context(|| format!("Failed to write {}", dest.display())),
        };

        self.pending.lock().retain(|p| p != &work_path);
        result
    }

    /// Number of files currently in progress
    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Remove every file still in progress
    pub fn remove_all(&self) {
        for path in self.pending.lock().drain(..) {
            match std::fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "Removed work file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove work file"),
            }
        }
    }
}
