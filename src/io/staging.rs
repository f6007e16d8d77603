//! All-or-nothing output files.
//!
//! A command that writes several files stages each one as a hidden temporary
//! file next to its target. Nothing appears at the target paths until
//! `commit`, and dropping uncommitted outputs deletes the temporaries.

use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;

use crate::error::AppError;

#[derive(Debug, Default)]
pub struct StagedOutputs {
    files: Vec<(NamedTempFile, PathBuf)>,
}

impl StagedOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a temporary file for `target` and return its path.
    ///
    /// The temporary keeps the target's extension, since chart backends pick
    /// the image format from it.
    pub fn stage(&mut self, target: &Path) -> Result<PathBuf, AppError> {
        let dir = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let suffix = target
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let tmp = tempfile::Builder::new()
            .prefix(".pgon-")
            .suffix(&suffix)
            .tempfile_in(dir)
            .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", target.display())))?;

        let path = tmp.path().to_path_buf();
        self.files.push((tmp, target.to_path_buf()));
        Ok(path)
    }

    /// Move every staged file into place.
    pub fn commit(self) -> Result<(), AppError> {
        for (tmp, target) in self.files {
            tmp.persist(&target)
                .map_err(|e| AppError::new(2, format!("Failed to write '{}': {}", target.display(), e.error)))?;
            info!("wrote '{}'", target.display());
        }
        Ok(())
    }
}
