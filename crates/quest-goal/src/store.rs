// store.rs — GoalFile: path-backed persistence for a GoalManager.
//
// A save fully overwrites the file. File handles live only for the duration
// of each call, so they are released on every exit path, including a decode
// failure halfway through a load.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::GoalError;
use crate::manager::GoalManager;

/// A save file on disk.
#[derive(Debug, Clone)]
pub struct GoalFile {
    path: PathBuf,
}

impl GoalFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the manager's state, replacing any previous contents.
    pub fn save(&self, manager: &GoalManager) -> Result<(), GoalError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let file = File::create(&self.path).map_err(|source| self.io_error(source))?;
        manager.save(BufWriter::new(file)).map_err(|e| match e {
            GoalError::Io(source) => self.io_error(source),
            other => other,
        })?;

        tracing::info!(path = %self.path.display(), goals = manager.len(), "saved goals");
        Ok(())
    }

    /// Replace the manager's state with the file's contents.
    ///
    /// A missing file is an `IoError`; the manager is left unchanged on any
    /// failure.
    pub fn load(&self, manager: &mut GoalManager) -> Result<(), GoalError> {
        let file = File::open(&self.path).map_err(|source| self.io_error(source))?;
        manager.load(BufReader::new(file)).map_err(|e| match e {
            GoalError::Io(source) => self.io_error(source),
            other => other,
        })?;

        tracing::info!(path = %self.path.display(), goals = manager.len(), "loaded goals");
        Ok(())
    }

    /// Load the file if it exists, otherwise start from an empty manager.
    pub fn load_or_default(&self) -> Result<GoalManager, GoalError> {
        let mut manager = GoalManager::new();
        if self.exists() {
            self.load(&mut manager)?;
        } else {
            tracing::debug!(path = %self.path.display(), "no save file yet, starting empty");
        }
        Ok(manager)
    }

    fn io_error(&self, source: std::io::Error) -> GoalError {
        GoalError::IoError {
            path: self.path.clone(),
            source,
        }
    }
}
