use std::path::{Path, PathBuf};

use tracing::info;

use ptplan_core::directory::PatientDirectory;

use crate::error::StorageError;
use crate::state;

/// The patient document on disk.
///
/// Every operation reads or writes the whole document. There is no locking:
/// two processes saving the same file overwrite each other and the last
/// writer wins.
#[derive(Debug, Clone)]
pub struct PatientStore {
    path: PathBuf,
}

impl PatientStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every patient. A missing document is an empty directory.
    pub async fn load_all(&self) -> Result<PatientDirectory, StorageError> {
        let patients: PatientDirectory = state::load_state(&self.path).await?.unwrap_or_default();
        info!(path = %self.path.display(), patients = patients.len(), "patients loaded");
        Ok(patients)
    }

    /// Replace the document with `patients`.
    pub async fn save_all(&self, patients: &PatientDirectory) -> Result<(), StorageError> {
        state::save_state(&self.path, patients).await?;
        info!(path = %self.path.display(), patients = patients.len(), "patients saved");
        Ok(())
    }
}
