use super::backend::StorageBackend;
use crate::error::{Result, RollbookError};
use crate::model::Record;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Stores the collection as a pretty-printed JSON array in a single file.
pub struct FsBackend {
    data_file: PathBuf,
}

impl FsBackend {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).map_err(RollbookError::Io)?;
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .data_file
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("records");
        self.data_file
            .with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }
}

impl StorageBackend for FsBackend {
    fn load_records(&self) -> Result<Option<Vec<Record>>> {
        if !self.data_file.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.data_file).map_err(RollbookError::Io)?;
        let records: Vec<Record> =
            serde_json::from_str(&content).map_err(RollbookError::Serialization)?;
        debug!(
            path = %self.data_file.display(),
            count = records.len(),
            "read data file"
        );
        Ok(Some(records))
    }

    fn save_records(&self, records: &[Record]) -> Result<()> {
        if let Some(parent) = self.data_file.parent() {
            self.ensure_dir(parent)?;
        }

        let content = serde_json::to_string_pretty(records).map_err(RollbookError::Serialization)?;

        // Atomic write: the data file is either the old or the new collection
        let tmp_file = self.tmp_path();
        if let Err(e) = fs::write(&tmp_file, content) {
            let _ = fs::remove_file(&tmp_file);
            return Err(RollbookError::Io(e));
        }
        if let Err(e) = fs::rename(&tmp_file, &self.data_file) {
            let _ = fs::remove_file(&tmp_file);
            return Err(RollbookError::Io(e));
        }

        debug!(
            path = %self.data_file.display(),
            count = records.len(),
            "wrote data file"
        );
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.data_file.clone()
    }
}
