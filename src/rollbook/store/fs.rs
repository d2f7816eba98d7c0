use super::fs_backend::FsBackend;
use super::record_store::RecordStore;
use std::path::PathBuf;

pub type FileStore = RecordStore<FsBackend>;

impl FileStore {
    /// Opens the store backed by the JSON file at `data_file`.
    pub fn open_file(data_file: impl Into<PathBuf>) -> Self {
        RecordStore::open(FsBackend::new(data_file))
    }
}
