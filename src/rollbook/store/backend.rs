use crate::error::Result;
use crate::model::Record;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of persistence (filesystem vs memory),
/// while RecordStore handles the "what" (uniqueness, ordering, load policy).
pub trait StorageBackend {
    /// Read the whole persisted collection.
    /// Returns Ok(None) if nothing has been persisted yet.
    /// Returns Err when the target exists but cannot be read or decoded.
    fn load_records(&self) -> Result<Option<Vec<Record>>>;

    /// Overwrite the persisted collection with `records`.
    /// MUST replace the previous state as a whole (no partial writes).
    fn save_records(&self, records: &[Record]) -> Result<()>;

    /// Where the collection lives. For FsBackend, the real file path.
    /// For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}

/// Lets a store borrow a backend the caller keeps hold of.
impl<T: StorageBackend + ?Sized> StorageBackend for &T {
    fn load_records(&self) -> Result<Option<Vec<Record>>> {
        (**self).load_records()
    }

    fn save_records(&self, records: &[Record]) -> Result<()> {
        (**self).save_records(records)
    }

    fn location(&self) -> PathBuf {
        (**self).location()
    }
}
