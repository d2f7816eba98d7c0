//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point the CLI (or any other front end) talks to.
//!
//! - **Dispatches** to the matching command function
//! - **Returns structured types** (`Result<CmdResult>`), never strings for display
//! - Does no terminal I/O
//!
//! `RollbookApi<B: StorageBackend>` is generic over the storage backend:
//! `RollbookApi<FsBackend>` in production, `RollbookApi<MemBackend>` in tests.
//!
//! Dropping the API without calling [`RollbookApi::close`] skips the final
//! save. Every mutation has already been written by then, so nothing is lost
//! unless one of those writes failed.

use crate::commands;
use crate::error::Result;
use crate::model::{Record, RollNumber};
use crate::store::{LoadStatus, RecordStore, StorageBackend};

/// The main API facade for rollbook operations.
pub struct RollbookApi<B: StorageBackend> {
    store: RecordStore<B>,
    paths: commands::RollbookPaths,
}

impl<B: StorageBackend> RollbookApi<B> {
    pub fn new(store: RecordStore<B>, paths: commands::RollbookPaths) -> Self {
        Self { store, paths }
    }

    pub fn add_student(
        &mut self,
        name: &str,
        roll: RollNumber,
        grade: &str,
    ) -> Result<commands::CmdResult> {
        let record = Record::new(name, roll, grade)?;
        commands::add::run(&mut self.store, record)
    }

    pub fn edit_student(
        &mut self,
        roll: RollNumber,
        name: Option<&str>,
        grade: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::edit::run(&mut self.store, roll, name, grade)
    }

    pub fn remove_student(&mut self, roll: RollNumber) -> Result<commands::CmdResult> {
        commands::remove::run(&mut self.store, roll)
    }

    pub fn search_student(&self, roll: RollNumber) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, roll)
    }

    pub fn list_students(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    /// Direct lookup, for front ends that need the current values before
    /// asking for new ones.
    pub fn get_student(&self, roll: RollNumber) -> Option<Record> {
        self.store.search(roll)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    /// Final save; consumes the API.
    pub fn close(self) -> Result<()> {
        self.store.close()
    }

    pub fn load_status(&self) -> &LoadStatus {
        self.store.load_status()
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, RollbookPaths};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RollbookError;
    use crate::store::memory::InMemoryStore;

    fn api() -> RollbookApi<crate::store::mem_backend::MemBackend> {
        RollbookApi::new(InMemoryStore::new(), RollbookPaths::new("/unused"))
    }

    #[test]
    fn add_validates_fields_before_touching_store() {
        let mut api = api();
        let err = api.add_student("", 1, "A").unwrap_err();

        assert!(matches!(err, RollbookError::InvalidRecord(_)));
        assert!(api.store().is_empty());
        assert_eq!(api.store().backend().write_count(), 0);
    }

    #[test]
    fn dispatches_crud() {
        let mut api = api();
        api.add_student("Alice", 101, "A").unwrap();
        api.add_student("Bob", 102, "B").unwrap();

        let found = api.search_student(101).unwrap();
        assert_eq!(found.listed_records[0].grade(), "A");

        api.edit_student(102, Some("Bobby"), None).unwrap();
        assert_eq!(api.get_student(102).unwrap().name(), "Bobby");

        api.remove_student(101).unwrap();
        let listed = api.list_students().unwrap().listed_records;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].roll(), 102);
    }
}
