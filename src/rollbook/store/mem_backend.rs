use super::backend::StorageBackend;
use crate::error::{Result, RollbookError};
use crate::model::Record;
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since rollbook is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    records: RefCell<Option<Vec<Record>>>,
    corrupt: RefCell<Option<String>>,
    simulate_write_error: RefCell<bool>,
    writes: RefCell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the backend as if a previous run had saved `records`.
    /// No validation happens here, so tests can seed invalid state.
    pub fn with_records(records: Vec<Record>) -> Self {
        let backend = Self::default();
        *backend.records.borrow_mut() = Some(records);
        backend
    }

    /// Makes the next loads fail as an undecodable target would.
    pub fn with_corrupt_data(reason: &str) -> Self {
        let backend = Self::default();
        *backend.corrupt.borrow_mut() = Some(reason.to_string());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    /// What was last persisted, if anything.
    pub fn persisted(&self) -> Option<Vec<Record>> {
        self.records.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn load_records(&self) -> Result<Option<Vec<Record>>> {
        if let Some(reason) = self.corrupt.borrow().as_ref() {
            return Err(RollbookError::Store(reason.clone()));
        }
        Ok(self.records.borrow().clone())
    }

    fn save_records(&self, records: &[Record]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RollbookError::Store("Simulated write error".to_string()));
        }
        *self.records.borrow_mut() = Some(records.to_vec());
        *self.corrupt.borrow_mut() = None;
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://students.json")
    }
}
