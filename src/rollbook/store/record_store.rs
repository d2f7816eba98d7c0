use super::backend::StorageBackend;
use crate::error::{Result, RollbookError};
use crate::model::{Record, RollNumber};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// What happened when the store read its persistence target at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing persisted yet; started empty.
    Fresh,
    /// Prior state read back with this many records.
    Loaded(usize),
    /// The target could not be read or decoded; started empty.
    Corrupt(String),
}

/// The record collection plus its persistence binding.
///
/// Records are kept in insertion order. Every successful mutation writes the
/// whole collection through the backend before returning. If that write
/// fails the mutation stays applied in memory and the error is returned.
pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    records: Vec<Record>,
    load_status: LoadStatus,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Opens the store, loading whatever the backend holds.
    ///
    /// A missing target gives an empty store. An unreadable or invalid one is
    /// logged and also gives an empty store; this never fails.
    pub fn open(backend: B) -> Self {
        let location = backend.location();
        let (records, load_status) = match backend.load_records() {
            Ok(None) => {
                debug!(location = %location.display(), "no data file, starting empty");
                (Vec::new(), LoadStatus::Fresh)
            }
            Ok(Some(records)) => match check_loaded(&records) {
                Ok(()) => {
                    let count = records.len();
                    debug!(count, "loaded records");
                    (records, LoadStatus::Loaded(count))
                }
                Err(e) => corrupt(&location, e),
            },
            Err(e) => corrupt(&location, e),
        };

        Self {
            backend,
            records,
            load_status,
        }
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record. Fails with `DuplicateKey` if the roll number is taken.
    pub fn add(&mut self, record: Record) -> Result<()> {
        if self.position(record.roll()).is_some() {
            return Err(RollbookError::DuplicateKey(record.roll()));
        }
        info!(roll = record.roll(), "adding record");
        self.records.push(record);
        self.persist()
    }

    /// Removes and returns the record with `roll`.
    pub fn remove(&mut self, roll: RollNumber) -> Result<Record> {
        let pos = self.position(roll).ok_or(RollbookError::NotFound(roll))?;
        let removed = self.records.remove(pos);
        info!(roll, "removed record");
        self.persist()?;
        Ok(removed)
    }

    /// Returns a copy of the record with `roll`, if any.
    pub fn search(&self, roll: RollNumber) -> Option<Record> {
        self.position(roll).map(|pos| self.records[pos].clone())
    }

    /// Replaces name and/or grade of an existing record.
    ///
    /// `None` or a blank value leaves that field as it is. Returns a copy of
    /// the record as stored after the edit.
    pub fn edit(
        &mut self,
        roll: RollNumber,
        name: Option<&str>,
        grade: Option<&str>,
    ) -> Result<Record> {
        let pos = self.position(roll).ok_or(RollbookError::NotFound(roll))?;
        let changed = self.records[pos].apply(name, grade);
        info!(roll, changed, "edited record");
        self.persist()?;
        Ok(self.records[pos].clone())
    }

    /// All records in insertion order.
    pub fn list_all(&self) -> Vec<Record> {
        self.records.clone()
    }

    /// Writes the whole collection to the persistence target.
    pub fn save(&self) -> Result<()> {
        self.backend.save_records(&self.records)
    }

    /// Final save at shutdown.
    pub fn close(self) -> Result<()> {
        debug!(count = self.records.len(), "closing store");
        self.save()
    }

    fn persist(&self) -> Result<()> {
        self.save().inspect_err(|e| {
            warn!(error = %e, "failed to persist records; in-memory state is ahead of disk");
        })
    }

    fn position(&self, roll: RollNumber) -> Option<usize> {
        self.records.iter().position(|r| r.roll() == roll)
    }
}

fn check_loaded(records: &[Record]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        record.validate()?;
        if !seen.insert(record.roll()) {
            return Err(RollbookError::DuplicateKey(record.roll()));
        }
    }
    Ok(())
}

fn corrupt(location: &Path, err: RollbookError) -> (Vec<Record>, LoadStatus) {
    warn!(
        location = %location.display(),
        error = %err,
        "failed to load data, starting with an empty list"
    );
    (Vec::new(), LoadStatus::Corrupt(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use crate::store::mem_backend::MemBackend;

    fn rec(name: &str, roll: RollNumber, grade: &str) -> Record {
        Record::new(name, roll, grade).unwrap()
    }

    #[test]
    fn empty_backend_starts_fresh() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.load_status(), &LoadStatus::Fresh);
    }

    #[test]
    fn add_persists_each_time() {
        let mut store = InMemoryStore::new();
        store.add(rec("Alice", 101, "A")).unwrap();
        store.add(rec("Bob", 102, "B")).unwrap();

        assert_eq!(store.backend().write_count(), 2);
        assert_eq!(store.backend().persisted().unwrap(), store.list_all());
    }

    #[test]
    fn duplicate_key_leaves_collection_unchanged() {
        let mut store = InMemoryStore::new();
        store.add(rec("Alice", 101, "A")).unwrap();
        let before = store.list_all();

        let err = store.add(rec("Eve", 101, "C")).unwrap_err();

        assert!(matches!(err, RollbookError::DuplicateKey(101)));
        assert_eq!(store.list_all(), before);
        assert_eq!(store.backend().write_count(), 1);
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut store = InMemoryStore::new();
        store.add(rec("Alice", 101, "A")).unwrap();

        let err = store.remove(999).unwrap_err();

        assert!(matches!(err, RollbookError::NotFound(999)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn search_returns_detached_copy() {
        let mut store = InMemoryStore::new();
        store.add(rec("Alice", 101, "A")).unwrap();

        let mut found = store.search(101).unwrap();
        found.apply(Some("Mallory"), None);

        assert_eq!(store.search(101).unwrap().name(), "Alice");
        assert!(store.search(5).is_none());
    }

    #[test]
    fn edit_grade_only() {
        let mut store = InMemoryStore::new();
        store.add(rec("Bob", 102, "B")).unwrap();

        let updated = store.edit(102, None, Some("B+")).unwrap();

        assert_eq!(updated, rec("Bob", 102, "B+"));
        assert_eq!(store.search(102).unwrap(), updated);
    }

    #[test]
    fn edit_with_blanks_keeps_both_fields() {
        let mut store = InMemoryStore::new();
        store.add(rec("Bob", 102, "B")).unwrap();

        store.edit(102, Some(""), Some("")).unwrap();

        assert_eq!(store.search(102).unwrap(), rec("Bob", 102, "B"));
    }

    #[test]
    fn edit_missing_is_not_found() {
        let mut store = InMemoryStore::new();
        let err = store.edit(7, Some("Nobody"), None).unwrap_err();
        assert!(matches!(err, RollbookError::NotFound(7)));
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn write_failure_keeps_memory_change() {
        let mut store = InMemoryStore::new();
        store.backend().set_simulate_write_error(true);

        let err = store.add(rec("Alice", 101, "A")).unwrap_err();

        assert!(err.is_persistence());
        assert_eq!(store.search(101).unwrap().name(), "Alice");
        assert!(store.backend().persisted().is_none());
    }

    #[test]
    fn remove_write_failure_keeps_removal() {
        let mut store = InMemoryStore::new();
        store.add(rec("Alice", 101, "A")).unwrap();
        store.add(rec("Bob", 102, "B")).unwrap();
        store.backend().set_simulate_write_error(true);

        let err = store.remove(101).unwrap_err();

        assert!(err.is_persistence());
        assert!(store.search(101).is_none());
        assert_eq!(store.list_all(), vec![rec("Bob", 102, "B")]);
        // Disk still has the state before the failed write
        assert_eq!(store.backend().persisted().unwrap().len(), 2);
    }

    #[test]
    fn edit_write_failure_keeps_edit() {
        let mut store = InMemoryStore::new();
        store.add(rec("Bob", 102, "B")).unwrap();
        store.backend().set_simulate_write_error(true);

        let err = store.edit(102, Some("Bobby"), Some("A")).unwrap_err();

        assert!(err.is_persistence());
        assert_eq!(store.search(102).unwrap(), rec("Bobby", 102, "A"));
        assert_eq!(
            store.backend().persisted().unwrap(),
            vec![rec("Bob", 102, "B")]
        );
    }

    #[test]
    fn borrowed_backend_stays_observable_after_close() {
        let backend = MemBackend::new();
        let mut store = RecordStore::open(&backend);
        store.add(rec("Alice", 101, "A")).unwrap();

        store.close().unwrap();

        assert_eq!(backend.write_count(), 2);
        assert_eq!(backend.persisted().unwrap(), vec![rec("Alice", 101, "A")]);
    }

    #[test]
    fn reopen_restores_order() {
        let mut store = InMemoryStore::new();
        store.add(rec("Carol", 3, "C")).unwrap();
        store.add(rec("Alice", 1, "A")).unwrap();
        store.add(rec("Bob", 2, "B")).unwrap();
        let saved = store.backend().persisted().unwrap();

        let reopened = RecordStore::open(MemBackend::with_records(saved));

        assert_eq!(reopened.list_all(), store.list_all());
        assert_eq!(reopened.load_status(), &LoadStatus::Loaded(3));
    }

    #[test]
    fn duplicate_keys_on_disk_are_treated_as_corrupt() {
        let backend =
            MemBackend::with_records(vec![rec("Alice", 1, "A"), rec("Alice again", 1, "B")]);

        let store = RecordStore::open(backend);

        assert!(store.is_empty());
        assert!(matches!(store.load_status(), LoadStatus::Corrupt(_)));
    }

    #[test]
    fn unreadable_backend_starts_empty() {
        let store = RecordStore::open(MemBackend::with_corrupt_data("garbage"));
        assert!(store.is_empty());
        assert_eq!(
            store.load_status(),
            &LoadStatus::Corrupt("Store error: garbage".to_string())
        );
    }

    #[test]
    fn save_twice_writes_same_state() {
        let mut store = InMemoryStore::new();
        store.add(rec("Alice", 101, "A")).unwrap();

        store.save().unwrap();
        let first = store.backend().persisted();
        store.save().unwrap();

        assert_eq!(store.backend().persisted(), first);
        assert_eq!(store.backend().write_count(), 3);
    }

    #[test]
    fn close_reports_final_save_failure() {
        assert!(InMemoryStore::new().close().is_ok());

        let store = InMemoryStore::new();
        store.backend().set_simulate_write_error(true);
        assert!(store.close().unwrap_err().is_persistence());
    }

    #[test]
    fn scenario_from_add_to_edit() {
        let mut store = InMemoryStore::new();
        store.add(rec("Alice", 101, "A")).unwrap();
        store.add(rec("Bob", 102, "B")).unwrap();
        assert_eq!(store.search(101).unwrap(), rec("Alice", 101, "A"));

        assert!(store.add(rec("Eve", 101, "C")).is_err());
        assert_eq!(
            store.list_all(),
            vec![rec("Alice", 101, "A"), rec("Bob", 102, "B")]
        );

        store.remove(101).unwrap();
        assert_eq!(store.list_all(), vec![rec("Bob", 102, "B")]);

        store.edit(102, Some("Bobby"), None).unwrap();
        assert_eq!(store.search(102).unwrap(), rec("Bobby", 102, "B"));
    }
}
