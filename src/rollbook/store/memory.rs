use super::mem_backend::MemBackend;
use super::record_store::RecordStore;

pub type InMemoryStore = RecordStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RecordStore::open(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Record;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` students with roll numbers 1..=count.
        pub fn with_students(mut self, count: u32) -> Self {
            for roll in 1..=count {
                let record = Record::new(format!("Student {}", roll), roll, "A").unwrap();
                self.store.add(record).unwrap();
            }
            self
        }

        pub fn with_student(mut self, name: &str, roll: u32, grade: &str) -> Self {
            self.store.add(Record::new(name, roll, grade).unwrap()).unwrap();
            self
        }
    }
}
