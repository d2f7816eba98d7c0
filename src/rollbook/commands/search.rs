use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RollNumber;
use crate::store::{RecordStore, StorageBackend};

/// Looks up one student. A miss is an info message, not an error.
pub fn run<B: StorageBackend>(store: &RecordStore<B>, roll: RollNumber) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.search(roll) {
        Some(record) => Ok(result.with_listed_records(vec![record])),
        None => {
            result.add_message(CmdMessage::info(format!(
                "Student with roll number {} not found.",
                roll
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn finds_by_roll() {
        let store = StoreFixture::new().with_student("Alice", 101, "A").store;
        let result = run(&store, 101).unwrap();

        assert_eq!(result.listed_records[0].name(), "Alice");
        assert!(result.messages.is_empty());
    }

    #[test]
    fn miss_is_reported_not_raised() {
        let store = StoreFixture::new().with_students(1).store;
        let result = run(&store, 9).unwrap();

        assert!(result.listed_records.is_empty());
        assert_eq!(
            result.messages[0].content,
            "Student with roll number 9 not found."
        );
    }
}
