use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RollNumber;
use crate::store::{RecordStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, roll: RollNumber) -> Result<CmdResult> {
    let removed = store.remove(roll)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student with roll number {} removed: {}",
        roll,
        removed.name()
    )));
    Ok(result.with_affected_records(vec![removed]))
}
