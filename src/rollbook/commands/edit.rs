use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RollNumber;
use crate::store::{RecordStore, StorageBackend};

/// Changes name and/or grade. `None` or blank keeps the current value.
pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    roll: RollNumber,
    name: Option<&str>,
    grade: Option<&str>,
) -> Result<CmdResult> {
    let before = store.search(roll);
    let updated = store.edit(roll, name, grade)?;

    let mut result = CmdResult::default();
    if before.as_ref() == Some(&updated) {
        result.add_message(CmdMessage::info(format!(
            "Student roll no. {} unchanged.",
            roll
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Student roll no. {} updated.",
            roll
        )));
    }
    Ok(result.with_affected_records(vec![updated]))
}
