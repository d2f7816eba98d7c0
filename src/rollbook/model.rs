use crate::error::{Result, RollbookError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique key of a student record.
pub type RollNumber = u32;

/// One student: name, roll number and grade.
///
/// The roll number is fixed at construction. Name and grade can only be
/// changed through the store's `edit`, which is why the fields are private:
/// a `Record` handed out by the store is a detached copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: String,
    roll: RollNumber,
    grade: String,
}

impl Record {
    /// Builds a validated record. Surrounding whitespace is trimmed from
    /// `name` and `grade`, and both must be non-empty afterwards.
    pub fn new(name: impl AsRef<str>, roll: RollNumber, grade: impl AsRef<str>) -> Result<Self> {
        let record = Self {
            name: name.as_ref().trim().to_string(),
            roll,
            grade: grade.as_ref().trim().to_string(),
        };
        record.validate()?;
        Ok(record)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roll(&self) -> RollNumber {
        self.roll
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    /// Checks the field invariants. Used on construction and on every record
    /// read back from disk.
    pub fn validate(&self) -> Result<()> {
        if self.roll == 0 {
            return Err(RollbookError::InvalidRecord(
                "roll number must be a positive integer".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(RollbookError::InvalidRecord(
                "name cannot be empty".to_string(),
            ));
        }
        if self.grade.trim().is_empty() {
            return Err(RollbookError::InvalidRecord(
                "grade cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Applies a partial update. `None` or a blank value keeps the current field.
    /// Returns true if anything changed.
    pub(crate) fn apply(&mut self, name: Option<&str>, grade: Option<&str>) -> bool {
        let mut changed = false;
        if let Some(name) = non_blank(name) {
            changed |= self.name != name;
            self.name = name.to_string();
        }
        if let Some(grade) = non_blank(grade) {
            changed |= self.grade != grade;
            self.grade = grade.to_string();
        }
        changed
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.roll, self.grade)
    }
}
