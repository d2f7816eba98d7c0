use crate::model::RollNumber;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RollbookError {
    #[error("A student with roll number {0} already exists")]
    DuplicateKey(RollNumber),

    #[error("Student with roll number {0} not found")]
    NotFound(RollNumber),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl RollbookError {
    /// True for failures writing the persistence target.
    ///
    /// When one of these comes back from a mutating call, the in-memory
    /// change has already been applied.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            RollbookError::Io(_) | RollbookError::Serialization(_) | RollbookError::Store(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RollbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_persistence_errors() {
        let io = RollbookError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(io.is_persistence());
        assert!(RollbookError::Store("disk full".into()).is_persistence());
        assert!(!RollbookError::DuplicateKey(7).is_persistence());
        assert!(!RollbookError::NotFound(7).is_persistence());
    }

    #[test]
    fn messages_name_the_roll_number() {
        assert_eq!(
            RollbookError::DuplicateKey(101).to_string(),
            "A student with roll number 101 already exists"
        );
        assert_eq!(
            RollbookError::NotFound(9).to_string(),
            "Student with roll number 9 not found"
        );
    }
}
