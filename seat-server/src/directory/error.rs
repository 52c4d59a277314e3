//! Directory error types.

use crate::domain::DomainError;

/// Errors from the storage collaborator.
///
/// Absence is never an error here: lookups return `Ok(None)`. These
/// variants cover storage failures and rejected writes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// The backing store could not answer
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    /// A write referenced a record that does not exist
    #[error("unknown {kind}: {id}")]
    UnknownReference { kind: &'static str, id: u64 },

    /// A write reused an existing id
    #[error("duplicate {kind}: {id}")]
    Duplicate { kind: &'static str, id: u64 },

    /// A record failed domain validation
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteId;

    #[test]
    fn error_display() {
        let err = DirectoryError::Unavailable("connection reset".into());
        assert_eq!(err.to_string(), "directory unavailable: connection reset");

        let err = DirectoryError::UnknownReference { kind: "station", id: 9 };
        assert_eq!(err.to_string(), "unknown station: 9");

        let err = DirectoryError::Duplicate { kind: "seat", id: 3 };
        assert_eq!(err.to_string(), "duplicate seat: 3");

        let err: DirectoryError = DomainError::NonContiguousOrder { route: RouteId(2) }.into();
        assert_eq!(err.to_string(), "stop orders on route#2 are not contiguous from 0");
    }
}
