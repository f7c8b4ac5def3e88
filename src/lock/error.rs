use std::fmt;

/// Error type for lock operations.
///
/// Contention is not an error: it is reported as
/// [`Acquisition::Contended`](super::Acquisition::Contended).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    /// The lock store is unreachable or rejected the write.
    Storage(String),
    /// A conditional write found a different version than expected.
    Conflict {
        document_id: String,
        expected: Option<u64>,
        actual: Option<u64>,
    },
    /// A stored lock record could not be encoded or decoded.
    Serde(String),
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::Storage(msg) => write!(f, "lock storage error: {}", msg),
            LockError::Conflict {
                document_id,
                expected,
                actual,
            } => write!(
                f,
                "conflicting lock write on {} (expected version {}, found {})",
                document_id,
                version_label(expected),
                version_label(actual)
            ),
            LockError::Serde(msg) => write!(f, "lock serialization error: {}", msg),
        }
    }
}

fn version_label(version: &Option<u64>) -> String {
    match version {
        Some(v) => v.to_string(),
        None => "none".to_string(),
    }
}

impl std::error::Error for LockError {}
