//! # Storage Error Types
//!
//! Error types for the storage medium behind the cart.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / quota / serde_json::Error                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds the key involved                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore: warn! and carry on                                         │
//! │  (the in-memory cart stays authoritative for the session)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Storage medium errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The write would push the medium past its size limit.
    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, limit {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// The key cannot be mapped onto the medium (e.g. path separators for files).
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Encoding the value failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    /// Wraps an I/O error with the key it concerned.
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::Io {
            key: key.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StorageError::QuotaExceeded {
            key: "peerCafeCart".to_string(),
            needed: 120,
            limit: 64,
        };
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded writing 'peerCafeCart': 120 bytes needed, limit 64"
        );

        let err = StorageError::io(
            "peerCafeCart",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "I/O error on key 'peerCafeCart': denied");
    }
}
