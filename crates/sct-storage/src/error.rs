//! # Storage Errors

use thiserror::Error;

/// Errors from object storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Buffering the payload to local disk failed.
    #[error("failed to cache payload for {key} locally: {source}")]
    Cache {
        /// Destination key of the upload.
        key: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The requested object does not exist.
    #[error("object not found: {bucket}/{key}")]
    NotFound {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
    },

    /// The entity being created already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Bucket name or object key fails validation.
    #[error("invalid {kind}: {value:?} ({reason})")]
    InvalidName {
        /// `"bucket name"` or `"object key"`.
        kind: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The object body is not UTF-8 text.
    #[error("object {bucket}/{key} is not valid UTF-8")]
    NotUtf8 {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
    },

    /// The store is misconfigured.
    #[error("bad configuration: {0}")]
    Config(String),

    /// The backend rejected the transfer.
    #[error("backend error: {0}")]
    Backend(String),

    /// Stored object metadata could not be read or written.
    #[error("metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_bucket_and_key() {
        let err = StorageError::NotFound {
            bucket: "release-files".into(),
            key: "2024/snapshot.zip".into(),
        };
        assert_eq!(err.to_string(), "object not found: release-files/2024/snapshot.zip");
    }

    #[test]
    fn invalid_name_shows_reason() {
        let err = StorageError::InvalidName {
            kind: "object key",
            value: "../etc/passwd".into(),
            reason: "contains '..' segment".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("object key"));
        assert!(msg.contains(".."));
    }

    #[test]
    fn cache_error_keeps_source() {
        let err = StorageError::Cache {
            key: "k".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert!(err.to_string().contains("disk full"));
    }
}
