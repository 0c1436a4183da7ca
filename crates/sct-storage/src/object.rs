//! # Object Addressing and Metadata
//!
//! Validated bucket names and object keys, plus the metadata and tags that
//! travel with an upload.
//!
//! ## Naming Rules
//!
//! - Bucket names match `^[a-z0-9][a-z0-9.-]{2,62}$`.
//! - Object keys are non-empty, relative, `/`-separated, and contain no
//!   empty, `.` or `..` segments and no backslashes.
//!   [`LocalObjectStore`](crate::LocalObjectStore) stores each key under one
//!   escaped file name, so a key may also be a prefix of another.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

fn invalid(kind: &'static str, value: &str, reason: impl Into<String>) -> StorageError {
    StorageError::InvalidName {
        kind,
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// A validated bucket name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketName(String);

impl BucketName {
    /// Validate a bucket name.
    pub fn new(name: &str) -> Result<Self, StorageError> {
        const KIND: &str = "bucket name";
        if !(3..=63).contains(&name.len()) {
            return Err(invalid(KIND, name, "must be 3 to 63 characters"));
        }
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_lowercase() || c.is_ascii_digit() => {}
            _ => return Err(invalid(KIND, name, "must start with [a-z0-9]")),
        }
        if let Some(c) = chars.find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '.' || *c == '-')) {
            return Err(invalid(KIND, name, format!("invalid character {c:?}")));
        }
        Ok(Self(name.to_string()))
    }

    /// The bucket name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated object key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Validate an object key.
    pub fn new(key: &str) -> Result<Self, StorageError> {
        const KIND: &str = "object key";
        if key.is_empty() {
            return Err(invalid(KIND, key, "must be non-empty"));
        }
        if key.starts_with('/') {
            return Err(invalid(KIND, key, "must be relative"));
        }
        if key.contains('\\') {
            return Err(invalid(KIND, key, "must not contain backslashes"));
        }
        for segment in key.split('/') {
            match segment {
                "" => return Err(invalid(KIND, key, "contains an empty segment")),
                "." | ".." => return Err(invalid(KIND, key, format!("contains '{segment}' segment"))),
                _ => {}
            }
        }
        Ok(Self(key.to_string()))
    }

    /// The key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last `/`-separated segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A key/value tag attached to an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

impl Tag {
    /// Build a tag.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl FromStr for Tag {
    type Err = String;

    /// Parse `key=value`. The value may itself contain `=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((k, v)) if !k.is_empty() => Ok(Self::new(k, v)),
            _ => Err(format!("expected key=value, got {s:?}")),
        }
    }
}

/// Metadata stored alongside an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    /// MIME type of the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Free-form user metadata.
    #[serde(default)]
    pub user_metadata: BTreeMap<String, String>,
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObjectResult {
    /// Destination bucket.
    pub bucket: BucketName,
    /// Destination key.
    pub key: ObjectKey,
    /// Bytes transferred.
    pub size: u64,
}

/// Everything known about a stored object except its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    /// Body length in bytes.
    pub size: u64,
    /// Metadata supplied at upload.
    pub metadata: ObjectMetadata,
    /// Tags supplied at upload or copy.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bucket_name_accepts_valid() {
        assert!(BucketName::new("release-files").is_ok());
        assert!(BucketName::new("snomed.int.builds").is_ok());
        assert!(BucketName::new("abc").is_ok());
    }

    #[test]
    fn bucket_name_rejects_invalid() {
        assert!(BucketName::new("ab").is_err());
        assert!(BucketName::new("-leading").is_err());
        assert!(BucketName::new("Upper").is_err());
        assert!(BucketName::new("under_score").is_err());
        assert!(BucketName::new(&"a".repeat(64)).is_err());
    }

    #[test]
    fn object_key_accepts_nested_paths() {
        let key = ObjectKey::new("international/2024-01-01/snapshot.zip").unwrap();
        assert_eq!(key.file_name(), "snapshot.zip");
        assert_eq!(ObjectKey::new("flat.txt").unwrap().file_name(), "flat.txt");
    }

    #[test]
    fn object_key_rejects_escapes() {
        assert!(ObjectKey::new("").is_err());
        assert!(ObjectKey::new("/abs").is_err());
        assert!(ObjectKey::new("a/../b").is_err());
        assert!(ObjectKey::new("./a").is_err());
        assert!(ObjectKey::new("a//b").is_err());
        assert!(ObjectKey::new("a\\b").is_err());
    }

    #[test]
    fn tag_parses_key_value() {
        assert_eq!("env=prod".parse::<Tag>().unwrap(), Tag::new("env", "prod"));
        assert_eq!("q=a=b".parse::<Tag>().unwrap(), Tag::new("q", "a=b"));
        assert!("novalue".parse::<Tag>().is_err());
        assert!("=v".parse::<Tag>().is_err());
    }

    proptest! {
        #[test]
        fn valid_keys_never_escape(segments in prop::collection::vec("[a-zA-Z0-9_.-]{1,12}", 1..5)) {
            let key = segments.join("/");
            if let Ok(k) = ObjectKey::new(&key) {
                prop_assert!(k.as_str().split('/').all(|s| s != ".." && s != "." && !s.is_empty()));
            }
        }
    }
}
