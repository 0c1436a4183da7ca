//! # Object Storage Client
//!
//! Uploads arbitrarily large streams without holding them in memory: the
//! stream is first copied to a uniquely-named local file, and the backend
//! transfers that file.
//!
//! ## Cleanup Invariant
//!
//! The local copy is owned by a `CachedPayload` guard that removes it when
//! dropped. Every exit path from [`ObjectStorageClient::put_object`] drops
//! the guard: success, a failed read, a backend error, or a panic in the
//! backend.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::backend::ObjectBackend;
use crate::error::StorageError;
use crate::object::{BucketName, ObjectKey, ObjectMetadata, PutObjectResult, Tag};

/// Suffix of locally cached payloads.
const CACHE_SUFFIX: &str = ".cached";

/// Longest key-derived prefix used in a cache file name.
const MAX_PREFIX_LEN: usize = 32;

/// A payload buffered to local disk, removed on drop.
struct CachedPayload {
    file: Option<NamedTempFile>,
    size: u64,
}

impl CachedPayload {
    fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(NamedTempFile::path)
    }
}

impl Drop for CachedPayload {
    fn drop(&mut self) {
        let Some(file) = self.file.take() else {
            return;
        };
        let path = file.path().to_path_buf();
        match file.close() {
            Ok(()) => tracing::debug!(path = %path.display(), "removed cached payload"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to remove cached payload"),
        }
    }
}

/// Object storage client that buffers uploads to local disk.
#[derive(Debug, Clone)]
pub struct ObjectStorageClient<B> {
    backend: B,
    cache_dir: Option<PathBuf>,
}

impl<B: ObjectBackend> ObjectStorageClient<B> {
    /// Wrap `backend`, caching payloads in the OS temporary directory.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache_dir: None,
        }
    }

    /// Cache payloads in `dir` instead of the OS temporary directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Create a bucket.
    pub fn create_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        self.backend.create_bucket(&BucketName::new(bucket)?)
    }

    /// Upload everything `input` yields to `bucket/key`.
    ///
    /// The stream is copied to a local file first, so the backend always
    /// sees a body of known size. The local file is removed before this
    /// returns, whatever the outcome.
    pub fn put_object(
        &self,
        bucket: &str,
        key: &str,
        mut input: impl Read,
        metadata: &ObjectMetadata,
        tags: &[Tag],
    ) -> Result<PutObjectResult, StorageError> {
        let bucket = BucketName::new(bucket)?;
        let key = ObjectKey::new(key)?;

        let cached = self.cache_locally(&mut input, &key)?;
        let path = cached
            .path()
            .ok_or_else(|| StorageError::Backend("cached payload already released".into()))?;
        tracing::debug!(
            %bucket,
            %key,
            size = cached.size,
            path = %path.display(),
            "cached payload, starting transfer"
        );

        let result = self.backend.put_file(&bucket, &key, path, metadata, tags);
        match &result {
            Ok(r) => tracing::info!(%bucket, %key, size = r.size, "uploaded object"),
            Err(e) => tracing::warn!(%bucket, %key, error = %e, "upload failed"),
        }
        result
    }

    /// Copy an object, optionally replacing its tags.
    pub fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        destination_bucket: &str,
        destination_key: &str,
        tags: Option<&[Tag]>,
    ) -> Result<PutObjectResult, StorageError> {
        let source = (BucketName::new(source_bucket)?, ObjectKey::new(source_key)?);
        let destination = (
            BucketName::new(destination_bucket)?,
            ObjectKey::new(destination_key)?,
        );
        self.backend
            .copy_object((&source.0, &source.1), (&destination.0, &destination.1), tags)
    }

    /// Read an object as text with every `\r` and `\n` removed, so lines
    /// are joined whatever their terminator.
    pub fn get_string(&self, bucket: &str, key: &str) -> Result<String, StorageError> {
        let bucket = BucketName::new(bucket)?;
        let key = ObjectKey::new(key)?;
        let bytes = self.backend.get_object(&bucket, &key)?;
        let text = String::from_utf8(bytes).map_err(|_| StorageError::NotUtf8 {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })?;
        Ok(text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect())
    }

    fn cache_locally(&self, input: &mut impl Read, key: &ObjectKey) -> Result<CachedPayload, StorageError> {
        let cache_err = |source: std::io::Error| StorageError::Cache {
            key: key.to_string(),
            source,
        };

        let prefix = cache_prefix(key);
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(CACHE_SUFFIX);
        let file = match &self.cache_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(cache_err)?;

        // The guard owns the file from here on, so a failed copy still
        // removes it.
        let mut payload = CachedPayload {
            file: Some(file),
            size: 0,
        };
        if let Some(file) = payload.file.as_mut() {
            payload.size = std::io::copy(input, file).map_err(cache_err)?;
            file.flush().map_err(cache_err)?;
        }
        Ok(payload)
    }
}

/// File-name-safe prefix derived from the last key segment.
fn cache_prefix(key: &ObjectKey) -> String {
    let mut prefix: String = key
        .file_name()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .take(MAX_PREFIX_LEN)
        .collect();
    prefix.push('-');
    prefix
}
