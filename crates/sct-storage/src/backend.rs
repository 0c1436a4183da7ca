//! # Storage Backends
//!
//! [`ObjectBackend`] is the transfer seam: it receives a file of known size
//! and moves it into the store. [`LocalObjectStore`] implements it over a
//! directory tree:
//!
//! ```text
//! {root}/{bucket}/objects/{name}       object body
//! {root}/{bucket}/meta/{name}.json     ObjectInfo (size, metadata, tags)
//! ```
//!
//! `{name}` is the key flattened into one file name: bytes outside
//! `[A-Za-z0-9._-]` (including `/`) become `%XX`. Keys `release` and
//! `release/notes.txt` therefore coexist, as they do in S3.
//!
//! Bodies are staged in a temporary file beside their destination. The
//! sidecar is written first and the body renamed into place last, so an
//! object is readable only once its metadata is stored.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StorageError;
use crate::object::{BucketName, ObjectInfo, ObjectKey, ObjectMetadata, PutObjectResult, Tag};

/// An object store that accepts uploads from local files.
pub trait ObjectBackend {
    /// Create an empty bucket.
    ///
    /// Fails with [`StorageError::AlreadyExists`] if the bucket exists.
    fn create_bucket(&self, bucket: &BucketName) -> Result<(), StorageError>;

    /// Store the contents of `file` under `bucket/key`, replacing any
    /// existing object.
    fn put_file(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        file: &Path,
        metadata: &ObjectMetadata,
        tags: &[Tag],
    ) -> Result<PutObjectResult, StorageError>;

    /// Read an object body.
    fn get_object(&self, bucket: &BucketName, key: &ObjectKey) -> Result<Vec<u8>, StorageError>;

    /// Read an object's size, metadata and tags.
    fn head_object(&self, bucket: &BucketName, key: &ObjectKey) -> Result<ObjectInfo, StorageError>;

    /// Copy an object. `tags` replaces the source tags when given.
    fn copy_object(
        &self,
        source: (&BucketName, &ObjectKey),
        destination: (&BucketName, &ObjectKey),
        tags: Option<&[Tag]>,
    ) -> Result<PutObjectResult, StorageError>;
}

/// Longest flattened key, leaving room for the `.json` sidecar suffix
/// within a 255-byte file name.
const MAX_FILE_NAME: usize = 250;

const OBJECTS_DIR: &str = "objects";
const META_DIR: &str = "meta";

/// A filesystem-backed object store.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn bucket_dir(&self, bucket: &BucketName) -> PathBuf {
        self.root.join(bucket.as_str())
    }

    fn object_path(&self, bucket: &BucketName, key: &ObjectKey) -> Result<PathBuf, StorageError> {
        Ok(self.bucket_dir(bucket).join(OBJECTS_DIR).join(flatten_key(key)?))
    }

    fn meta_path(&self, bucket: &BucketName, key: &ObjectKey) -> Result<PathBuf, StorageError> {
        let name = format!("{}.json", flatten_key(key)?);
        Ok(self.bucket_dir(bucket).join(META_DIR).join(name))
    }

    fn require_bucket(&self, bucket: &BucketName) -> Result<(), StorageError> {
        if self.bucket_dir(bucket).is_dir() {
            Ok(())
        } else {
            Err(StorageError::NotFound {
                bucket: bucket.to_string(),
                key: String::new(),
            })
        }
    }

    fn not_found(bucket: &BucketName, key: &ObjectKey) -> StorageError {
        StorageError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        }
    }

    /// A temporary file in the directory `dest` will be renamed into.
    fn stage_beside(dest: &Path) -> Result<NamedTempFile, StorageError> {
        let dir = dest
            .parent()
            .ok_or_else(|| StorageError::Backend(format!("no parent for {}", dest.display())))?;
        fs::create_dir_all(dir)?;
        Ok(NamedTempFile::new_in(dir)?)
    }

    /// Store `info` and then move the staged body into place.
    ///
    /// A failed sidecar write drops `staged`, leaving any previous object
    /// untouched. A failed rename removes the new sidecar.
    fn commit(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        mut staged: NamedTempFile,
        info: &ObjectInfo,
    ) -> Result<(), StorageError> {
        staged.as_file_mut().flush()?;
        let dest = self.object_path(bucket, key)?;
        let meta = self.meta_path(bucket, key)?;

        let json = serde_json::to_vec_pretty(info)?;
        let mut staged_meta = Self::stage_beside(&meta)?;
        staged_meta.write_all(&json)?;
        staged_meta.persist(&meta).map_err(|e| StorageError::Io(e.error))?;

        if let Err(e) = staged.persist(&dest) {
            if let Err(cleanup) = fs::remove_file(&meta) {
                tracing::warn!(path = %meta.display(), error = %cleanup, "failed to remove orphaned sidecar");
            }
            return Err(StorageError::Io(e.error));
        }
        Ok(())
    }
}

/// Flatten a key into a single file name.
fn flatten_key(key: &ObjectKey) -> Result<String, StorageError> {
    let mut name = String::with_capacity(key.as_str().len());
    for b in key.as_str().bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-') {
            name.push(char::from(b));
        } else {
            name.push_str(&format!("%{b:02X}"));
        }
    }
    if name.len() > MAX_FILE_NAME {
        return Err(StorageError::InvalidName {
            kind: "object key",
            value: key.to_string(),
            reason: format!("longer than {MAX_FILE_NAME} bytes once encoded"),
        });
    }
    Ok(name)
}

impl ObjectBackend for LocalObjectStore {
    fn create_bucket(&self, bucket: &BucketName) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        match fs::create_dir(self.bucket_dir(bucket)) {
            Ok(()) => {
                tracing::debug!(%bucket, "created bucket");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(StorageError::AlreadyExists(format!("bucket {bucket}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn put_file(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        file: &Path,
        metadata: &ObjectMetadata,
        tags: &[Tag],
    ) -> Result<PutObjectResult, StorageError> {
        self.require_bucket(bucket)?;
        let mut source = fs::File::open(file)?;
        let mut staged = Self::stage_beside(&self.object_path(bucket, key)?)?;
        let size = io::copy(&mut source, staged.as_file_mut())?;
        let info = ObjectInfo {
            size,
            metadata: metadata.clone(),
            tags: tags.to_vec(),
        };
        self.commit(bucket, key, staged, &info)?;
        tracing::debug!(%bucket, %key, size, "stored object");
        Ok(PutObjectResult {
            bucket: bucket.clone(),
            key: key.clone(),
            size,
        })
    }

    fn get_object(&self, bucket: &BucketName, key: &ObjectKey) -> Result<Vec<u8>, StorageError> {
        match fs::read(self.object_path(bucket, key)?) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Self::not_found(bucket, key)),
            Err(e) => Err(e.into()),
        }
    }

    fn head_object(&self, bucket: &BucketName, key: &ObjectKey) -> Result<ObjectInfo, StorageError> {
        match fs::read(self.meta_path(bucket, key)?) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Self::not_found(bucket, key)),
            Err(e) => Err(e.into()),
        }
    }

    fn copy_object(
        &self,
        source: (&BucketName, &ObjectKey),
        destination: (&BucketName, &ObjectKey),
        tags: Option<&[Tag]>,
    ) -> Result<PutObjectResult, StorageError> {
        let (src_bucket, src_key) = source;
        let (dst_bucket, dst_key) = destination;
        self.require_bucket(dst_bucket)?;

        let mut info = self.head_object(src_bucket, src_key)?;
        let body = self.get_object(src_bucket, src_key)?;
        if let Some(tags) = tags {
            info.tags = tags.to_vec();
        }

        let mut staged = Self::stage_beside(&self.object_path(dst_bucket, dst_key)?)?;
        staged.write_all(&body)?;
        self.commit(dst_bucket, dst_key, staged, &info)?;
        tracing::debug!(%src_bucket, %src_key, %dst_bucket, %dst_key, "copied object");
        Ok(PutObjectResult {
            bucket: dst_bucket.clone(),
            key: dst_key.clone(),
            size: info.size,
        })
    }
}
