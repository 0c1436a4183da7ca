//! # sct-storage -- Disk-buffered object uploads
//!
//! Uploads release artefacts and manifests to an object store. Payloads of
//! unknown length are copied to a local temporary file first so the backend
//! always receives a body of known size.
//!
//! - [`ObjectStorageClient`]: validation, buffering, cleanup, text reads.
//! - [`ObjectBackend`]: the transfer seam. [`LocalObjectStore`] is the
//!   filesystem implementation.
//! - [`StorageConfig`]: environment-driven setup.
//!
//! ## Cleanup
//!
//! A buffered payload never outlives the call that created it. Removal is
//! tied to a drop guard, so it runs whether the upload succeeds, fails or
//! panics.
//!
//! ```
//! use sct_storage::{ObjectMetadata, StorageConfig};
//!
//! let root = tempfile::tempdir().unwrap();
//! let client = StorageConfig { root: root.path().into(), cache_dir: None }.local_client();
//! client.create_bucket("manifests").unwrap();
//! client
//!     .put_object("manifests", "int/manifest.xml", &b"<listing/>\n"[..], &ObjectMetadata::default(), &[])
//!     .unwrap();
//! assert_eq!(client.get_string("manifests", "int/manifest.xml").unwrap(), "<listing/>");
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod object;

pub use backend::{LocalObjectStore, ObjectBackend};
pub use client::ObjectStorageClient;
pub use config::StorageConfig;
pub use error::StorageError;
pub use object::{BucketName, ObjectInfo, ObjectKey, ObjectMetadata, PutObjectResult, Tag};
