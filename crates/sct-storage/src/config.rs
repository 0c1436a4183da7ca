//! Object store configuration.

use std::path::PathBuf;

use crate::backend::LocalObjectStore;
use crate::client::ObjectStorageClient;
use crate::error::StorageError;

/// Where objects live and where uploads are buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Root directory of the local object store.
    pub root: PathBuf,
    /// Directory for cached payloads. `None` uses the OS temporary directory.
    pub cache_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SCT_STORE_ROOT` (required)
    /// - `SCT_CACHE_DIR` (default: OS temporary directory)
    pub fn from_env() -> Result<Self, StorageError> {
        let root = non_empty_var("SCT_STORE_ROOT")
            .ok_or_else(|| StorageError::Config("SCT_STORE_ROOT environment variable is required".into()))?;
        Ok(Self::with_root(root))
    }

    /// Like [`from_env`](Self::from_env), but with an explicit store root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache_dir: non_empty_var("SCT_CACHE_DIR").map(PathBuf::from),
        }
    }

    /// Build a client over a [`LocalObjectStore`] at `root`.
    pub fn local_client(&self) -> ObjectStorageClient<LocalObjectStore> {
        let client = ObjectStorageClient::new(LocalObjectStore::new(self.root.clone()));
        match &self.cache_dir {
            Some(dir) => client.with_cache_dir(dir.clone()),
            None => client,
        }
    }
}

fn non_empty_var(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectMetadata;

    #[test]
    fn non_empty_var_ignores_blank() {
        std::env::set_var("TEST_BLANK_VAR_SCT_STORAGE", "   ");
        let value = non_empty_var("TEST_BLANK_VAR_SCT_STORAGE");
        std::env::remove_var("TEST_BLANK_VAR_SCT_STORAGE");
        assert!(value.is_none());
        assert!(non_empty_var("NONEXISTENT_VAR_SCT_STORAGE_98765").is_none());
    }

    #[test]
    fn local_client_uses_configured_dirs() {
        let root = tempfile::tempdir().unwrap();
        let cache = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            root: root.path().to_path_buf(),
            cache_dir: Some(cache.path().to_path_buf()),
        };
        let client = config.local_client();
        assert_eq!(client.backend().root(), root.path());

        client.create_bucket("builds").unwrap();
        client
            .put_object("builds", "a.txt", &b"abc"[..], &ObjectMetadata::default(), &[])
            .unwrap();
        assert!(root.path().join("builds/objects/a.txt").is_file());
    }
}
