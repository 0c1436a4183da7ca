//! # Upload Subcommand
//!
//! Streams a file (or standard input) into the local object store through
//! [`ObjectStorageClient`](sct_storage::ObjectStorageClient), which buffers
//! it to a temporary file and removes that file on every exit path.
//!
//! `--store-root` and `--cache-dir` override `SCT_STORE_ROOT` and
//! `SCT_CACHE_DIR`.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use sct_storage::{ObjectMetadata, StorageConfig, StorageError, Tag};

/// Arguments for the `sctid upload` subcommand.
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Destination bucket.
    #[arg(long)]
    pub bucket: String,

    /// Destination object key.
    #[arg(long)]
    pub key: String,

    /// File to upload, or `-` for standard input.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Object tag. Repeat for several tags.
    #[arg(long = "tag", value_name = "KEY=VALUE")]
    pub tags: Vec<Tag>,

    /// User metadata entry. Repeat for several entries.
    #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub metadata: Vec<(String, String)>,

    /// MIME type stored with the object.
    #[arg(long)]
    pub content_type: Option<String>,

    /// Create the bucket first if it does not exist.
    #[arg(long)]
    pub create_bucket: bool,

    /// Root directory of the object store.
    #[arg(long, value_name = "DIR")]
    pub store_root: Option<PathBuf>,

    /// Directory for the temporary upload buffer.
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Execute the upload subcommand.
pub fn run_upload(args: &UploadArgs) -> Result<u8> {
    upload_to(args, &mut std::io::stdout().lock())
}

/// Upload and report into `out`.
pub fn upload_to(args: &UploadArgs, out: &mut impl Write) -> Result<u8> {
    let client = resolve_config(args)?.local_client();

    if args.create_bucket {
        match client.create_bucket(&args.bucket) {
            Ok(()) | Err(StorageError::AlreadyExists(_)) => {}
            Err(e) => return Err(e).with_context(|| format!("failed to create bucket {}", args.bucket)),
        }
    }

    let metadata = ObjectMetadata {
        content_type: args.content_type.clone(),
        user_metadata: args.metadata.iter().cloned().collect(),
    };

    let result = if args.file == Path::new("-") {
        client.put_object(&args.bucket, &args.key, std::io::stdin().lock(), &metadata, &args.tags)
    } else {
        let file = File::open(&args.file)
            .with_context(|| format!("failed to open {}", args.file.display()))?;
        client.put_object(&args.bucket, &args.key, file, &metadata, &args.tags)
    }
    .with_context(|| format!("failed to upload {}/{}", args.bucket, args.key))?;

    writeln!(
        out,
        "OK: uploaded {}/{} ({} bytes)",
        result.bucket, result.key, result.size
    )?;
    Ok(0)
}

fn resolve_config(args: &UploadArgs) -> Result<StorageConfig> {
    let mut config = match &args.store_root {
        Some(root) => StorageConfig::with_root(root.clone()),
        None => StorageConfig::from_env().context("object store is not configured")?,
    };
    if let Some(dir) = &args.cache_dir {
        config.cache_dir = Some(dir.clone());
    }
    Ok(config)
}

/// Parse a `KEY=VALUE` pair. The value may contain `=`.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {s:?}")),
    }
}
