//! File system utilities for build output directories.

use crate::bundler::error::{ErrorExt, Result};
use std::path::Path;
use tokio::fs;

/// Creates all directories of `path` if missing.
///
/// Idempotent: an existing directory is left untouched. Returns `true` when
/// the directory did not exist before the call.
pub async fn ensure_dir(path: &Path) -> Result<bool> {
    if fs::metadata(path).await.is_ok_and(|m| m.is_dir()) {
        return Ok(false);
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)?;
    Ok(true)
}

/// Whether `path` exists and is a directory.
pub async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_dir())
}
