//! Module `file_ops`
//!
//! File deletion and directory creation for DELE and XMKD.

use log::{info, warn};
use std::path::Path;

use tokio::fs;

use crate::error::PathError;

/// Removes the file at `path`.
///
/// A missing target and a failed removal are distinct errors; the caller
/// maps them to different replies.
pub async fn delete(path: &Path) -> Result<(), PathError> {
    if fs::metadata(path).await.is_err() {
        return Err(PathError::NotFound(path.display().to_string()));
    }

    match fs::remove_file(path).await {
        Ok(()) => {
            info!("Deleted {}", path.display());
            Ok(())
        }
        Err(e) => {
            warn!("Failed to delete {}: {}", path.display(), e);
            Err(PathError::RemoveFailed(path.display().to_string()))
        }
    }
}

/// Creates the directory at `path`, including any missing ancestors.
///
/// An already-existing target counts as a failure, matching the semantics
/// of a create-only mkdir.
pub async fn make_directories(path: &Path) -> Result<(), PathError> {
    if fs::metadata(path).await.is_ok() {
        return Err(PathError::CreateFailed(path.display().to_string()));
    }

    match fs::create_dir_all(path).await {
        Ok(()) => {
            info!("Created directory {}", path.display());
            Ok(())
        }
        Err(e) => {
            warn!("Failed to create directory {}: {}", path.display(), e);
            Err(PathError::CreateFailed(path.display().to_string()))
        }
    }
}
