//! Filesystem storage for uploaded media.
//!
//! Uploaded files live under `MEDIA_ROOT` in per-kind subdirectories
//! (`posters/`, `photos/`, `biographies/`). Stored filenames get a UUID
//! prefix so repeated uploads of the same client filename never collide.
//! The database stores the path relative to the media root; the router
//! serves the tree read-only under `/media`.

use std::path::{Path, PathBuf};

use kinoteka_core::error::CoreError;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Subdirectory for movie poster images.
pub const POSTERS_DIR: &str = "posters";
/// Subdirectory for person photos.
pub const PHOTOS_DIR: &str = "photos";
/// Subdirectory for person biography text files.
pub const BIOGRAPHIES_DIR: &str = "biographies";

/// Handle to the media root directory.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute (root-joined) path for a stored relative path.
    pub fn full_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Persist an uploaded file, returning the relative path to store in
    /// the database (e.g. `posters/3f1a...-alien.jpg`).
    pub async fn save(&self, subdir: &str, client_filename: &str, bytes: &[u8]) -> AppResult<String> {
        let safe_name = sanitize_filename(client_filename);
        let stored_name = format!("{}-{}", Uuid::new_v4(), safe_name);
        let relative = format!("{subdir}/{stored_name}");

        let dir = self.root.join(subdir);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create media dir: {e}")))?;

        tokio::fs::write(dir.join(&stored_name), bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to write media file: {e}")))?;

        Ok(relative)
    }

    /// Delete a previously stored file. A missing file is not an error;
    /// the database row is the source of truth.
    pub async fn delete(&self, relative: &str) -> AppResult<()> {
        let path = self.full_path(relative);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Core(CoreError::Internal(format!(
                "Failed to delete media file {}: {e}",
                path.display()
            )))),
        }
    }
}

/// Strip path components and unsafe characters from a client filename.
///
/// Only the final path segment survives, and anything outside
/// `[A-Za-z0-9._-]` is replaced with `_`. An empty result becomes `file`.
fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}
