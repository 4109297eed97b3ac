//! Media storage for staff profile photos
//!
//! The profile screen uploads a picked image and keeps the durable URL on
//! the staff record. Not part of the order core; nothing else touches this.

use async_trait::async_trait;
use shared::{AppError, AppResult};
use std::path::PathBuf;

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store the image bytes under `name` and return a durable URL
    async fn upload(&self, name: &str, bytes: &[u8]) -> AppResult<String>;
}

/// Filesystem-backed media store writing under `{data_dir}/images/`
pub struct FsMediaStore {
    dir: PathBuf,
}

impl FsMediaStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn upload(&self, name: &str, bytes: &[u8]) -> AppResult<String> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::internal(format!("media dir: {e}")))?;

        let path = self.dir.join(format!("{}.jpg", sanitize(name)));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::internal(format!("media write: {e}")))?;

        Ok(path.to_string_lossy().into_owned())
    }
}

/// Keep the file name a single path component
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '.' | ':' => '_',
            c => c,
        })
        .collect()
}
