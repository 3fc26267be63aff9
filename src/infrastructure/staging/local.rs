//! Local-disk upload staging

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{StagingError, UploadStaging};

/// Fallback name when nothing usable is left after sanitizing
const DEFAULT_STEM: &str = "upload";

/// Stores uploads in a local directory as `<uuid>_<sanitized name>`
pub struct LocalUploadStaging {
    dir: PathBuf,
}

impl LocalUploadStaging {
    /// The directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Strip path components and anything outside `[A-Za-z0-9._-]`
    pub fn sanitize_file_name(name: &str) -> String {
        let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
        let cleaned: String = base
            .chars()
            .filter_map(|c| match c {
                c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
                c if c.is_whitespace() => Some('_'),
                _ => None,
            })
            .collect();
        let cleaned = cleaned.trim_start_matches('.');

        if cleaned.is_empty() {
            DEFAULT_STEM.to_string()
        } else {
            cleaned.to_string()
        }
    }

    fn unique_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(format!(
            "{}_{}",
            Uuid::new_v4().simple(),
            Self::sanitize_file_name(file_name)
        ))
    }
}

#[async_trait]
impl UploadStaging for LocalUploadStaging {
    async fn save(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, StagingError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(StagingError::CreateDir)?;

        let path = self.unique_path(file_name);
        fs::write(&path, data).await.map_err(StagingError::Write)?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Upload staged");
        Ok(path)
    }

    async fn remove(&self, path: &Path) -> Result<(), StagingError> {
        match fs::remove_file(path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Staged upload deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StagingError::Remove(e)),
        }
    }
}
