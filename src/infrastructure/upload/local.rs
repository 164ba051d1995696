use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use tokio::fs;

use crate::{errors::AppError, upload::Uploader};

/// Disk-backed fallback used when no pinning credential is configured.
/// Files land in a fixed directory under a collision-resistant name and
/// the returned URL is a path relative to the site root.
pub struct LocalUploader {
    dir: PathBuf,
}

impl LocalUploader {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        LocalUploader {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl Uploader for LocalUploader {
    async fn upload(&self, data: Vec<u8>, file_name: &str) -> Result<String, AppError> {
        fs::create_dir_all(&self.dir).await?;

        let extension = Path::new(file_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();

        let stored_name = format!("{}-{}{}", Utc::now().timestamp_millis(), suffix, extension);

        fs::write(self.dir.join(&stored_name), &data).await?;

        Ok(format!("/uploads/{}", stored_name))
    }
}
