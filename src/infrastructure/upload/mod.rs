use async_trait::async_trait;

use crate::errors::AppError;

pub mod local;
pub mod pinata;

/// Accepts one binary payload plus its original filename and returns a
/// publicly resolvable URL. Nothing is retried; a failed upload leaves
/// no record behind.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, data: Vec<u8>, file_name: &str) -> Result<String, AppError>;
}
