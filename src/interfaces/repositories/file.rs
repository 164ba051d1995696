use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::warn;

use crate::{
    entities::{
        certificate::{Certificate, CertificateInsert},
        project::{Project, ProjectInsert},
    },
    errors::AppError,
    repositories::storage::Storage,
};

/// One JSON array on disk plus the coordination state for it. Every
/// access holds `lock`: mutations across the whole read-modify-rewrite
/// cycle, so concurrent creates cannot allocate the same id or clobber
/// each other's writes, and reads so they never observe a half-written
/// file. `last_id` is the instance high-water mark: ids keep ascending
/// even after the record with the max id is deleted.
struct JsonCollection {
    path: PathBuf,
    lock: Mutex<()>,
    last_id: AtomicI32,
}

impl JsonCollection {
    fn new(path: PathBuf) -> Self {
        JsonCollection {
            path,
            lock: Mutex::new(()),
            last_id: AtomicI32::new(0),
        }
    }

    /// A missing or unreadable file is an empty collection, never an
    /// error for the caller.
    async fn load<T: DeserializeOwned>(&self) -> Vec<T> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {}", self.path.display(), e);
                }
                return Vec::new();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!("Ignoring corrupt collection file {}: {}", self.path.display(), e);
            Vec::new()
        })
    }

    async fn persist<T: Serialize>(&self, items: &[T]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(items)?;
        fs::write(&self.path, bytes).await?;
        Ok(())
    }

    fn next_id(&self, current_max: Option<i32>) -> i32 {
        let base = current_max.unwrap_or(0).max(self.last_id.load(Ordering::Relaxed));
        // Saturate rather than panic if a hand-edited file carries i32::MAX.
        let id = base.saturating_add(1);
        self.last_id.store(id, Ordering::Relaxed);
        id
    }
}

/// Flat-file storage: each entity lives in a single JSON array that is
/// reloaded and rewritten whole on every mutation. Intended for
/// single-operator deployments; all access is serialized per entity
/// file within this process, but nothing guards against a second
/// process sharing the same data directory.
pub struct FileStorage {
    projects: JsonCollection,
    certificates: JsonCollection,
}

impl FileStorage {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        FileStorage {
            projects: JsonCollection::new(data_dir.join("projects.json")),
            certificates: JsonCollection::new(data_dir.join("certificates.json")),
        }
    }
}

fn sort_by_creation<T>(items: &mut [T], created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>, id: impl Fn(&T) -> i32) {
    items.sort_by_key(|item| (created_at(item), id(item)));
}

#[async_trait]
impl Storage for FileStorage {
    async fn get_projects(&self) -> Result<Vec<Project>, AppError> {
        let _guard = self.projects.lock.lock().await;

        let mut projects: Vec<Project> = self.projects.load().await;
        sort_by_creation(&mut projects, |p| p.created_at, |p| p.id);
        Ok(projects)
    }

    async fn get_project(&self, id: i32) -> Result<Option<Project>, AppError> {
        let _guard = self.projects.lock.lock().await;

        let projects: Vec<Project> = self.projects.load().await;
        Ok(projects.into_iter().find(|p| p.id == id))
    }

    async fn create_project(&self, insert: &ProjectInsert) -> Result<Project, AppError> {
        let _guard = self.projects.lock.lock().await;

        let mut projects: Vec<Project> = self.projects.load().await;
        let id = self.projects.next_id(projects.iter().map(|p| p.id).max());

        let project = insert.clone().into_project(id);
        projects.push(project.clone());
        self.projects.persist(&projects).await?;

        Ok(project)
    }

    async fn delete_project(&self, id: i32) -> Result<(), AppError> {
        let _guard = self.projects.lock.lock().await;

        let mut projects: Vec<Project> = self.projects.load().await;
        projects.retain(|p| p.id != id);
        self.projects.persist(&projects).await
    }

    async fn get_certificates(&self) -> Result<Vec<Certificate>, AppError> {
        let _guard = self.certificates.lock.lock().await;

        let mut certificates: Vec<Certificate> = self.certificates.load().await;
        sort_by_creation(&mut certificates, |c| c.created_at, |c| c.id);
        Ok(certificates)
    }

    async fn get_certificate(&self, id: i32) -> Result<Option<Certificate>, AppError> {
        let _guard = self.certificates.lock.lock().await;

        let certificates: Vec<Certificate> = self.certificates.load().await;
        Ok(certificates.into_iter().find(|c| c.id == id))
    }

    async fn create_certificate(&self, insert: &CertificateInsert) -> Result<Certificate, AppError> {
        let _guard = self.certificates.lock.lock().await;

        let mut certificates: Vec<Certificate> = self.certificates.load().await;
        let id = self.certificates.next_id(certificates.iter().map(|c| c.id).max());

        let certificate = insert.clone().into_certificate(id);
        certificates.push(certificate.clone());
        self.certificates.persist(&certificates).await?;

        Ok(certificate)
    }

    async fn delete_certificate(&self, id: i32) -> Result<(), AppError> {
        let _guard = self.certificates.lock.lock().await;

        let mut certificates: Vec<Certificate> = self.certificates.load().await;
        certificates.retain(|c| c.id != id);
        self.certificates.persist(&certificates).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_saturates_at_the_i32_ceiling() {
        let collection = JsonCollection::new(PathBuf::from("unused.json"));

        assert_eq!(collection.next_id(Some(i32::MAX)), i32::MAX);
        // The high-water mark is now at the ceiling too; still no panic.
        assert_eq!(collection.next_id(None), i32::MAX);
    }
}
