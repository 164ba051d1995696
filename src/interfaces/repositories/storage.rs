use async_trait::async_trait;

use crate::{
    entities::{
        certificate::{Certificate, CertificateInsert},
        project::{Project, ProjectInsert},
    },
    errors::AppError,
};

/// Persistence capability for the two portfolio entities. One
/// implementation is selected at startup (`settings::StorageBackend`)
/// and injected into the handlers; the choice never changes at runtime.
///
/// Contract, symmetric per entity:
/// - listing returns records ordered by creation time (ascending, id
///   tie-break) and yields an empty vector rather than an error for an
///   empty collection;
/// - lookup by unknown id yields `Ok(None)`, never an error;
/// - create assigns an id strictly greater than any id previously
///   allocated by this backend instance for that entity;
/// - delete is idempotent: deleting an absent id succeeds.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn get_project(&self, id: i32) -> Result<Option<Project>, AppError>;
    async fn create_project(&self, insert: &ProjectInsert) -> Result<Project, AppError>;
    async fn delete_project(&self, id: i32) -> Result<(), AppError>;

    async fn get_certificates(&self) -> Result<Vec<Certificate>, AppError>;
    async fn get_certificate(&self, id: i32) -> Result<Option<Certificate>, AppError>;
    async fn create_certificate(&self, insert: &CertificateInsert) -> Result<Certificate, AppError>;
    async fn delete_certificate(&self, id: i32) -> Result<(), AppError>;
}
