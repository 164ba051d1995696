use std::sync::Arc;

use crate::{
    entities::{
        certificate::{Certificate, CertificateInsert, NewCertificateRequest},
        project::{NewProjectRequest, Project, ProjectInsert},
    },
    errors::AppError,
    repositories::storage::Storage,
};

/// Validates incoming records and drives the injected storage backend.
/// Validation is synchronous and runs before storage is touched, so an
/// invalid payload never reaches the backend.
pub struct PortfolioHandler {
    storage: Arc<dyn Storage>,
}

impl PortfolioHandler {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        PortfolioHandler { storage }
    }

    pub async fn get_projects(&self) -> Result<Vec<Project>, AppError> {
        self.storage.get_projects().await
    }

    pub async fn get_project(&self, id: i32) -> Result<Option<Project>, AppError> {
        self.storage.get_project(id).await
    }

    pub async fn create_project(&self, request: NewProjectRequest) -> Result<Project, AppError> {
        let insert = ProjectInsert::try_from(request)?;
        self.storage.create_project(&insert).await
    }

    pub async fn delete_project(&self, id: i32) -> Result<(), AppError> {
        self.storage.delete_project(id).await
    }

    pub async fn get_certificates(&self) -> Result<Vec<Certificate>, AppError> {
        self.storage.get_certificates().await
    }

    pub async fn get_certificate(&self, id: i32) -> Result<Option<Certificate>, AppError> {
        self.storage.get_certificate(id).await
    }

    pub async fn create_certificate(
        &self,
        request: NewCertificateRequest,
    ) -> Result<Certificate, AppError> {
        let insert = CertificateInsert::try_from(request)?;
        self.storage.create_certificate(&insert).await
    }

    pub async fn delete_certificate(&self, id: i32) -> Result<(), AppError> {
        self.storage.delete_certificate(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub Store {}

        #[async_trait]
        impl Storage for Store {
            async fn get_projects(&self) -> Result<Vec<Project>, AppError>;
            async fn get_project(&self, id: i32) -> Result<Option<Project>, AppError>;
            async fn create_project(&self, insert: &ProjectInsert) -> Result<Project, AppError>;
            async fn delete_project(&self, id: i32) -> Result<(), AppError>;
            async fn get_certificates(&self) -> Result<Vec<Certificate>, AppError>;
            async fn get_certificate(&self, id: i32) -> Result<Option<Certificate>, AppError>;
            async fn create_certificate(&self, insert: &CertificateInsert) -> Result<Certificate, AppError>;
            async fn delete_certificate(&self, id: i32) -> Result<(), AppError>;
        }
    }

    fn request(name: &str) -> NewProjectRequest {
        serde_json::from_value(serde_json::json!({ "name": name })).unwrap()
    }

    #[tokio::test]
    async fn invalid_project_never_reaches_storage() {
        // No expectation on create_project: the mock panics if called.
        let repo = MockStore::new();
        let handler = PortfolioHandler::new(Arc::new(repo));

        let result = handler.create_project(request("")).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn valid_project_is_created_with_backend_id() {
        let mut repo = MockStore::new();
        repo.expect_create_project()
            .returning(|insert| Ok(insert.clone().into_project(7)));

        let handler = PortfolioHandler::new(Arc::new(repo));
        let project = handler.create_project(request("DAO Platform")).await.unwrap();

        assert_eq!(project.id, 7);
        assert_eq!(project.name, "DAO Platform");
    }

    #[tokio::test]
    async fn invalid_certificate_never_reaches_storage() {
        let repo = MockStore::new();
        let handler = PortfolioHandler::new(Arc::new(repo));

        let request: NewCertificateRequest = serde_json::from_value(serde_json::json!({
            "name": "Cert",
            "issuingOrganization": "Org",
            "issueDate": "June 2024",
            "link": "not-a-url"
        }))
        .unwrap();

        let result = handler.create_certificate(request).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
