use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::{
        certificate::{Certificate, CertificateInsert},
        project::{Project, ProjectInsert},
    },
    errors::AppError,
    repositories::storage::Storage,
};

const PROJECT_COLUMNS: &str = "id, name, hackathon_name, hackathon_placement, github_link, \
     live_link, tech_stack, image_url, contract_address, explorer_link, created_at";

const CERTIFICATE_COLUMNS: &str =
    "id, name, issuing_organization, issue_date, link, image_url, created_at";

/// Postgres-backed storage. Every operation is a single statement under
/// autocommit; id allocation is delegated to the `SERIAL` columns.
#[derive(Clone)]
pub struct PgStorage {
    pub pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        PgStorage { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn get_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_project(&self, id: i32) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn create_project(&self, insert: &ProjectInsert) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (
                name, hackathon_name, hackathon_placement, github_link, live_link,
                tech_stack, image_url, contract_address, explorer_link, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&insert.name)
        .bind(&insert.hackathon_name)
        .bind(&insert.hackathon_placement)
        .bind(&insert.github_link)
        .bind(&insert.live_link)
        .bind(&insert.tech_stack)
        .bind(&insert.image_url)
        .bind(&insert.contract_address)
        .bind(&insert.explorer_link)
        .bind(insert.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    async fn delete_project(&self, id: i32) -> Result<(), AppError> {
        // Deleting an absent id affects zero rows and is still a success.
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_certificates(&self) -> Result<Vec<Certificate>, AppError> {
        let certificates = sqlx::query_as::<_, Certificate>(&format!(
            "SELECT {CERTIFICATE_COLUMNS} FROM certificates ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(certificates)
    }

    async fn get_certificate(&self, id: i32) -> Result<Option<Certificate>, AppError> {
        let certificate = sqlx::query_as::<_, Certificate>(&format!(
            "SELECT {CERTIFICATE_COLUMNS} FROM certificates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(certificate)
    }

    async fn create_certificate(&self, insert: &CertificateInsert) -> Result<Certificate, AppError> {
        let certificate = sqlx::query_as::<_, Certificate>(&format!(
            r#"
            INSERT INTO certificates (name, issuing_organization, issue_date, link, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CERTIFICATE_COLUMNS}
            "#
        ))
        .bind(&insert.name)
        .bind(&insert.issuing_organization)
        .bind(&insert.issue_date)
        .bind(&insert.link)
        .bind(&insert.image_url)
        .bind(insert.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(certificate)
    }

    async fn delete_certificate(&self, id: i32) -> Result<(), AppError> {
        sqlx::query("DELETE FROM certificates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
