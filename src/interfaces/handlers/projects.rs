use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::project::NewProjectRequest, errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn get_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.portfolio.get_projects().await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.portfolio.create_project(data.into_inner()).await?;

    Ok(HttpResponse::Created().json(project))
}

#[instrument(skip(state))]
pub async fn delete_project(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = id
        .parse::<i32>()
        .map_err(|_| AppError::InvalidId("Invalid project ID".to_string()))?;

    // No existence check: deleting an absent id is a 204 no-op.
    state.portfolio.delete_project(id).await?;

    Ok(HttpResponse::NoContent().finish())
}
