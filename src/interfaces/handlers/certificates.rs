use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::certificate::NewCertificateRequest, errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn get_certificates(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let certificates = state.portfolio.get_certificates().await?;

    Ok(HttpResponse::Ok().json(certificates))
}

#[instrument(skip(state, data))]
pub async fn create_certificate(
    state: web::Data<AppState>,
    data: web::Json<NewCertificateRequest>,
) -> Result<impl Responder, AppError> {
    let certificate = state.portfolio.create_certificate(data.into_inner()).await?;

    Ok(HttpResponse::Created().json(certificate))
}

#[instrument(skip(state))]
pub async fn delete_certificate(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = id
        .parse::<i32>()
        .map_err(|_| AppError::InvalidId("Invalid certificate ID".to_string()))?;

    state.portfolio.delete_certificate(id).await?;

    Ok(HttpResponse::NoContent().finish())
}
