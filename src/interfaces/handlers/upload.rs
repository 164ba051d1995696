use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[derive(Debug, MultipartForm)]
pub struct UploadForm {
    #[multipart(rename = "file", limit = "10MB")]
    pub file: TempFile,
}

#[instrument(skip(state, form))]
pub async fn upload_file(
    state: web::Data<AppState>,
    form: Result<MultipartForm<UploadForm>, actix_web::Error>,
) -> Result<impl Responder, AppError> {
    // A body without a usable `file` part fails extraction.
    let form = form.map_err(|_| AppError::MissingFile)?.into_inner();

    let file_name = form
        .file
        .file_name
        .clone()
        .unwrap_or_else(|| "upload".to_string());

    let data = tokio::fs::read(form.file.file.path())
        .await
        .map_err(|e| AppError::UploadFailed(e.to_string()))?;

    let url = state.uploader.upload(data, &file_name).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "url": url })))
}
