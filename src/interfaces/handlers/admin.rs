use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::{errors::AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    // A missing password field is compared as the empty string.
    #[serde(default)]
    pub password: String,
}

#[instrument(skip(state, data))]
pub async fn login(
    state: web::Data<AppState>,
    data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    state.admin_gate.verify(&data.password).map_err(|e| {
        warn!("Admin login rejected: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
