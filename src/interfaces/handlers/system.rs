use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, instrument};

use crate::AppState;

#[derive(Serialize)]
struct EnvPresence {
    #[serde(rename = "DATABASE_URL")]
    database_url: bool,
    #[serde(rename = "ADMIN_PASSWORD")]
    admin_password: bool,
    #[serde(rename = "PINATA_JWT")]
    pinata_jwt: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    project_count: usize,
    env: EnvPresence,
}

/// Proves the active storage backend answers a list query and reports
/// which deployment secrets are present (never their values).
#[instrument(skip(state))]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    match state.portfolio.get_projects().await {
        Ok(projects) => HttpResponse::Ok().json(HealthResponse {
            status: "ok",
            database: "connected",
            project_count: projects.len(),
            env: EnvPresence {
                database_url: state.config.database_url.is_some(),
                admin_password: state.config.admin_password.is_some(),
                pinata_jwt: state.config.pinata_jwt.is_some(),
            },
        }),
        Err(e) => {
            error!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "status": "error",
                "message": "Storage backend unavailable"
            }))
        }
    }
}
