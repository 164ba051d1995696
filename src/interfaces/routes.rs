use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::handlers::{admin, certificates, home::home, projects, system, upload};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));

    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .service(
                web::resource("/projects")
                    .route(web::get().to(projects::get_projects))
                    .route(web::post().to(projects::create_project))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/projects/{id}")
                    .route(web::delete().to(projects::delete_project))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/certificates")
                    .route(web::get().to(certificates::get_certificates))
                    .route(web::post().to(certificates::create_certificate))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/certificates/{id}")
                    .route(web::delete().to(certificates::delete_certificate))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/admin/login")
                    .route(web::post().to(admin::login))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/upload")
                    .route(web::post().to(upload::upload_file))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/health")
                    .route(web::get().to(system::health_check))
                    .default_service(web::route().to(method_not_allowed)),
            ),
    );
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(json!({ "error": "Method not allowed" }))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let details = err.to_string();
    let response = HttpResponse::BadRequest().json(json!({
        "error": "Invalid JSON payload",
        "details": details
    }));
    actix_web::error::InternalError::from_response(err, response).into()
}
