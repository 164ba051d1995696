use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use web3_portfolio_api::{
    db::postgres::create_pool,
    graceful_shutdown::shutdown_signal,
    repositories::{file::FileStorage, postgres::PgStorage, storage::Storage},
    routes::configure_routes,
    seed::seed_if_empty,
    settings::{AppConfig, StorageBackend},
    AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let storage: Arc<dyn Storage> = match config.storage {
        StorageBackend::Postgres => {
            let database_url = config.database_url.clone().unwrap_or_default();
            let pool = create_pool(&database_url)
                .await
                .expect("Failed to create database connection pool");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("Failed to run database migrations");

            Arc::new(PgStorage::new(pool))
        }
        StorageBackend::File => Arc::new(FileStorage::new(&config.data_dir)),
    };

    if config.seed_on_startup {
        if let Err(e) = seed_if_empty(storage.as_ref()).await {
            tracing::error!("Seeding failed: {}", e);
        }
    }

    let app_state = web::Data::new(AppState::new(&config, storage));

    let server_addr = format!("{}:{}", config.host, config.port);
    let worker_count = config.worker_count;
    let cors_origins = config.cors_origins();

    tracing::info!(
        "🚀 Starting {} v{} on {} ({} storage)",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.storage
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .wrap(build_cors(&cors_origins))
            .configure(configure_routes)
    })
    .workers(worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}

fn build_cors(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE"])
        .allow_any_header()
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
