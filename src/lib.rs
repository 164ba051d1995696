use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod seed;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, upload};

use repositories::storage::Storage;
use upload::{local::LocalUploader, pinata::PinataUploader, Uploader};
use use_cases::{admin::AdminGate, portfolio::PortfolioHandler};

pub struct AppState {
    pub portfolio: PortfolioHandler,
    pub uploader: Arc<dyn Uploader>,
    pub admin_gate: AdminGate,
    pub config: settings::AppConfig,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, storage: Arc<dyn Storage>) -> Self {
        let uploader: Arc<dyn Uploader> = match &config.pinata_jwt {
            Some(jwt) => Arc::new(PinataUploader::new(
                jwt.clone(),
                config.pinata_gateway.clone(),
            )),
            None => Arc::new(LocalUploader::new(&config.upload_dir)),
        };

        AppState {
            portfolio: PortfolioHandler::new(storage),
            uploader,
            admin_gate: AdminGate::new(config.admin_password.clone()),
            config: config.clone(),
        }
    }
}
