use async_trait::async_trait;
use reqwest::multipart;
use tracing::error;

use crate::{errors::AppError, upload::Uploader};

const PIN_FILE_URL: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";

/// Relays uploads to the Pinata pinning service and returns a gateway
/// URL for the pinned content.
pub struct PinataUploader {
    jwt: String,
    gateway: String,
    client: reqwest::Client,
}

impl PinataUploader {
    pub fn new(jwt: String, gateway: String) -> Self {
        PinataUploader {
            jwt,
            gateway,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct PinFileResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

#[async_trait]
impl Uploader for PinataUploader {
    async fn upload(&self, data: Vec<u8>, file_name: &str) -> Result<String, AppError> {
        // Fail fast before any network I/O when the credential is absent.
        if self.jwt.trim().is_empty() {
            return Err(AppError::Misconfiguration("PINATA_JWT is not set".to_string()));
        }

        let mime = infer::get(&data)
            .map(|kind| kind.mime_type())
            .unwrap_or("application/octet-stream");

        let part = multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;

        let metadata = serde_json::json!({ "name": file_name }).to_string();
        let options = serde_json::json!({ "cidVersion": 0 }).to_string();

        let form = multipart::Form::new()
            .part("file", part)
            .text("pinataMetadata", metadata)
            .text("pinataOptions", options);

        let response = self
            .client
            .post(PIN_FILE_URL)
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Error uploading to Pinata: {}", e);
                AppError::UploadFailed(e.to_string())
            })?;

        if !response.status().is_success() {
            error!("Pinata rejected upload with status {}", response.status());
            return Err(AppError::UploadFailed(format!(
                "Pinata responded with status {}",
                response.status()
            )));
        }

        let pinned: PinFileResponse = response.json().await.map_err(|e| {
            error!("Unexpected Pinata response body: {}", e);
            AppError::UploadFailed(e.to_string())
        })?;

        Ok(format!(
            "{}/ipfs/{}",
            self.gateway.trim_end_matches('/'),
            pinned.ipfs_hash
        ))
    }
}
