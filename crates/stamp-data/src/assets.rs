//! Asset host adapter for design uploads.

use crate::{AssetHostConfig, FetchClient, MultipartForm};
use async_trait::async_trait;
use serde::Deserialize;
use stamp_commerce::customizer::{AssetUploader, DesignFile};
use stamp_commerce::CommerceError;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

/// Unsigned uploads to the asset host.
#[derive(Debug, Clone)]
pub struct AssetHostClient {
    client: FetchClient,
    config: AssetHostConfig,
}

impl AssetHostClient {
    pub fn new(client: FetchClient, config: AssetHostConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &AssetHostConfig {
        &self.config
    }
}

fn content_type_for(file: &DesignFile) -> String {
    if let Some(content_type) = &file.content_type {
        return content_type.clone();
    }
    match file.extension().as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("pdf") => "application/pdf",
        Some("ai") => "application/postscript",
        Some("eps") => "application/postscript",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[async_trait]
impl AssetUploader for AssetHostClient {
    async fn upload_asset(&self, file: &DesignFile) -> Result<String, CommerceError> {
        let form = MultipartForm::new()
            .file(
                "file",
                file.file_name.clone(),
                content_type_for(file),
                file.bytes.clone(),
            )
            .text("upload_preset", self.config.upload_preset.clone())
            .text("folder", self.config.folder.clone());

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(file = %file.file_name, error = %err, "asset upload request failed");
                CommerceError::UploadFailed
            })?;

        if !response.is_success() {
            tracing::error!(
                file = %file.file_name,
                status = response.status,
                body = %response.text().unwrap_or_default(),
                "asset upload rejected"
            );
            return Err(CommerceError::UploadFailed);
        }

        let body: UploadResponse = response.json().map_err(|err| {
            tracing::error!(error = %err, "asset upload response unreadable");
            CommerceError::UploadFailed
        })?;
        body.secure_url.ok_or_else(|| {
            tracing::error!(file = %file.file_name, "asset upload response has no secure_url");
            CommerceError::UploadFailed
        })
    }
}
