//! File upload

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::ApiClient;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadedFile {
    pub file_url: String,
}

impl ApiClient {
    /// Upload raw bytes as the multipart `file` field
    pub async fn upload_bytes(&self, file_name: &str, bytes: Vec<u8>) -> AppResult<UploadedFile> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let uploaded: UploadedFile = self.post_multipart("/upload", form).await?;
        tracing::info!("Uploaded {} to {}", file_name, uploaded.file_url);
        Ok(uploaded)
    }

    pub async fn upload_file(&self, path: &Path) -> AppResult<UploadedFile> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::Validation(format!("Invalid file path: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        self.upload_bytes(&file_name, bytes).await
    }
}
