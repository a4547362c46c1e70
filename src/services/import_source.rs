// src/services/import_source.rs
//
// Where import data comes from. Both variants, a user-picked file and a
// fetched URL, yield raw text and funnel into the same merge in
// CatalogService. Reading is the only asynchronous step in the core.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImportSource: Send + Sync {
    /// The import payload as text. Failures carry a human-readable message
    /// suitable for the view layer.
    async fn read_text(&self) -> AppResult<String>;
}

/// A local backup file chosen by the user.
pub struct FileImportSource {
    path: PathBuf,
}

impl FileImportSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ImportSource for FileImportSource {
    async fn read_text(&self) -> AppResult<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::Import(format!("Failed to read import file: {}", e)))
    }
}

/// A remote backup fetched over HTTP.
pub struct UrlImportSource {
    url: String,
}

impl UrlImportSource {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}

#[async_trait]
impl ImportSource for UrlImportSource {
    async fn read_text(&self) -> AppResult<String> {
        let response = reqwest::get(&self.url).await?;
        let response = response
            .error_for_status()
            .map_err(|e| AppError::Import(format!("Import URL returned an error: {}", e)))?;
        Ok(response.text().await?)
    }
}
