//! Best-effort artifact upload to an external indexing service.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use docbay_core::config::IndexerConfig;
use docbay_core::error::{DocbayError, DocbayResult};
use docbay_core::traits::Index;

#[derive(Error, Debug)]
enum IndexError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("indexing service returned HTTP {0}")]
    Status(u16),

    #[error("upload response contained no document ids")]
    NoDocuments,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    data: Vec<UploadedDocument>,
}

#[derive(Debug, Deserialize)]
struct UploadedDocument {
    id: String,
}

/// Client for the external indexing service's dataset API.
///
/// Uploads artifacts as multipart form files, then triggers asynchronous
/// chunking of the created documents. Strictly fire-and-forget: every
/// failure is logged and swallowed.
pub struct ArtifactIndexer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    dataset_id: String,
}

impl ArtifactIndexer {
    /// Create an indexer for the configured service and dataset.
    pub fn new(config: IndexerConfig) -> DocbayResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| DocbayError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        info!(base_url = %config.base_url, dataset_id = %config.dataset_id, "artifact indexer initialized");

        Ok(Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key,
            dataset_id: config.dataset_id,
        })
    }

    async fn upload(&self, paths: &[PathBuf]) -> Result<Vec<String>, IndexError> {
        let mut form = multipart::Form::new();
        for path in paths {
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("artifact")
                .to_string();
            let bytes = tokio::fs::read(path).await?;
            form = form.part("file", multipart::Part::bytes(bytes).file_name(filename));
        }

        let response = self
            .client
            .post(format!(
                "{}/api/v1/datasets/{}/documents",
                self.base_url, self.dataset_id
            ))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexError::Status(status.as_u16()));
        }

        let body: UploadResponse = response.json().await?;
        if body.data.is_empty() {
            return Err(IndexError::NoDocuments);
        }

        Ok(body.data.into_iter().map(|d| d.id).collect())
    }

    async fn trigger_chunking(&self, document_ids: &[String]) -> Result<(), IndexError> {
        let response = self
            .client
            .post(format!(
                "{}/api/v1/datasets/{}/chunks",
                self.base_url, self.dataset_id
            ))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "document_ids": document_ids }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexError::Status(status.as_u16()));
        }

        Ok(())
    }

    async fn try_index(&self, paths: &[PathBuf]) -> Result<Vec<String>, IndexError> {
        let document_ids = self.upload(paths).await?;
        self.trigger_chunking(&document_ids).await?;
        Ok(document_ids)
    }

    fn describe(paths: &[PathBuf]) -> String {
        paths
            .iter()
            .map(|p| p.display())
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[async_trait]
impl Index for ArtifactIndexer {
    async fn index_files(&self, paths: &[PathBuf]) -> Option<Vec<String>> {
        match self.try_index(paths).await {
            Ok(document_ids) => {
                info!(
                    files = %Self::describe(paths),
                    count = document_ids.len(),
                    "artifacts uploaded and chunking triggered"
                );
                Some(document_ids)
            }
            Err(e) => {
                warn!(files = %Self::describe(paths), error = %e, "indexing failed, continuing");
                None
            }
        }
    }
}
