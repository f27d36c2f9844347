//! Configuration for the docbay server.
//!
//! All settings come from environment variables with sensible defaults for
//! local development. External service endpoints, models and credentials are
//! never hardcoded: the refiner and indexer are simply left unconfigured when
//! their variables are missing.

use serde::{Deserialize, Serialize};

/// Remote text refiner configuration.
///
/// Present only when both `AI_BASE_URL` and `AI_MODEL` are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinerConfig {
    /// Base URL of the OpenAI-compatible completion endpoint.
    pub base_url: String,
    /// Model name to request.
    pub model: String,
}

/// Artifact indexer configuration.
///
/// Present only when `INDEXER_BASE_URL`, `INDEXER_API_KEY` and
/// `INDEXER_DATASET_ID` are all set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Base URL of the indexing service.
    pub base_url: String,
    /// Bearer token for the indexing service.
    pub api_key: String,
    /// Dataset to upload artifacts into.
    pub dataset_id: String,
}

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Public base URL used when computing download and static URLs.
    pub base_url: String,
    /// SQLite database path (`:memory:` supported).
    pub db_path: String,
    /// Directory for stored images.
    pub static_files_dir: String,
    /// Directory for uploaded PDFs.
    pub pdf_upload_dir: String,
    /// Directory for produced DOCX and markdown artifacts.
    pub pdf_output_dir: String,
    /// Optional refiner endpoint/model pair.
    pub refiner: Option<RefinerConfig>,
    /// Optional indexing service.
    pub indexer: Option<IndexerConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            base_url: "http://localhost:8000".to_string(),
            db_path: "data/docbay.db".to_string(),
            static_files_dir: "static/images".to_string(),
            pdf_upload_dir: "static/pdfs/uploads".to_string(),
            pdf_output_dir: "static/pdfs/outputs".to_string(),
            refiner: None,
            indexer: None,
        }
    }
}

impl ServerConfig {
    /// Build configuration from environment variables.
    ///
    /// Recognized variables:
    /// - `DOCBAY_HOST` (default: 0.0.0.0)
    /// - `DOCBAY_PORT` (default: 8000)
    /// - `BASE_URL` (default: http://localhost:8000)
    /// - `DOCBAY_DB_PATH` (default: data/docbay.db)
    /// - `STATIC_FILES_DIR` (default: static/images)
    /// - `PDF_UPLOAD_DIR` (default: static/pdfs/uploads)
    /// - `PDF_OUTPUT_DIR` (default: static/pdfs/outputs)
    /// - `AI_BASE_URL` + `AI_MODEL` (both required to enable the refiner)
    /// - `INDEXER_BASE_URL` + `INDEXER_API_KEY` + `INDEXER_DATASET_ID`
    ///   (all required to enable the indexer)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("DOCBAY_HOST") {
            config.host = host;
        }

        if let Ok(port) = std::env::var("DOCBAY_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }

        if let Ok(base_url) = std::env::var("BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(path) = std::env::var("DOCBAY_DB_PATH") {
            config.db_path = path;
        }

        if let Ok(dir) = std::env::var("STATIC_FILES_DIR") {
            config.static_files_dir = dir;
        }

        if let Ok(dir) = std::env::var("PDF_UPLOAD_DIR") {
            config.pdf_upload_dir = dir;
        }

        if let Ok(dir) = std::env::var("PDF_OUTPUT_DIR") {
            config.pdf_output_dir = dir;
        }

        if let (Ok(base_url), Ok(model)) =
            (std::env::var("AI_BASE_URL"), std::env::var("AI_MODEL"))
        {
            config.refiner = Some(RefinerConfig { base_url, model });
        }

        if let (Ok(base_url), Ok(api_key), Ok(dataset_id)) = (
            std::env::var("INDEXER_BASE_URL"),
            std::env::var("INDEXER_API_KEY"),
            std::env::var("INDEXER_DATASET_ID"),
        ) {
            config.indexer = Some(IndexerConfig {
                base_url,
                api_key,
                dataset_id,
            });
        }

        config
    }
}
