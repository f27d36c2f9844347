//! Server state management.

use std::sync::Arc;

use docbay_core::config::ServerConfig;
use docbay_core::error::DocbayResult;
use docbay_core::images::ImageStorage;
use docbay_core::pipeline::PdfConverter;
use docbay_core::store::{self, ConversionStore, ImageStore};

use crate::factory::build_converter;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub config: ServerConfig,
    pub conversions: ConversionStore,
    pub images: ImageStore,
    pub converter: PdfConverter,
    pub image_storage: ImageStorage,
}

impl AppState {
    /// Build the full application state from configuration: stores,
    /// converter (with refiner/indexer when configured) and image storage.
    pub fn from_config(config: ServerConfig) -> DocbayResult<Self> {
        let conn = store::open_connection(&config.db_path)?;
        let conversions = ConversionStore::with_connection(conn.clone())?;
        let images = ImageStore::with_connection(conn)?;
        let converter = build_converter(&config)?;
        let image_storage = ImageStorage::new(&config.static_files_dir, &config.base_url)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                conversions,
                images,
                converter,
                image_storage,
            }),
        })
    }
}
