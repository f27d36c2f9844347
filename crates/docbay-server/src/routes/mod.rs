//! Route definitions for the REST API.

mod conversions;
mod health;
mod images;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let static_images = ServeDir::new(state.inner.image_storage.static_dir());

    Router::new()
        // Health and root
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Image hosting
        .route("/api/images/upload", post(images::upload_image))
        .route("/api/images", get(images::list_images))
        .route("/api/images/:id", get(images::get_image))
        .route("/api/images/:id", delete(images::delete_image))
        // PDF conversion
        .route("/api/pdfs/convert", post(conversions::convert_pdf))
        .route("/api/pdfs", get(conversions::list_conversions))
        .route(
            "/api/pdfs/download/:filename",
            get(conversions::download_document),
        )
        .route(
            "/api/pdfs/download-markdown/:filename",
            get(conversions::download_markdown),
        )
        .route("/api/pdfs/:id", get(conversions::get_conversion))
        .route("/api/pdfs/:id", delete(conversions::delete_conversion))
        .route("/api/pdfs/:id/text", get(conversions::get_text))
        .route(
            "/api/pdfs/:id/processed_text",
            get(conversions::get_processed_text),
        )
        .route("/api/pdfs/:id/text_json", get(conversions::get_text_json))
        // Static image files
        .nest_service("/static/images", static_images)
        // Attach state
        .with_state(state)
}

pub use conversions::*;
pub use health::*;
pub use images::*;
