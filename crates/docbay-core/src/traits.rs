//! Trait seams for the external pipeline collaborators.
//!
//! Both collaborators are best-effort by contract: neither returns an error
//! to the orchestrator. The refiner degrades to a diagnostic string, the
//! indexer to `None`.

use async_trait::async_trait;
use std::path::PathBuf;

/// Remote text refinement service.
#[async_trait]
pub trait Refine: Send + Sync {
    /// Refine `text` into cleaner markdown, optionally appending `extra`
    /// as a labeled supplementary section.
    ///
    /// Returns an empty string for empty input (no network call) and a short
    /// diagnostic string on any failure. Never fails.
    async fn refine(&self, text: &str, extra: Option<&str>) -> String;

    /// Model name used for refinement.
    fn model_name(&self) -> &str;
}

/// External artifact indexing service.
#[async_trait]
pub trait Index: Send + Sync {
    /// Upload the given files and trigger chunking on the service.
    ///
    /// Returns the created document ids, or `None` when any step failed.
    /// Never fails; failures are logged and swallowed.
    async fn index_files(&self, paths: &[PathBuf]) -> Option<Vec<String>>;
}
