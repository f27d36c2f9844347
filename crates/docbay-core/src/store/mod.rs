//! SQLite-backed record stores.

mod conversions;
mod images;

pub use conversions::ConversionStore;
pub use images::ImageStore;

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{DocbayError, DocbayResult};

/// Open a SQLite connection suitable for sharing between stores, creating
/// the parent directory when needed. `:memory:` is supported.
pub fn open_connection(db_path: impl AsRef<Path>) -> DocbayResult<Arc<Mutex<Connection>>> {
    if let Some(parent) = db_path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = if db_path.as_ref().to_str() == Some(":memory:") {
        Connection::open_in_memory()
    } else {
        Connection::open(db_path.as_ref())
    }
    .map_err(|e| DocbayError::database(e.to_string()))?;

    Ok(Arc::new(Mutex::new(conn)))
}
