//! Image record storage using SQLite.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{DocbayError, DocbayResult};
use crate::models::{ImageRecord, NewImage};

/// SQLite-based store for hosted images.
pub struct ImageStore {
    conn: Arc<Mutex<Connection>>,
}

impl ImageStore {
    /// Create a new image store with its own connection.
    pub fn new(db_path: impl AsRef<Path>) -> DocbayResult<Self> {
        Self::with_connection(super::open_connection(db_path)?)
    }

    /// Create a store sharing an existing connection.
    pub fn with_connection(conn: Arc<Mutex<Connection>>) -> DocbayResult<Self> {
        let store = Self { conn };
        store.create_table()?;
        Ok(store)
    }

    /// Create the images table if it doesn't exist.
    fn create_table(&self) -> DocbayResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS images (
                id                 INTEGER PRIMARY KEY AUTOINCREMENT,
                original_filename  TEXT NOT NULL,
                file_path          TEXT NOT NULL,
                url                TEXT NOT NULL,
                size               INTEGER NOT NULL,
                content_type       TEXT NOT NULL,
                description        TEXT,
                created_at         TEXT NOT NULL
            )
            "#,
            [],
        )
        .map_err(|e| DocbayError::database(e.to_string()))?;

        Ok(())
    }

    /// Insert an image record and return it with its assigned id.
    pub fn insert(&self, new: NewImage) -> DocbayResult<ImageRecord> {
        let conn = self.conn.lock().unwrap();
        let created_at = chrono::Utc::now().to_rfc3339();

        conn.execute(
            r#"
            INSERT INTO images (
                original_filename, file_path, url, size,
                content_type, description, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                new.original_filename,
                new.file_path,
                new.url,
                new.size,
                new.content_type,
                new.description,
                created_at,
            ],
        )
        .map_err(|e| DocbayError::database(e.to_string()))?;

        let id = conn.last_insert_rowid();

        Ok(ImageRecord {
            id,
            original_filename: new.original_filename,
            file_path: new.file_path,
            url: new.url,
            size: new.size,
            content_type: new.content_type,
            description: new.description,
            created_at,
        })
    }

    /// Get an image record by id.
    pub fn get(&self, id: i64) -> DocbayResult<Option<ImageRecord>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            r#"
            SELECT id, original_filename, file_path, url, size,
                   content_type, description, created_at
            FROM images
            WHERE id = ?1
            "#,
            [id],
            Self::map_row,
        )
        .optional()
        .map_err(|e| DocbayError::database(e.to_string()))
    }

    /// List all image records, newest first.
    pub fn list(&self) -> DocbayResult<Vec<ImageRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                r#"
            SELECT id, original_filename, file_path, url, size,
                   content_type, description, created_at
            FROM images
            ORDER BY created_at DESC, id DESC
            "#,
            )
            .map_err(|e| DocbayError::database(e.to_string()))?;

        let records = stmt
            .query_map([], Self::map_row)
            .map_err(|e| DocbayError::database(e.to_string()))?;

        records
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DocbayError::database(e.to_string()))
    }

    /// Delete an image record by id. Returns true if a row was removed.
    pub fn delete(&self, id: i64) -> DocbayResult<bool> {
        let conn = self.conn.lock().unwrap();
        let removed = conn
            .execute("DELETE FROM images WHERE id = ?1", [id])
            .map_err(|e| DocbayError::database(e.to_string()))?;
        Ok(removed > 0)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ImageRecord> {
        Ok(ImageRecord {
            id: row.get(0)?,
            original_filename: row.get(1)?,
            file_path: row.get(2)?,
            url: row.get(3)?,
            size: row.get(4)?,
            content_type: row.get(5)?,
            description: row.get(6)?,
            created_at: row.get(7)?,
        })
    }
}
