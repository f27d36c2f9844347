//! Conversion record storage using SQLite.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{DocbayError, DocbayResult};
use crate::models::{ConversionRecord, NewConversion};

/// SQLite-based store for PDF conversion records.
pub struct ConversionStore {
    conn: Arc<Mutex<Connection>>,
}

impl ConversionStore {
    /// Create a new conversion store with its own connection.
    pub fn new(db_path: impl AsRef<Path>) -> DocbayResult<Self> {
        Self::with_connection(super::open_connection(db_path)?)
    }

    /// Create a store sharing an existing connection.
    pub fn with_connection(conn: Arc<Mutex<Connection>>) -> DocbayResult<Self> {
        let store = Self { conn };
        store.create_table()?;
        Ok(store)
    }

    /// Create the conversions table if it doesn't exist.
    fn create_table(&self) -> DocbayResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS conversions (
                id                 INTEGER PRIMARY KEY AUTOINCREMENT,
                original_filename  TEXT NOT NULL,
                output_filename    TEXT NOT NULL,
                file_path          TEXT NOT NULL,
                page_count         INTEGER NOT NULL DEFAULT 0,
                text_content       TEXT NOT NULL DEFAULT '',
                processed_text     TEXT NOT NULL DEFAULT '',
                markdown_path      TEXT,
                created_at         TEXT NOT NULL
            )
            "#,
            [],
        )
        .map_err(|e| DocbayError::database(e.to_string()))?;

        Ok(())
    }

    /// Insert a conversion record and return it with its assigned id.
    pub fn insert(&self, new: NewConversion) -> DocbayResult<ConversionRecord> {
        let conn = self.conn.lock().unwrap();
        let created_at = chrono::Utc::now().to_rfc3339();

        conn.execute(
            r#"
            INSERT INTO conversions (
                original_filename, output_filename, file_path, page_count,
                text_content, processed_text, markdown_path, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                new.original_filename,
                new.output_filename,
                new.file_path,
                new.page_count,
                new.text_content,
                new.processed_text,
                new.markdown_path,
                created_at,
            ],
        )
        .map_err(|e| DocbayError::database(e.to_string()))?;

        let id = conn.last_insert_rowid();

        Ok(ConversionRecord {
            id,
            original_filename: new.original_filename,
            output_filename: new.output_filename,
            file_path: new.file_path,
            page_count: new.page_count,
            text_content: new.text_content,
            processed_text: new.processed_text,
            markdown_path: new.markdown_path,
            created_at,
        })
    }

    /// Get a conversion record by id.
    pub fn get(&self, id: i64) -> DocbayResult<Option<ConversionRecord>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            r#"
            SELECT id, original_filename, output_filename, file_path, page_count,
                   text_content, processed_text, markdown_path, created_at
            FROM conversions
            WHERE id = ?1
            "#,
            [id],
            Self::map_row,
        )
        .optional()
        .map_err(|e| DocbayError::database(e.to_string()))
    }

    /// List all conversion records, newest first.
    pub fn list(&self) -> DocbayResult<Vec<ConversionRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                r#"
            SELECT id, original_filename, output_filename, file_path, page_count,
                   text_content, processed_text, markdown_path, created_at
            FROM conversions
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

    /// Delete a conversion record by id. Returns true if a row was removed.
    pub fn delete(&self, id: i64) -> DocbayResult<bool> {
        let conn = self.conn.lock().unwrap();
        let removed = conn
            .execute("DELETE FROM conversions WHERE id = ?1", [id])
            .map_err(|e| DocbayError::database(e.to_string()))?;
        Ok(removed > 0)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ConversionRecord> {
        Ok(ConversionRecord {
            id: row.get(0)?,
            original_filename: row.get(1)?,
            output_filename: row.get(2)?,
            file_path: row.get(3)?,
            page_count: row.get(4)?,
            text_content: row.get(5)?,
            processed_text: row.get(6)?,
            markdown_path: row.get(7)?,
            created_at: row.get(8)?,
        })
    }
}
