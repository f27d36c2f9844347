//! Local file storage for hosted images.

use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use crate::error::DocbayResult;
use crate::models::NewImage;

/// Saves uploaded images under a `YYYYMM/` directory layout and computes
/// their public URLs.
pub struct ImageStorage {
    static_dir: PathBuf,
    base_url: String,
}

impl ImageStorage {
    /// Create storage rooted at `static_dir`, ensuring it exists.
    pub fn new(static_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> DocbayResult<Self> {
        let static_dir = static_dir.into();
        std::fs::create_dir_all(&static_dir)?;

        Ok(Self {
            static_dir,
            base_url: base_url.into(),
        })
    }

    /// Save an uploaded image and return the field values for its record.
    pub async fn save(
        &self,
        original_filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> DocbayResult<NewImage> {
        let ext = extension_for(content_type);
        let filename = format!("{}{}", Uuid::new_v4(), ext);
        let year_month = chrono::Utc::now().format("%Y%m").to_string();

        let dir = self.static_dir.join(&year_month);
        tokio::fs::create_dir_all(&dir).await?;

        let size = bytes.len() as i64;
        let path = dir.join(&filename);
        tokio::fs::write(&path, bytes).await?;

        // Forward slash regardless of platform: this is a URL path segment
        let relative_path = format!("{}/{}", year_month, filename);
        let url = format!("{}/static/images/{}", self.base_url, relative_path);

        info!(path = %path.display(), size, "saved uploaded image");

        Ok(NewImage {
            original_filename: original_filename.to_string(),
            file_path: relative_path,
            url,
            size,
            content_type: content_type.to_string(),
            description: None,
        })
    }

    /// Absolute path of a stored image from its recorded relative path.
    pub fn resolve(&self, relative_path: &str) -> PathBuf {
        self.static_dir.join(relative_path)
    }

    /// Directory the images live under.
    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
}

/// Map a MIME content type to a file extension. Unknown image types fall
/// back to `.jpg`, matching the upload validation's `image/` prefix check.
fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/svg+xml" => ".svg",
        _ => ".jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_places_file_under_year_month() {
        let dir = tempdir().unwrap();
        let storage = ImageStorage::new(dir.path(), "http://localhost:8000").unwrap();

        let new = storage
            .save("cat.png", "image/png", vec![1, 2, 3, 4])
            .await
            .unwrap();

        assert_eq!(new.size, 4);
        assert!(new.file_path.ends_with(".png"));
        assert!(new.url.starts_with("http://localhost:8000/static/images/"));

        let stored = storage.resolve(&new.file_path);
        assert!(stored.exists());
        assert_eq!(std::fs::read(stored).unwrap(), vec![1, 2, 3, 4]);

        let year_month = new.file_path.split('/').next().unwrap();
        assert_eq!(year_month.len(), 6);
        assert!(year_month.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_extension_fallback() {
        assert_eq!(extension_for("image/png"), ".png");
        assert_eq!(extension_for("image/x-unknown"), ".jpg");
    }
}
