use std::path::{Path, PathBuf};
use tracing::instrument;
use uuid::Uuid;

use crate::errors::ServiceError;

const SPARE_PARTS_DIR: &str = "spare-parts";
const BATTERIES_DIR: &str = "batteries";
const ALLOWED_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];
const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Local filesystem storage for product photos. Files are renamed to fresh
/// UUIDs and served back under `/uploads/<subfolder>/<name>`.
#[derive(Debug, Clone)]
pub struct ImageStorageService {
    root: PathBuf,
}

impl ImageStorageService {
    /// Creates the upload root and its per-product-type subfolders.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ServiceError> {
        let root = root.into();
        for sub in [SPARE_PARTS_DIR, BATTERIES_DIR] {
            std::fs::create_dir_all(root.join(sub)).map_err(|e| {
                ServiceError::InternalError(format!("failed to create upload directory: {}", e))
            })?;
        }
        Ok(Self { root })
    }

    #[instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn store(
        &self,
        folder_type: &str,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<String, ServiceError> {
        if data.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Cannot store an empty file".to_string(),
            ));
        }

        if !ALLOWED_CONTENT_TYPES.contains(&content_type.to_ascii_lowercase().as_str()) {
            return Err(ServiceError::InvalidInput(
                "Only JPEG and PNG images are accepted".to_string(),
            ));
        }

        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .filter(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
            .ok_or_else(|| {
                ServiceError::InvalidInput(
                    "File extension must be one of: jpg, jpeg, png".to_string(),
                )
            })?;

        let subfolder = subfolder_for(folder_type)?;
        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);

        tokio::fs::write(self.root.join(subfolder).join(&stored_name), data)
            .await
            .map_err(|e| {
                ServiceError::InternalError(format!("failed to write uploaded file: {}", e))
            })?;

        Ok(format!("/uploads/{}/{}", subfolder, stored_name))
    }
}

fn subfolder_for(folder_type: &str) -> Result<&'static str, ServiceError> {
    if folder_type.eq_ignore_ascii_case("SPARE_PART") {
        Ok(SPARE_PARTS_DIR)
    } else if folder_type.eq_ignore_ascii_case("BATTERY") {
        Ok(BATTERIES_DIR)
    } else {
        Err(ServiceError::InvalidInput(
            "Invalid folder type. Accepted values: SPARE_PART, BATTERY".to_string(),
        ))
    }
}
