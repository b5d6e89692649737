use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::IntoResponse,
    routing::post,
    Router,
};
use serde::Serialize;

use super::common::created_response;
use crate::errors::ServiceError;
use crate::AppState;

/// Upload size cap. The axum default of 2 MB is too small for phone photos.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Image upload routes, nested under `/api/images`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub image_url: String,
}

/// Accepts a multipart form with a `file` part (the image) and a
/// `folderType` part (SPARE_PART or BATTERY) and stores the file locally.
async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ServiceError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut folder_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::InvalidInput(format!("Malformed multipart body: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .ok_or_else(|| {
                        ServiceError::InvalidInput("File part is missing a filename".to_string())
                    })?
                    .to_string();
                let content_type = field
                    .content_type()
                    .ok_or_else(|| {
                        ServiceError::InvalidInput(
                            "File part is missing a content type".to_string(),
                        )
                    })?
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    ServiceError::InvalidInput(format!("Failed to read file part: {}", e))
                })?;
                file = Some((file_name, content_type, data.to_vec()));
            }
            Some("folderType") => {
                let value = field.text().await.map_err(|e| {
                    ServiceError::InvalidInput(format!("Failed to read folderType part: {}", e))
                })?;
                folder_type = Some(value);
            }
            _ => {}
        }
    }

    let (file_name, content_type, data) = file.ok_or_else(|| {
        ServiceError::InvalidInput("Missing required multipart part: file".to_string())
    })?;
    let folder_type = folder_type.ok_or_else(|| {
        ServiceError::InvalidInput("Missing required multipart part: folderType".to_string())
    })?;

    let image_url = state
        .services
        .images
        .store(&folder_type, &file_name, &content_type, &data)
        .await?;

    Ok(created_response(ImageUploadResponse { image_url }))
}
