use axum::{extract::Multipart, http::StatusCode};
use tracing::warn;
use utoipa::ToSchema;
use wsie_core::domain::image::UploadedImage;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const IMAGE_FIELD: &str = "file";

/// Multipart body accepted by the image endpoints.
#[derive(ToSchema)]
pub struct ImageUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Reads the first field named `field_name` from the form. Other fields are ignored.
pub async fn read_image_field(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<UploadedImage, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!(error = %e, "Failed to read multipart field");
        multipart_error(e.status(), format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);

        let data = field.bytes().await.map_err(|e| {
            warn!(error = %e, "Failed to read uploaded file");
            multipart_error(e.status(), format!("Failed to read file: {}", e))
        })?;

        let mut upload = UploadedImage::new(data);
        if let Some(content_type) = content_type {
            upload = upload.with_content_type(content_type);
        }
        if let Some(file_name) = file_name {
            upload = upload.with_file_name(file_name);
        }

        return Ok(upload);
    }

    Err(ApiError::BadRequest(format!(
        "Missing '{}' field in multipart form",
        field_name
    )))
}

fn multipart_error(status: StatusCode, message: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(message)
    } else {
        ApiError::BadRequest(message)
    }
}
