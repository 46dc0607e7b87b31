use axum::extract::{Multipart, State};
use wsie_core::domain::food_analysis::{FoodAnalysisReport, FoodAnalysisService};

use crate::application::http::{
    multipart::{IMAGE_FIELD, ImageUploadForm, read_image_field},
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "food-analysis",
    summary = "Analyze a food photo",
    description = "Validates the uploaded photo and returns a sample food-waste analysis.",
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = FoodAnalysisReport),
        (status = 400, description = "Missing, empty or undecodable image"),
        (status = 413, description = "Image too large")
    ),
)]
pub async fn analyze_food(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<FoodAnalysisReport>, ApiError> {
    let upload = read_image_field(&mut multipart, IMAGE_FIELD).await?;

    let report = state
        .service
        .analyze_food(upload)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::BadRequest(message) => {
                ApiError::BadRequest(format!("Analysis failed: {}", message))
            }
            other => other,
        })?;

    Ok(Response::OK(report))
}
