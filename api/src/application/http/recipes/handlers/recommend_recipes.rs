use axum::extract::{Multipart, State};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;
use wsie_core::domain::recipe::{Recipe, RecipeReply, RecipeService};

use crate::application::http::{
    multipart::{IMAGE_FIELD, ImageUploadForm, read_image_field},
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

/// Documented shape of [`RecipeReply`]. Generated replies may carry
/// additional top-level fields returned by the model.
#[derive(Serialize, ToSchema)]
pub struct RecipeResponse {
    pub recipes: Vec<Recipe>,
    pub use_llm: bool,
    #[schema(example = "quota_or_error")]
    pub fallback_reason: Option<String>,
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    summary = "Recommend recipes from an ingredient photo",
    description = "Sends the uploaded photo to the vision model and returns three recipes. Falls back to a fixed list when the model is disabled or fails.",
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = RecipeResponse),
        (status = 400, description = "Missing, empty or undecodable image"),
        (status = 413, description = "Image too large")
    ),
)]
pub async fn recommend_recipes(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<RecipeReply>, ApiError> {
    let upload = read_image_field(&mut multipart, IMAGE_FIELD).await?;

    let reply = state
        .service
        .recommend_recipes(upload)
        .await
        .map_err(ApiError::from)?;

    info!(
        use_llm = reply.use_llm,
        recipes = reply.recipes().len(),
        "Recipes recommended"
    );

    Ok(Response::OK(reply))
}
