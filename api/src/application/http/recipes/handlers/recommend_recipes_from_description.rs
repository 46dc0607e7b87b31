use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use wsie_core::domain::recipe::{RecipeReply, RecipeService};

use super::recommend_recipes::RecipeResponse;
use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct DescriptionRequest {
    #[schema(example = "양파, 버터, 감자")]
    pub description: String,
}

#[utoipa::path(
    post,
    path = "/recipes/text",
    tag = "recipes",
    summary = "Recommend recipes from an ingredient description",
    description = "Text-only variant of the photo endpoint with the same fallback behavior.",
    request_body = DescriptionRequest,
    responses(
        (status = 200, body = RecipeResponse),
        (status = 400, description = "Blank description")
    ),
)]
pub async fn recommend_recipes_from_description(
    State(state): State<AppState>,
    Json(payload): Json<DescriptionRequest>,
) -> Result<Response<RecipeReply>, ApiError> {
    let reply = state
        .service
        .recommend_recipes_from_description(payload.description)
        .await
        .map_err(ApiError::from)?;

    info!(
        use_llm = reply.use_llm,
        recipes = reply.recipes().len(),
        "Recipes recommended from description"
    );

    Ok(Response::OK(reply))
}
