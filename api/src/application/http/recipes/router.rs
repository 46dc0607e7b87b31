use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    recommend_recipes::{__path_recommend_recipes, recommend_recipes},
    recommend_recipes_from_description::{
        __path_recommend_recipes_from_description, recommend_recipes_from_description,
    },
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(recommend_recipes, recommend_recipes_from_description))]
pub struct RecipeApiDoc;

pub fn recipe_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{root_path}/api/v1/recipes"),
            post(recommend_recipes),
        )
        .route(
            &format!("{root_path}/api/v1/recipes/text"),
            post(recommend_recipes_from_description),
        )
}
