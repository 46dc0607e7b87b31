use crate::application::http::{
    firebase::router::FirebaseApiDoc, food_analysis::router::FoodAnalysisApiDoc,
    recipes::router::RecipeApiDoc, server::api_entities::api_error::ApiErrorResponse,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WSIE API"
    ),
    paths(crate::application::http::health::health),
    components(schemas(ApiErrorResponse)),
    nest(
        (path = "/api/v1", api = RecipeApiDoc),
        (path = "/api/food", api = FoodAnalysisApiDoc),
        (path = "/api/firebase", api = FirebaseApiDoc),
    )
)]
pub struct ApiDoc;
