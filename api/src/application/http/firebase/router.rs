use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::ping_firestore::{__path_ping_firestore, ping_firestore};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(ping_firestore))]
pub struct FirebaseApiDoc;

pub fn firebase_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/api/firebase/ping", state.args.server.root_path),
        get(ping_firestore),
    )
}
