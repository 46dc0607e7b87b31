use axum::extract::State;
use serde_json::Value;
use tracing::error;
use wsie_core::domain::firebase::FirebaseService;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/ping",
    tag = "firebase",
    summary = "Round-trip a document through Firestore",
    description = "Writes {ok, ts} to healthcheck/ping and returns the document read back.",
    responses(
        (status = 200, description = "Document read back from Firestore"),
        (status = 500, description = "Firestore request failed"),
        (status = 503, description = "Firestore is not configured")
    ),
)]
pub async fn ping_firestore(State(state): State<AppState>) -> Result<Response<Value>, ApiError> {
    let snapshot = state.service.ping().await.map_err(|e| {
        error!(error = %e, "Firestore ping failed");
        ApiError::from(e)
    })?;

    Ok(Response::OK(snapshot))
}
