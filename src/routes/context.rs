use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

use crate::models::{AppState, MessageResponse, CLEARED_MESSAGE};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/clear", post(clear_context))
        .with_state(state)
}

/// POST /clear - Drop everything accumulated so far
async fn clear_context(State(state): State<AppState>) -> Json<MessageResponse> {
    let dropped = state.context.len().await;
    state.context.clear().await;
    info!(dropped_bytes = dropped, "Context cleared");

    Json(MessageResponse::new(CLEARED_MESSAGE))
}
