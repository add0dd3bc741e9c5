use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

use crate::models::{AppState, AskRequest, AskResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ask", post(ask_question))
        .with_state(state)
}

/// POST /ask - Answer a question in exam-notes format
pub async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Json<AskResponse> {
    let question = request.question_text();
    info!(question_len = question.len(), "Question received");

    let answer = state.answer_agent.answer(&question).await;
    Json(AskResponse { answer })
}
