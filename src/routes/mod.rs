//! HTTP Routes
//!
//! - `POST /upload` - Extract text from a PDF, image or text file into the context
//! - `POST /ask` - Answer a question in exam-notes format
//! - `POST /clear` - Reset the accumulated context
//! - `GET /health` - Liveness check

pub mod ask;
pub mod context;
pub mod health;
pub mod upload;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let router = Router::new()
        .merge(upload::router(state.clone()))
        .merge(ask::router(state.clone()))
        .merge(context::router(state.clone()))
        .merge(health::router(state))
        .layer(TraceLayer::new_for_http());

    apply_cors(router)
}
