// MasterPrep - study-assistant backend: document text extraction and exam-style answers

pub mod config;
pub mod types;
pub mod models;
pub mod context;
pub mod extraction;
pub mod llm;
pub mod agents;
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use context::ContextStore;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
