use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

use crate::extraction::{DocumentKind, ExtractionError};
use crate::models::{AppState, UploadResponse};

const FILE_FIELD: &str = "file";

#[derive(Debug, Error)]
enum UploadError {
    #[error("invalid multipart body: {0}")]
    Multipart(String),

    #[error("missing 'file' field")]
    MissingFile,

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// One uploaded file, held only for the duration of the request
struct UploadedDocument {
    filename: String,
    bytes: Bytes,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload_file))
        // Uploads are only bounded by available memory
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// POST /upload - Extract text from a document and add it to the context
async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Json<UploadResponse> {
    match store_upload(&state, multipart).await {
        Ok(()) => Json(UploadResponse::stored()),
        Err(e) => {
            warn!(error = %e, "File processing failed");
            Json(UploadResponse::failed(e))
        }
    }
}

async fn store_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(), UploadError> {
    let multipart = multipart.map_err(|e| UploadError::Multipart(e.body_text()))?;
    let document = read_file_field(multipart).await?;

    let kind = DocumentKind::from_filename(&document.filename);
    info!(
        filename = %document.filename,
        %kind,
        size = document.bytes.len(),
        "File upload received"
    );

    let text = state
        .extractor
        .extract(&document.filename, document.bytes)
        .await?;

    state.context.append(&text).await;
    let context_bytes = state.context.len().await;
    info!(
        filename = %document.filename,
        extracted_chars = text.chars().count(),
        context_bytes,
        "Content stored"
    );
    Ok(())
}

/// Read the whole `file` part into memory, ignoring any other parts.
async fn read_file_field(mut multipart: Multipart) -> Result<UploadedDocument, UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.body_text()))?;

        return Ok(UploadedDocument { filename, bytes });
    }

    Err(UploadError::MissingFile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::future::Future;

    fn assert_send_handler<H, F>(_: H)
    where
        H: Fn(State<AppState>, Result<Multipart, MultipartRejection>) -> F,
        F: Future + Send,
    {
    }

    #[test]
    fn test_upload_handler_is_send() {
        assert_send_handler(upload_file);

        let config = Config::from_lookup(|_| None).unwrap();
        let state = AppState::from_config(config).unwrap();
        let _ = router(state);
    }
}
