//! Text extraction
//!
//! Turns the raw bytes of an uploaded document into plain text. The strategy
//! is chosen from the filename extension:
//!
//! - `.pdf` - text layer of every page, in page order
//! - `.png`, `.jpg`, `.jpeg` - OCR on the decoded RGB image
//! - anything else - UTF-8 decode, dropping invalid byte sequences

pub mod ocr;
pub mod pdf;

pub use ocr::{OcrBackend, OcrError, TesseractBackend};

use bytes::Bytes;
use image::RgbImage;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised while extracting text from an upload
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("could not decode image: {0}")]
    Image(String),

    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Extraction strategy for an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Image,
    Text,
}

impl DocumentKind {
    const IMAGE_EXTENSIONS: [&'static str; 3] = [".png", ".jpg", ".jpeg"];

    pub fn from_filename(filename: &str) -> Self {
        let name = filename.to_lowercase();
        if name.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if Self::IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            DocumentKind::Image
        } else {
            DocumentKind::Text
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "pdf"),
            DocumentKind::Image => write!(f, "image"),
            DocumentKind::Text => write!(f, "text"),
        }
    }
}

pub struct Extractor {
    ocr: Arc<dyn OcrBackend>,
}

impl Extractor {
    pub fn new(ocr: Arc<dyn OcrBackend>) -> Self {
        Self { ocr }
    }

    pub async fn extract(&self, filename: &str, bytes: Bytes) -> Result<String, ExtractionError> {
        let kind = DocumentKind::from_filename(filename);
        debug!(filename, %kind, size = bytes.len(), "Extracting text");

        match kind {
            DocumentKind::Pdf => run_blocking(move || pdf::extract_text(&bytes)).await,
            DocumentKind::Image => {
                let image = run_blocking(move || decode_image(&bytes)).await?;
                debug!(
                    backend = self.ocr.name(),
                    width = image.width(),
                    height = image.height(),
                    "Running OCR"
                );
                Ok(self.ocr.recognize(image).await?)
            }
            DocumentKind::Text => Ok(decode_text(&bytes)),
        }
    }
}

/// Decode image bytes (format sniffed from content) into 8-bit RGB.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, ExtractionError> {
    let image = image::load_from_memory(bytes).map_err(|e| ExtractionError::Image(e.to_string()))?;
    Ok(image.to_rgb8())
}

/// Decode bytes as UTF-8, silently dropping invalid sequences.
pub fn decode_text(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

async fn run_blocking<T, F>(f: F) -> Result<T, ExtractionError>
where
    F: FnOnce() -> Result<T, ExtractionError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))?
}
