//! OCR backends
//!
//! [`TesseractBackend`] shells out to the Tesseract executable. The path to
//! the executable is configuration, so the same build works with a system
//! install (`tesseract` on `PATH`) or a fixed install location.

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::config::OcrConfig;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("tesseract executable not found at '{0}'")]
    NotAvailable(String),

    #[error("{0}")]
    Failed(String),

    #[error("could not encode image for OCR: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait OcrBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Recognise the text in an RGB image.
    async fn recognize(&self, image: RgbImage) -> Result<String, OcrError>;
}

pub struct TesseractBackend {
    config: OcrConfig,
}

impl TesseractBackend {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    fn encode_png(image: RgbImage) -> Result<Vec<u8>, OcrError> {
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| OcrError::Encode(e.to_string()))?;
        Ok(png)
    }

    /// Feed PNG bytes to `tesseract stdin stdout` and collect the text.
    async fn run_tesseract(&self, png: &[u8]) -> Result<String, OcrError> {
        let mut child = Command::new(&self.config.tesseract_cmd)
            .args(["stdin", "stdout", "-l", self.config.language.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    OcrError::NotAvailable(self.config.tesseract_cmd.clone())
                }
                _ => OcrError::Io(e),
            })?;

        // tesseract may exit before reading all of stdin (e.g. unknown
        // language); its stderr explains why, so collect it before the write error
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(png).await,
            None => Ok(()),
        };

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Failed(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        written?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new(OcrConfig::default())
    }
}

#[async_trait]
impl OcrBackend for TesseractBackend {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn recognize(&self, image: RgbImage) -> Result<String, OcrError> {
        let png = tokio::task::spawn_blocking(move || Self::encode_png(image))
            .await
            .map_err(|e| OcrError::Failed(format!("encoding task failed: {}", e)))??;

        debug!(
            cmd = %self.config.tesseract_cmd,
            language = %self.config.language,
            bytes = png.len(),
            "Invoking tesseract"
        );
        self.run_tesseract(&png).await
    }
}
