use std::sync::Arc;

use crate::agents::AnswerAgent;
use crate::config::Config;
use crate::context::ContextStore;
use crate::extraction::{Extractor, TesseractBackend};
use crate::types::AppResult;

pub const STORED_MESSAGE: &str = "Content stored successfully";
pub const CLEARED_MESSAGE: &str = "Context cleared successfully";

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub context: ContextStore,
    pub extractor: Arc<Extractor>,
    pub answer_agent: Arc<AnswerAgent>,
}

impl AppState {
    pub fn new(config: Config, extractor: Extractor, answer_agent: AnswerAgent) -> Self {
        Self {
            config,
            context: ContextStore::new(),
            extractor: Arc::new(extractor),
            answer_agent: Arc::new(answer_agent),
        }
    }

    /// Wire the production collaborators: Tesseract for OCR and the
    /// configured LLM provider for answers.
    pub fn from_config(config: Config) -> AppResult<Self> {
        let extractor = Extractor::new(Arc::new(TesseractBackend::new(config.ocr.clone())));
        let answer_agent = AnswerAgent::from_config(&config.llm)?;
        Ok(Self::new(config, extractor, answer_agent))
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AskRequest {
    /// Any JSON value is accepted; see [`AskRequest::question_text`]
    #[serde(default)]
    pub question: Option<serde_json::Value>,
}

impl AskRequest {
    /// The question as text. Missing, `null`, `false`, `0`, `""`, `[]` and
    /// `{}` all count as empty; other non-strings use their JSON rendering.
    pub fn question_text(&self) -> String {
        use serde_json::Value;

        match &self.question {
            None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
            Some(Value::Array(items)) if items.is_empty() => String::new(),
            Some(Value::Object(fields)) if fields.is_empty() => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Upload outcome. Both shapes are sent with status 200.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Stored { message: String },
    Failed { error: String },
}

impl UploadResponse {
    pub fn stored() -> Self {
        UploadResponse::Stored {
            message: STORED_MESSAGE.to_string(),
        }
    }

    pub fn failed(reason: impl std::fmt::Display) -> Self {
        UploadResponse::Failed {
            error: format!("File processing failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub context_bytes: usize,
    pub llm_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upload_response_shapes() {
        assert_eq!(
            serde_json::to_value(UploadResponse::stored()).unwrap(),
            json!({"message": "Content stored successfully"})
        );
        assert_eq!(
            serde_json::to_value(UploadResponse::failed("bad xref")).unwrap(),
            json!({"error": "File processing failed: bad xref"})
        );
    }

    fn question_of(body: &str) -> String {
        serde_json::from_str::<AskRequest>(body)
            .unwrap()
            .question_text()
    }

    #[test]
    fn test_ask_request_question_optional() {
        assert_eq!(question_of("{}"), "");
        assert_eq!(question_of(r#"{"question": null}"#), "");
        assert_eq!(question_of(r#"{"question": "Why?"}"#), "Why?");
        assert_eq!(question_of(r#"{"question": "  "}"#), "  ");
    }

    #[test]
    fn test_ask_request_non_string_question() {
        for empty in ["false", "0", "0.0", "\"\"", "[]", "{}"] {
            let body = format!(r#"{{"question": {}}}"#, empty);
            assert_eq!(question_of(&body), "", "{body}");
        }

        assert_eq!(question_of(r#"{"question": 42}"#), "42");
        assert_eq!(question_of(r#"{"question": true}"#), "true");
        assert_eq!(question_of(r#"{"question": ["a"]}"#), r#"["a"]"#);
    }
}
