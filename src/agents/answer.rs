//! Answer Agent
//!
//! Wraps a student's question in the exam-notes prompt and forwards it to
//! the configured LLM. Never fails: an empty question or a failed model call
//! becomes a fixed warning string.

use crate::config::LLMConfig;
use crate::llm::provider::{LLMProviderConfig, LLM};
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest};
use tracing::{error, info, warn};

pub const EMPTY_QUESTION_MESSAGE: &str = "⚠️ Question cannot be empty.";
pub const FALLBACK_MESSAGE: &str = "⚠️ AI failed to generate response. Try again.";

pub struct AnswerAgent {
    /// `None` when no API key is configured
    llm: Option<LLM>,
    model: String,
}

impl AnswerAgent {
    pub fn new(llm: Option<LLM>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    /// Build the agent from configuration. An unsupported provider is an
    /// error; a missing API key is not.
    pub fn from_config(config: &LLMConfig) -> AppResult<Self> {
        let api_key = config.active_api_key();
        let llm = LLM::new(LLMProviderConfig {
            name: config.provider.clone(),
            api_key: api_key.clone().unwrap_or_default(),
            api_base: Some(config.api_base.clone()),
        })?;

        if api_key.is_none() {
            warn!(provider = %config.provider, "No LLM API key configured, every question will get the fallback answer");
        }

        Ok(Self::new(api_key.map(|_| llm), config.model.clone()))
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    /// Answer a question. Always returns a string.
    pub async fn answer(&self, question: &str) -> String {
        if question.is_empty() {
            warn!("Rejected empty question");
            return EMPTY_QUESTION_MESSAGE.to_string();
        }

        info!(question_len = question.len(), model = %self.model, "Generating answer");

        match self.generate(question).await {
            Ok(answer) => {
                info!(answer_len = answer.len(), "Generated answer successfully");
                answer
            }
            Err(e) => {
                error!(error = %e, "LLM call failed, returning fallback answer");
                FALLBACK_MESSAGE.to_string()
            }
        }
    }

    async fn generate(&self, question: &str) -> AppResult<String> {
        let llm = self
            .llm
            .as_ref()
            .ok_or_else(|| AppError::LLMApi("no API key configured".to_string()))?;

        let request = LLMRequest {
            provider: llm.provider_name().to_string(),
            model: self.model.clone(),
            messages: vec![LLMMessage::user(Self::create_prompt(question))],
            max_tokens: None,
            temperature: None,
            system_instruction: None,
        };

        let response = llm.create_chat_completion(&request).await?;
        Ok(response.content)
    }

    /// The exam-notes prompt. Only the question is embedded.
    pub fn create_prompt(question: &str) -> String {
        format!(
            "\nYou are an exam-oriented academic assistant.\n\n\
            Answer in clean, plain-text exam notes format.\n\n\
            Strict Rules:\n\
            - DO NOT use markdown\n\
            - DO NOT use ###, **, ---, or symbols\n\
            - DO NOT write long paragraphs\n\
            - Use simple headings followed by a colon\n\
            - Use '-' for bullet points only\n\
            - Keep points short and clear\n\
            - Use textbook-style language\n\
            - No storytelling or analogies\n\n\
            If examples are needed, keep them very brief.\n\n\
            Question:\n\
            {}\n\n",
            question
        )
    }
}
