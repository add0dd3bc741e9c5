//! Agents
//!
//! - **Answer Agent**: turns a student's question into an exam-notes answer
//!   from the configured LLM

pub mod answer;

pub use answer::{AnswerAgent, EMPTY_QUESTION_MESSAGE, FALLBACK_MESSAGE};
