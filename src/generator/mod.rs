//! AI question generation.
//!
//! One request goes out per quiz: the document text and the number of
//! questions wanted. The reply is a [`GeneratedQuiz`] which may not have
//! the requested shape; [`normalize_questions`] fixes that up before the
//! quiz starts.

mod client;
mod normalize;
mod parse;
mod prompt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{GeneratedQuiz, OPTION_COUNT};

pub use client::{
    ChatCompletionsGenerator, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
    GeneratorConfig,
};
pub use normalize::normalize_questions;
pub use parse::parse_quiz_output;
pub use prompt::{output_schema, render_prompt, system_prompt};

pub const MIN_QUESTIONS: usize = 5;
pub const MAX_QUESTIONS: usize = 50;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("The number of questions must be between {} and {}, got {0}.", MIN_QUESTIONS, MAX_QUESTIONS)]
    InvalidQuestionCount(usize),

    #[error("The document has no content to generate questions from.")]
    EmptyDocument,

    #[error("Could not reach the AI service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("AI failed to generate questions. Output was null.")]
    EmptyOutput,

    #[error("AI output was not valid quiz JSON: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

/// Input of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub document_content: String,
    pub number_of_questions: usize,
}

impl GenerationRequest {
    pub fn new(document_content: impl Into<String>, number_of_questions: usize) -> Self {
        Self {
            document_content: document_content.into(),
            number_of_questions,
        }
    }

    pub fn validate(&self) -> Result<(), GenerateError> {
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.number_of_questions) {
            return Err(GenerateError::InvalidQuestionCount(self.number_of_questions));
        }
        if self.document_content.trim().is_empty() {
            return Err(GenerateError::EmptyDocument);
        }
        Ok(())
    }
}

/// Anything that can turn a document into quiz questions.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedQuiz, GenerateError>;
}

/// Validates `request`, runs `generator` and reports shape problems.
///
/// A reply with the wrong number of questions, or questions without
/// exactly [`OPTION_COUNT`] options, is logged and passed through as is.
pub async fn generate_quiz_questions(
    generator: &dyn QuestionGenerator,
    request: &GenerationRequest,
) -> Result<GeneratedQuiz, GenerateError> {
    request.validate()?;

    info!(
        requested = request.number_of_questions,
        document_chars = request.document_content.chars().count(),
        "generating quiz questions"
    );
    let output = generator.generate(request).await?;

    if output.questions.len() != request.number_of_questions {
        warn!(
            generated = output.questions.len(),
            requested = request.number_of_questions,
            "AI returned a different number of questions than requested"
        );
    }

    for (index, question) in output.questions.iter().enumerate() {
        if question.options.len() != OPTION_COUNT {
            warn!(
                question = index + 1,
                options = question.options.len(),
                expected = OPTION_COUNT,
                "question has an unexpected number of options"
            );
        }
    }

    Ok(output)
}
