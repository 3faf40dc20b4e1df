//! Command line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::QuizError;
use crate::app::snap_question_count;
use crate::generator::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, GeneratorConfig};
use crate::session::DEFAULT_QUESTIONS;

#[derive(Parser, Debug, Clone)]
#[command(name = "doc-quiz", version, about = "Turn a document into a multiple-choice quiz", long_about = None)]
pub struct Cli {
    /// Document to preselect on the upload screen
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Number of questions to generate (5-50, in steps of 5)
    #[arg(short, long, default_value_t = DEFAULT_QUESTIONS)]
    pub questions: usize,

    /// API key for the AI service
    #[arg(long, env = "DOC_QUIZ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "DOC_QUIZ_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model used to generate questions
    #[arg(long, env = "DOC_QUIZ_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Request timeout in seconds
    #[arg(long, env = "DOC_QUIZ_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// File that receives the application log
    #[arg(long, default_value = "doc-quiz.log")]
    pub log_file: PathBuf,
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub generator: GeneratorConfig,
    pub initial_file: Option<PathBuf>,
    pub question_count: usize,
    pub log_file: PathBuf,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self, QuizError> {
        let base_url = cli.base_url.trim().to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(QuizError::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                base_url
            )));
        }
        if cli.timeout_secs == 0 {
            return Err(QuizError::Config("timeout must be at least one second".to_string()));
        }

        let api_key = cli.api_key.filter(|key| !key.trim().is_empty());

        Ok(Self {
            generator: GeneratorConfig {
                base_url,
                api_key,
                model: cli.model,
                timeout: Duration::from_secs(cli.timeout_secs),
            },
            initial_file: cli.file,
            question_count: snap_question_count(cli.questions),
            log_file: cli.log_file,
        })
    }
}
