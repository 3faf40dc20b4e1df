//! # doc-quiz
//!
//! Turn a document into a multiple-choice quiz and take it in the terminal.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use doc_quiz::{Quiz, QuizError};
//! use doc_quiz::config::{Cli, Settings};
//! use clap::Parser;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let settings = Settings::from_cli(Cli::parse())?;
//!
//!     // Upload a document, generate questions, answer them
//!     Quiz::new(&settings)?.run().await
//! }
//! ```

mod app;
pub mod config;
pub mod document;
pub mod generator;
pub mod logging;
mod models;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

pub use app::{Action, App, AppEvent, Toast, ToastKind};
pub use generator::{
    ChatCompletionsGenerator, GenerateError, GenerationRequest, QuestionGenerator,
    generate_quiz_questions,
};
pub use models::{GeneratedQuestion, GeneratedQuiz, OPTION_COUNT, OPTION_PLACEHOLDER, Question, QuizState};

const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The AI client could not be set up.
    #[error("Failed to set up question generation: {0}")]
    Generate(#[from] GenerateError),
    /// Invalid command line or environment settings.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// The log subscriber could not be installed.
    #[error("Failed to initialise logging: {0}")]
    Logging(String),
    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz application ready to take over the terminal.
pub struct Quiz {
    app: App,
    generator: Arc<dyn QuestionGenerator>,
}

impl Quiz {
    /// Create a quiz that generates questions through the configured AI service.
    pub fn new(settings: &config::Settings) -> Result<Self, QuizError> {
        let generator = ChatCompletionsGenerator::new(settings.generator.clone())?;
        Ok(Self::with_generator(settings, Arc::new(generator)))
    }

    /// Create a quiz backed by a custom question generator.
    pub fn with_generator(settings: &config::Settings, generator: Arc<dyn QuestionGenerator>) -> Self {
        Self {
            app: App::new(settings.initial_file.clone(), settings.question_count),
            generator,
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        info!(session = %self.app.session.id(), "starting quiz UI");
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app, &self.generator).await;
        terminal::restore()?;
        result
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    generator: &Arc<dyn QuestionGenerator>,
) -> Result<(), QuizError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            _ = ticker.tick() => app.tick(),
            Some(event) = rx.recv() => app.handle_event(event),
            input = events.next() => match input {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match app.handle_key(key) {
                        Action::Quit => break,
                        Action::Generate(request) => {
                            spawn_generation(generator, request, app.session.id(), tx.clone())
                        }
                        Action::None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
        }
    }

    Ok(())
}

/// Runs one generation call in the background and reports the outcome.
fn spawn_generation(
    generator: &Arc<dyn QuestionGenerator>,
    request: GenerationRequest,
    session: Uuid,
    tx: mpsc::UnboundedSender<AppEvent>,
) {
    let generator = Arc::clone(generator);
    tokio::spawn(async move {
        let result = generate_quiz_questions(generator.as_ref(), &request).await;
        if let Err(err) = &result {
            error!(%session, error = %err, "quiz generation failed");
        }
        // The receiver is gone only when the UI has exited.
        let _ = tx.send(AppEvent::Generated { session, result });
    });
}
