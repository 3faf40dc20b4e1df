//! Log setup. The terminal belongs to the UI, so logs go to a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::QuizError;

const DEFAULT_FILTER: &str = "doc_quiz=info";

/// Installs the global subscriber, appending to `path`.
///
/// `RUST_LOG` overrides the default `doc_quiz=info` filter.
pub fn init(path: &Path) -> Result<(), QuizError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| QuizError::Logging(err.to_string()))
}
