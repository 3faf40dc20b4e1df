use clap::Parser;
use doc_quiz::config::{Cli, Settings};
use doc_quiz::{Quiz, QuizError, logging};
use tracing::info;

#[tokio::main]
async fn main() {
    // Values from .env act as environment defaults for the CLI
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), QuizError> {
    let settings = Settings::from_cli(cli)?;
    logging::init(&settings.log_file)?;
    info!(
        model = %settings.generator.model,
        base_url = %settings.generator.base_url,
        questions = settings.question_count,
        "doc-quiz starting"
    );

    Quiz::new(&settings)?.run().await
}
