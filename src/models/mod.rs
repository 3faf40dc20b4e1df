mod question;
mod state;

pub use question::{GeneratedQuestion, GeneratedQuiz, OPTION_COUNT, OPTION_PLACEHOLDER, Question};
pub use state::QuizState;
