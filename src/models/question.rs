use serde::{Deserialize, Serialize};

/// Every question is presented with exactly this many options.
pub const OPTION_COUNT: usize = 5;

/// Filler for option lists the AI returned short.
pub const OPTION_PLACEHOLDER: &str = "AI_Option_Placeholder";

/// A question as the AI returns it, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// Full AI response payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuiz {
    #[serde(default)]
    pub questions: Vec<GeneratedQuestion>,
}

/// A normalized question plus the user's answer to it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: [String; OPTION_COUNT],
    pub correct_answer: String,
    pub explanation: String,
    pub user_answer: Option<String>,
    pub is_correct: Option<bool>,
}

impl Question {
    /// Position of `answer` among the options.
    pub fn option_index(&self, answer: &str) -> Option<usize> {
        self.options.iter().position(|option| option == answer)
    }

    pub fn correct_index(&self) -> Option<usize> {
        self.option_index(&self.correct_answer)
    }

    pub fn is_answered(&self) -> bool {
        self.user_answer.is_some()
    }

    /// Records `answer` and returns whether it matches the correct answer.
    pub fn record_answer(&mut self, answer: &str) -> bool {
        let is_correct = answer == self.correct_answer;
        self.user_answer = Some(answer.to_string());
        self.is_correct = Some(is_correct);
        is_correct
    }
}
