/// Which stage the quiz is in. Each stage has its own screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuizState {
    /// Waiting for a document.
    #[default]
    Idle,
    /// Questions are being generated.
    Loading,
    /// Questions are being answered.
    Active,
    /// All questions done, showing results.
    Finished,
}

impl QuizState {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizState::Idle => "idle",
            QuizState::Loading => "loading",
            QuizState::Active => "active",
            QuizState::Finished => "finished",
        }
    }
}

impl std::fmt::Display for QuizState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_log_names() {
        assert_eq!(QuizState::default().to_string(), "idle");
        assert_eq!(QuizState::Loading.to_string(), "loading");
        assert_eq!(QuizState::Finished.as_str(), "finished");
    }
}
