//! Quiz session state.
//!
//! One [`QuizSession`] holds everything the screens share: the document,
//! the generated questions, the answers given so far and the score.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::generator::{GenerationRequest, normalize_questions};
use crate::models::{GeneratedQuiz, Question, QuizState};

pub const DEFAULT_QUESTIONS: usize = 25;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No quiz is being generated.")]
    NotGenerating,
    #[error("AI generated no usable questions.")]
    NoQuestions,
    #[error("No quiz is in progress.")]
    NotActive,
    #[error("Select an answer first.")]
    NoSelection,
    #[error("This question has already been answered.")]
    AlreadyAnswered,
    #[error("Answer the current question before moving on.")]
    Unanswered,
}

/// Outcome of [`QuizSession::next_question`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at this index.
    Moved(usize),
    /// That was the last question.
    Finished,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    state: QuizState,
    document_content: Option<String>,
    number_of_questions: usize,
    questions: Vec<Question>,
    user_answers: BTreeMap<usize, String>,
    current_question_index: usize,
    score: usize,
    selected_answer: Option<String>,
    show_feedback: bool,
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: QuizState::Idle,
            document_content: None,
            number_of_questions: DEFAULT_QUESTIONS,
            questions: Vec::new(),
            user_answers: BTreeMap::new(),
            current_question_index: 0,
            score: 0,
            selected_answer: None,
            show_feedback: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn document_content(&self) -> Option<&str> {
        self.document_content.as_deref()
    }

    pub fn number_of_questions(&self) -> usize {
        self.number_of_questions
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn user_answers(&self) -> &BTreeMap<usize, String> {
        &self.user_answers
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    pub fn show_feedback(&self) -> bool {
        self.show_feedback
    }

    pub fn is_last_question(&self) -> bool {
        self.current_question_index + 1 >= self.questions.len()
    }

    /// Share of the quiz reached, counting the current question.
    pub fn progress_percentage(&self) -> f64 {
        if self.questions.is_empty() {
            0.0
        } else {
            (self.current_question_number() * 100) as f64 / self.questions.len() as f64
        }
    }

    /// Score as a rounded percentage of all questions.
    pub fn score_percentage(&self) -> u32 {
        if self.questions.is_empty() {
            0
        } else {
            ((self.score * 100) as f64 / self.questions.len() as f64).round() as u32
        }
    }

    /// Back to a blank, idle session.
    pub fn reset(&mut self) {
        debug!(session = %self.id, "resetting quiz session");
        *self = Self::new();
    }

    /// Starts a fresh quiz for `content` and returns the request to send.
    pub fn begin_generation(
        &mut self,
        content: String,
        number_of_questions: usize,
    ) -> GenerationRequest {
        self.reset();
        self.document_content = Some(content.clone());
        self.number_of_questions = number_of_questions;
        self.transition(QuizState::Loading);
        info!(session = %self.id, number_of_questions, "quiz generation started");
        GenerationRequest::new(content, number_of_questions)
    }

    /// Installs the AI reply and starts the quiz.
    ///
    /// A reply that yields no questions puts the session back to idle.
    pub fn apply_generated(&mut self, output: GeneratedQuiz) -> Result<usize, SessionError> {
        if self.state != QuizState::Loading {
            return Err(SessionError::NotGenerating);
        }

        let questions = normalize_questions(output, self.number_of_questions);
        if questions.is_empty() {
            warn!(session = %self.id, "AI reply contained no questions");
            self.fail_generation();
            return Err(SessionError::NoQuestions);
        }

        let count = questions.len();
        self.questions = questions;
        self.user_answers.clear();
        self.current_question_index = 0;
        self.score = 0;
        self.selected_answer = None;
        self.show_feedback = false;
        self.transition(QuizState::Active);
        info!(session = %self.id, questions = count, "quiz is active");
        Ok(count)
    }

    /// Abandons a generation in progress.
    pub fn fail_generation(&mut self) {
        if self.state != QuizState::Loading {
            return;
        }
        self.document_content = None;
        self.questions.clear();
        self.transition(QuizState::Idle);
    }

    /// Picks `answer` for the current question. Returns false when the
    /// choice is locked or not one of the options.
    pub fn select_answer(&mut self, answer: &str) -> bool {
        if self.state != QuizState::Active || self.show_feedback {
            return false;
        }
        let Some(question) = self.current_question() else {
            return false;
        };
        if question.option_index(answer).is_none() {
            return false;
        }
        self.selected_answer = Some(answer.to_string());
        true
    }

    /// Locks in the selected answer. Returns whether it was correct.
    pub fn submit_answer(&mut self) -> Result<bool, SessionError> {
        if self.state != QuizState::Active {
            return Err(SessionError::NotActive);
        }
        if self.show_feedback {
            return Err(SessionError::AlreadyAnswered);
        }
        let answer = self.selected_answer.clone().ok_or(SessionError::NoSelection)?;
        let index = self.current_question_index;
        let question = self
            .questions
            .get_mut(index)
            .ok_or(SessionError::NotActive)?;

        let is_correct = question.record_answer(&answer);
        self.user_answers.insert(index, answer);
        self.show_feedback = true;
        if is_correct {
            self.score += 1;
        }

        debug!(session = %self.id, question = index + 1, is_correct, "answer submitted");
        Ok(is_correct)
    }

    /// Moves to the next question, submitting a pending selection first.
    pub fn next_question(&mut self) -> Result<Advance, SessionError> {
        if self.state != QuizState::Active {
            return Err(SessionError::NotActive);
        }
        if !self.show_feedback && self.selected_answer.is_some() {
            self.submit_answer()?;
        }
        if !self.current_question().is_some_and(Question::is_answered) {
            return Err(SessionError::Unanswered);
        }

        if self.is_last_question() {
            self.transition(QuizState::Finished);
            info!(
                session = %self.id,
                score = self.score,
                total = self.questions.len(),
                "quiz finished"
            );
            return Ok(Advance::Finished);
        }

        self.current_question_index += 1;
        self.restore_answer_state();
        Ok(Advance::Moved(self.current_question_index))
    }

    /// Steps back for review. Returns false on the first question.
    pub fn previous_question(&mut self) -> bool {
        if self.state != QuizState::Active || self.current_question_index == 0 {
            return false;
        }
        self.current_question_index -= 1;
        self.restore_answer_state();
        true
    }

    fn transition(&mut self, next: QuizState) {
        debug!(session = %self.id, from = %self.state, to = %next, "quiz state changed");
        self.state = next;
    }

    fn restore_answer_state(&mut self) {
        self.selected_answer = self.user_answers.get(&self.current_question_index).cloned();
        self.show_feedback = self.selected_answer.is_some();
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}
