use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::document::validate_file;
use crate::generator::{GenerateError, GenerationRequest, MAX_QUESTIONS, MIN_QUESTIONS};
use crate::models::{GeneratedQuiz, OPTION_COUNT, QuizState};
use crate::session::{Advance, QuizSession, SessionError};

/// Slider increment on the upload screen.
pub const QUESTION_STEP: usize = 5;

const TOAST_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// A short-lived notification drawn over the current screen.
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

/// Messages from background work back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    Generated {
        session: Uuid,
        result: Result<GeneratedQuiz, GenerateError>,
    },
}

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Generate(GenerationRequest),
}

pub struct App {
    pub session: QuizSession,
    path_input: String,
    question_count: usize,
    option_cursor: usize,
    results_cursor: usize,
    expanded: BTreeSet<usize>,
    toast: Option<Toast>,
    spinner_frame: usize,
}

impl App {
    pub fn new(initial_file: Option<PathBuf>, question_count: usize) -> Self {
        Self {
            session: QuizSession::new(),
            path_input: initial_file
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            question_count: snap_question_count(question_count),
            option_cursor: 0,
            results_cursor: 0,
            expanded: BTreeSet::new(),
            toast: None,
            spinner_frame: 0,
        }
    }

    pub fn state(&self) -> QuizState {
        self.session.state()
    }

    pub fn path_input(&self) -> &str {
        &self.path_input
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn results_cursor(&self) -> usize {
        self.results_cursor
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    pub fn notify(&mut self, title: impl Into<String>, message: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast {
            title: title.into(),
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        });
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    /// Advances animations and expires the toast.
    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.shown_at.elapsed() >= TOAST_DURATION)
        {
            self.toast = None;
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Generated { session, result } => self.on_generation_result(session, result),
        }
    }

    pub fn on_generation_result(
        &mut self,
        session: Uuid,
        result: Result<GeneratedQuiz, GenerateError>,
    ) {
        if session != self.session.id() || self.session.state() != QuizState::Loading {
            debug!(%session, "discarding result for a session that is no longer generating");
            return;
        }

        match result {
            Ok(output) => match self.session.apply_generated(output) {
                Ok(count) => {
                    self.option_cursor = 0;
                    if count < self.session.number_of_questions() {
                        self.notify(
                            "Fewer Questions",
                            format!(
                                "Only {} of {} questions could be generated.",
                                count,
                                self.session.number_of_questions()
                            ),
                            ToastKind::Info,
                        );
                    }
                }
                Err(err) => self.notify("Error Generating Quiz", err.to_string(), ToastKind::Error),
            },
            Err(err) => {
                self.session.fail_generation();
                self.notify("Error Generating Quiz", err.to_string(), ToastKind::Error);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        // Chorded keys are not bindings and must not reach the path input.
        if !KeyModifiers::SHIFT.contains(key.modifiers) {
            return Action::None;
        }

        match self.session.state() {
            QuizState::Idle => self.handle_upload_key(key.code),
            QuizState::Loading => handle_generating_key(key.code),
            QuizState::Active => self.handle_quiz_key(key.code),
            QuizState::Finished => self.handle_results_key(key.code),
        }
    }

    fn handle_upload_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Enter => return self.submit_upload(),
            KeyCode::Char(c) => self.path_input.push(c),
            KeyCode::Backspace => {
                self.path_input.pop();
            }
            KeyCode::Right | KeyCode::Up => self.increase_questions(),
            KeyCode::Left | KeyCode::Down => self.decrease_questions(),
            _ => {}
        }
        Action::None
    }

    fn handle_quiz_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous_option(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next_option(),
            KeyCode::Char(c @ '1'..='5') => self.choose_option(c as usize - '1' as usize),
            KeyCode::Char(c @ 'a'..='e') => self.choose_option(c as usize - 'a' as usize),
            KeyCode::Enter | KeyCode::Char(' ') => self.confirm(),
            KeyCode::Right | KeyCode::Char('n') => self.next_question(),
            KeyCode::Left | KeyCode::Char('p') => self.previous_question(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.start_new_quiz(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Action::Quit,
            _ => {}
        }
        Action::None
    }

    fn handle_results_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.scroll_results_down(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_results_up(),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_result_details(),
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('n') => self.start_new_quiz(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Action::Quit,
            _ => {}
        }
        Action::None
    }

    pub fn increase_questions(&mut self) {
        self.question_count = (self.question_count + QUESTION_STEP).min(MAX_QUESTIONS);
    }

    pub fn decrease_questions(&mut self) {
        self.question_count = self
            .question_count
            .saturating_sub(QUESTION_STEP)
            .max(MIN_QUESTIONS);
    }

    /// Reads the chosen document and starts generation.
    pub fn submit_upload(&mut self) -> Action {
        let path = self.path_input.trim().to_string();
        if path.is_empty() {
            self.notify(
                "No File Selected",
                "Please enter the path of a document to generate a quiz.",
                ToastKind::Error,
            );
            return Action::None;
        }

        let content = match validate_file(&path).and_then(|file| file.read_content()) {
            Ok(content) => content,
            Err(err) => {
                warn!(%path, error = %err, "document rejected");
                self.notify(err.title(), err.to_string(), ToastKind::Error);
                return Action::None;
            }
        };

        info!(%path, questions = self.question_count, "document accepted");
        self.dismiss_toast();
        self.reset_view();
        Action::Generate(self.session.begin_generation(content, self.question_count))
    }

    pub fn select_next_option(&mut self) {
        self.option_cursor = (self.option_cursor + 1) % OPTION_COUNT;
    }

    pub fn select_previous_option(&mut self) {
        self.option_cursor = (self.option_cursor + OPTION_COUNT - 1) % OPTION_COUNT;
    }

    /// Moves the cursor to `index` and selects that option.
    pub fn choose_option(&mut self, index: usize) {
        if index >= OPTION_COUNT || self.session.show_feedback() {
            return;
        }
        self.option_cursor = index;
        if let Some(option) = self.cursor_option() {
            self.session.select_answer(&option);
        }
    }

    /// Submits the option under the cursor, or moves on once answered.
    pub fn confirm(&mut self) {
        if self.session.show_feedback() {
            self.next_question();
            return;
        }
        if let Some(option) = self.cursor_option() {
            self.session.select_answer(&option);
        }
        if let Err(err) = self.session.submit_answer() {
            debug!(error = %err, "answer not submitted");
        }
    }

    pub fn next_question(&mut self) {
        match self.session.next_question() {
            Ok(Advance::Moved(_)) => self.sync_cursor(),
            Ok(Advance::Finished) => {
                self.results_cursor = 0;
                self.expanded.clear();
            }
            Err(SessionError::Unanswered) => self.notify(
                "Answer Required",
                SessionError::Unanswered.to_string(),
                ToastKind::Info,
            ),
            Err(err) => debug!(error = %err, "cannot advance"),
        }
    }

    pub fn previous_question(&mut self) {
        if self.session.previous_question() {
            self.sync_cursor();
        }
    }

    /// Drops the current quiz and returns to the upload screen.
    pub fn start_new_quiz(&mut self) {
        self.session.reset();
        self.reset_view();
    }

    pub fn scroll_results_down(&mut self) {
        let max = self.session.total_questions().saturating_sub(1);
        self.results_cursor = (self.results_cursor + 1).min(max);
    }

    pub fn scroll_results_up(&mut self) {
        self.results_cursor = self.results_cursor.saturating_sub(1);
    }

    pub fn toggle_result_details(&mut self) {
        if !self.expanded.remove(&self.results_cursor) {
            self.expanded.insert(self.results_cursor);
        }
    }

    fn cursor_option(&self) -> Option<String> {
        self.session
            .current_question()
            .and_then(|question| question.options.get(self.option_cursor))
            .cloned()
    }

    fn sync_cursor(&mut self) {
        self.option_cursor = self
            .session
            .selected_answer()
            .zip(self.session.current_question())
            .and_then(|(answer, question)| question.option_index(answer))
            .unwrap_or(0);
    }

    fn reset_view(&mut self) {
        self.option_cursor = 0;
        self.results_cursor = 0;
        self.expanded.clear();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(None, crate::session::DEFAULT_QUESTIONS)
    }
}

fn handle_generating_key(key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

/// Clamps `count` to the slider range and rounds it to the nearest step.
pub fn snap_question_count(count: usize) -> usize {
    let clamped = count.clamp(MIN_QUESTIONS, MAX_QUESTIONS);
    ((clamped + QUESTION_STEP / 2) / QUESTION_STEP * QUESTION_STEP).clamp(MIN_QUESTIONS, MAX_QUESTIONS)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::models::GeneratedQuestion;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_path(app: &mut App, path: &str) {
        for c in path.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn generated(count: usize) -> GeneratedQuiz {
        GeneratedQuiz {
            questions: (0..count)
                .map(|i| GeneratedQuestion {
                    question: format!("Question {}?", i + 1),
                    options: ["a", "b", "c", "d", "e"].map(String::from).to_vec(),
                    correct_answer: "c".to_string(),
                    explanation: "c is right".to_string(),
                })
                .collect(),
        }
    }

    /// An app already showing an active quiz of `count` questions.
    fn active_app(count: usize) -> App {
        let mut app = App::new(None, count);
        app.session.begin_generation("document".to_string(), count);
        let id = app.session.id();
        app.on_generation_result(id, Ok(generated(count)));
        assert_eq!(app.state(), QuizState::Active);
        app
    }

    #[test]
    fn test_snap_question_count() {
        assert_eq!(snap_question_count(0), 5);
        assert_eq!(snap_question_count(7), 5);
        assert_eq!(snap_question_count(8), 10);
        assert_eq!(snap_question_count(25), 25);
        assert_eq!(snap_question_count(500), 50);
    }

    #[test]
    fn test_question_slider_bounds() {
        let mut app = App::new(None, 45);
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.question_count(), 50);
        for _ in 0..20 {
            app.handle_key(key(KeyCode::Left));
        }
        assert_eq!(app.question_count(), 5);
    }

    #[test]
    fn test_submit_without_file_shows_toast() {
        let mut app = App::default();
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Action::None);
        assert_eq!(app.toast().map(|t| t.title.as_str()), Some("No File Selected"));
        assert_eq!(app.state(), QuizState::Idle);
    }

    #[test]
    fn test_submit_with_bad_type_shows_toast() {
        let mut app = App::default();
        type_path(&mut app, "picture.png");
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Action::None);
        assert_eq!(app.toast().map(|t| t.title.as_str()), Some("Invalid File Type"));
    }

    #[test]
    fn test_submit_with_text_file_starts_generation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "The French Revolution began in 1789.").unwrap();

        let mut app = App::new(Some(path), 10);
        let action = app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            action,
            Action::Generate(GenerationRequest::new(
                "The French Revolution began in 1789.",
                10
            ))
        );
        assert_eq!(app.state(), QuizState::Loading);
    }

    #[test]
    fn test_generation_error_returns_to_upload() {
        let mut app = App::default();
        app.session.begin_generation("doc".to_string(), 5);
        let id = app.session.id();
        app.on_generation_result(id, Err(GenerateError::EmptyOutput));
        assert_eq!(app.state(), QuizState::Idle);
        let toast = app.toast().unwrap();
        assert_eq!(toast.title, "Error Generating Quiz");
        assert_eq!(toast.kind, ToastKind::Error);
        assert!(toast.message.contains("Output was null"));
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut app = App::default();
        app.session.begin_generation("doc".to_string(), 5);
        let stale = app.session.id();
        app.start_new_quiz();
        app.session.begin_generation("other doc".to_string(), 5);
        app.on_generation_result(stale, Ok(generated(5)));
        assert_eq!(app.state(), QuizState::Loading);
    }

    #[test]
    fn test_short_reply_notifies() {
        let mut app = App::new(None, 10);
        app.session.begin_generation("doc".to_string(), 10);
        let id = app.session.id();
        app.on_generation_result(id, Ok(generated(6)));
        assert_eq!(app.session.total_questions(), 6);
        assert_eq!(app.toast().map(|t| t.kind), Some(ToastKind::Info));
    }

    #[test]
    fn test_enter_submits_then_advances() {
        let mut app = active_app(5);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.session.show_feedback());
        assert_eq!(app.session.score(), 1);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session.current_question_index(), 1);
        assert_eq!(app.option_cursor(), 0);
        assert!(!app.session.show_feedback());
    }

    #[test]
    fn test_letter_selects_and_next_auto_submits() {
        let mut app = active_app(5);
        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.option_cursor(), 1);
        assert_eq!(app.session.selected_answer(), Some("b"));
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.session.current_question_index(), 1);
        assert_eq!(app.session.questions()[0].is_correct, Some(false));
    }

    #[test]
    fn test_next_without_answer_notifies() {
        let mut app = active_app(5);
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.session.current_question_index(), 0);
        assert_eq!(app.toast().map(|t| t.title.as_str()), Some("Answer Required"));
    }

    #[test]
    fn test_previous_restores_cursor() {
        let mut app = active_app(5);
        app.handle_key(key(KeyCode::Char('4')));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.session.current_question_index(), 0);
        assert_eq!(app.option_cursor(), 3);
        assert!(app.session.show_feedback());
    }

    #[test]
    fn test_full_run_to_results_and_restart() {
        let mut app = active_app(5);
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Char('3')));
            app.handle_key(key(KeyCode::Enter));
            app.handle_key(key(KeyCode::Enter));
        }
        assert_eq!(app.state(), QuizState::Finished);
        assert_eq!(app.session.score(), 5);
        assert_eq!(app.session.score_percentage(), 100);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.is_expanded(1));
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.is_expanded(1));

        for _ in 0..10 {
            app.handle_key(key(KeyCode::Down));
        }
        assert_eq!(app.results_cursor(), 4);

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.state(), QuizState::Idle);
        assert!(app.session.questions().is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::default();
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Action::None);
        assert_eq!(app.path_input(), "q");
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );

        let mut app = active_app(5);
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn test_chorded_keys_are_ignored() {
        let mut app = App::default();
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        app.handle_key(KeyEvent::new(KeyCode::Char('v'), KeyModifiers::CONTROL));
        assert_eq!(app.path_input(), "");

        app.handle_key(KeyEvent::new(KeyCode::Char('N'), KeyModifiers::SHIFT));
        assert_eq!(app.path_input(), "N");
    }

    #[test]
    fn test_toast_expires_on_tick() {
        let mut app = App::default();
        app.notify("Heads Up", "first", ToastKind::Info);
        app.tick();
        assert!(app.toast().is_some());

        if let Some(toast) = app.toast.as_mut() {
            toast.shown_at = Instant::now()
                .checked_sub(TOAST_DURATION + Duration::from_secs(1))
                .unwrap();
        }
        app.tick();
        assert!(app.toast().is_none());
    }

    #[test]
    fn test_new_toast_replaces_previous() {
        let mut app = App::default();
        app.notify("First", "one", ToastKind::Info);
        app.notify("Second", "two", ToastKind::Error);

        let toast = app.toast().unwrap();
        assert_eq!(toast.title, "Second");
        assert_eq!(toast.message, "two");
        assert_eq!(toast.kind, ToastKind::Error);
    }
}
