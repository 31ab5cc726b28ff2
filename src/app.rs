//! The quiz session controller.
//!
//! Owns all session state and drives the screen flow: start form, fetch,
//! one question at a time under a countdown, then the result screen. The
//! rendering layer only reads from [`App`]; every mutation happens here in
//! response to a key press, a countdown tick, or the fetch resolving.

use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::data::{FetchError, TriviaClient};
use crate::models::{AnswerOption, Question, SessionConfig};
use crate::storage::{HIGH_SCORE_KEY, HighScoreStore};
use crate::timer::Countdown;

/// Seconds allowed per question.
pub const QUESTION_TIME_SECS: u16 = 15;

/// Rows on the start-screen form: category, difficulty, amount.
pub const FORM_FIELDS: usize = 3;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Start,
    Fetching,
    Quiz,
    Result,
}

/// Why the last fetch left the user on the start screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartNotice {
    FetchFailed,
    NoQuestions,
}

impl StartNotice {
    pub fn message(self) -> &'static str {
        match self {
            StartNotice::FetchFailed => "Failed to fetch questions. Check your connection.",
            StartNotice::NoQuestions => "No questions available. Try different settings.",
        }
    }
}

/// Where the current question is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionPhase {
    /// Options selectable, countdown running.
    Answering,
    /// Answered or timed out; options frozen, advance available.
    Revealed { selected: Option<usize> },
}

pub struct App {
    pub state: AppState,
    pub config: SessionConfig,
    session_id: Uuid,
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    prompt: String,
    options: Vec<AnswerOption>,
    selected: usize,
    phase: QuestionPhase,
    time_remaining: u16,
    countdown: Option<Countdown>,
    notice: Option<StartNotice>,
    form_field: usize,
    high_score: u32,
    new_high_score: bool,
}

impl App {
    pub fn new(config: SessionConfig, high_score: u32) -> Self {
        Self {
            state: AppState::Start,
            config,
            session_id: Uuid::new_v4(),
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            prompt: String::new(),
            options: Vec::new(),
            selected: 0,
            phase: QuestionPhase::Answering,
            time_remaining: QUESTION_TIME_SECS,
            countdown: None,
            notice: None,
            form_field: 0,
            high_score,
            new_high_score: false,
        }
    }

    pub fn notice(&self) -> Option<StartNotice> {
        self.notice
    }

    pub fn form_field(&self) -> usize {
        self.form_field
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// 1-indexed number of the question being shown.
    pub fn current_question_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Share of the session completed before the current question was
    /// loaded: `(k - 1) / total` while viewing question k.
    pub fn progress_ratio(&self) -> f64 {
        if self.questions.is_empty() {
            0.0
        } else {
            self.current_index as f64 / self.questions.len() as f64
        }
    }

    pub fn time_remaining(&self) -> u16 {
        self.time_remaining
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    pub fn selected_option(&self) -> usize {
        self.selected
    }

    pub fn phase(&self) -> QuestionPhase {
        self.phase
    }

    pub fn can_advance(&self) -> bool {
        matches!(self.phase, QuestionPhase::Revealed { .. })
    }

    pub fn score_line(&self) -> String {
        format!("Your Score: {} / {}", self.score, self.questions.len())
    }

    pub fn countdown_mut(&mut self) -> Option<&mut Countdown> {
        self.countdown.as_mut()
    }

    // --- start-screen form ---

    pub fn select_next_field(&mut self) {
        self.form_field = (self.form_field + 1) % FORM_FIELDS;
    }

    pub fn select_previous_field(&mut self) {
        self.form_field = (self.form_field + FORM_FIELDS - 1) % FORM_FIELDS;
    }

    pub fn increase_field(&mut self) {
        match self.form_field {
            0 => self.config.next_category(),
            1 => self.config.difficulty = self.config.difficulty.next(),
            _ => self.config.increase_amount(),
        }
    }

    pub fn decrease_field(&mut self) {
        match self.form_field {
            0 => self.config.previous_category(),
            1 => self.config.difficulty = self.config.difficulty.previous(),
            _ => self.config.decrease_amount(),
        }
    }

    // --- session lifecycle ---

    /// Leave the start screen for the fetching splash. The caller draws one
    /// frame in this state before awaiting [`App::begin_session`].
    pub fn prepare_fetch(&mut self) {
        self.notice = None;
        self.state = AppState::Fetching;
    }

    /// Resolve the pending fetch: either enter the quiz or fall back to the
    /// start screen with a notice. Nothing else is mutated on failure.
    pub async fn begin_session(&mut self, client: &TriviaClient) {
        match client.fetch(&self.config).await {
            Ok(questions) if questions.is_empty() => self.note_empty_result(),
            Ok(questions) => self.start_session(questions),
            Err(err) => self.note_fetch_failure(&err),
        }
    }

    /// Adopt a non-empty question batch and present the first question.
    pub fn start_session(&mut self, questions: Vec<Question>) {
        debug_assert!(!questions.is_empty());
        self.session_id = Uuid::new_v4();
        info!(
            "session {}: starting with {} questions ({}, {})",
            self.session_id,
            questions.len(),
            self.config.category().label,
            self.config.difficulty.query_value(),
        );
        self.questions = questions;
        self.current_index = 0;
        self.score = 0;
        self.new_high_score = false;
        self.notice = None;
        self.state = AppState::Quiz;
        self.present_current_question();
    }

    fn note_empty_result(&mut self) {
        warn!("fetch returned no questions for the chosen filters");
        self.notice = Some(StartNotice::NoQuestions);
        self.state = AppState::Start;
    }

    fn note_fetch_failure(&mut self, err: &FetchError) {
        error!("fetch failed: {err}");
        self.notice = Some(StartNotice::FetchFailed);
        self.state = AppState::Start;
    }

    fn present_current_question(&mut self) {
        let question = &self.questions[self.current_index];
        self.prompt = question.decoded_prompt();
        self.options = question.build_options(&mut rand::rng());
        self.selected = 0;
        self.phase = QuestionPhase::Answering;
        self.time_remaining = QUESTION_TIME_SECS;
        self.countdown = Some(Countdown::start());
    }

    // --- answering ---

    pub fn select_next_option(&mut self) {
        if self.is_answering() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn select_previous_option(&mut self) {
        if self.is_answering() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }

    /// Lock in the highlighted option. A second call for the same question is
    /// a no-op: the phase check makes double scoring impossible.
    pub fn record_answer(&mut self) {
        if !self.is_answering() {
            return;
        }
        self.cancel_countdown();
        if self.options[self.selected].correct {
            self.score += 1;
        }
        self.phase = QuestionPhase::Revealed {
            selected: Some(self.selected),
        };
    }

    /// One second elapsed on the countdown.
    pub fn handle_tick(&mut self) {
        if !self.is_answering() {
            return;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.cancel_countdown();
            self.phase = QuestionPhase::Revealed { selected: None };
        }
    }

    /// Move past a revealed question: next question, or the result screen
    /// after the last one.
    pub fn advance(&mut self, store: &HighScoreStore) {
        if self.state != AppState::Quiz || !self.can_advance() {
            return;
        }
        self.current_index += 1;
        if self.current_index < self.questions.len() {
            self.present_current_question();
        } else {
            self.finish(store);
        }
    }

    fn finish(&mut self, store: &HighScoreStore) {
        self.cancel_countdown();
        self.state = AppState::Result;
        info!("session {}: finished, {}", self.session_id, self.score_line());

        let prior = match store.get(HIGH_SCORE_KEY) {
            Ok(value) => value.unwrap_or(0),
            Err(err) => {
                warn!("could not read high score: {err}");
                0
            }
        };

        let score = self.score as u32;
        if score > prior {
            if let Err(err) = store.set(HIGH_SCORE_KEY, score) {
                warn!("could not persist high score: {err}");
            }
            info!("session {}: new high score {score}", self.session_id);
            self.high_score = score;
            self.new_high_score = true;
        } else {
            self.high_score = prior;
        }
    }

    /// Back to the start screen with config and high score intact. A new
    /// session still has to be begun explicitly.
    pub fn restart(&mut self) {
        if self.state != AppState::Result {
            return;
        }
        self.cancel_countdown();
        self.questions.clear();
        self.options.clear();
        self.prompt.clear();
        self.current_index = 0;
        self.score = 0;
        self.selected = 0;
        self.phase = QuestionPhase::Answering;
        self.time_remaining = QUESTION_TIME_SECS;
        self.new_high_score = false;
        self.state = AppState::Start;
        debug!("session {}: reset", self.session_id);
    }

    fn is_answering(&self) -> bool {
        self.state == AppState::Quiz && self.phase == QuestionPhase::Answering
    }

    fn cancel_countdown(&mut self) {
        // Dropping the handle aborts the task and its channel together.
        self.countdown = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use crate::models::Difficulty;

    fn config() -> SessionConfig {
        SessionConfig::new(9, Difficulty::Easy, 10)
    }

    fn batch(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                question: format!("Question {i}?"),
                correct_answer: "right".to_string(),
                incorrect_answers: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            })
            .collect()
    }

    struct TempStore(HighScoreStore, std::path::PathBuf);

    impl TempStore {
        fn new() -> Self {
            let path = std::env::temp_dir().join(format!("trivia-quiz-app-{}.json", Uuid::new_v4()));
            Self(HighScoreStore::new(path.clone()), path)
        }
    }

    impl Drop for TempStore {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.1);
        }
    }

    fn answer(app: &mut App, correctly: bool) {
        let target = app
            .options()
            .iter()
            .position(|o| o.correct == correctly)
            .unwrap();
        while app.selected_option() != target {
            app.select_next_option();
        }
        app.record_answer();
    }

    fn time_out(app: &mut App) {
        for _ in 0..QUESTION_TIME_SECS {
            app.handle_tick();
        }
    }

    #[tokio::test]
    async fn test_start_session_presents_first_question() {
        let mut app = App::new(config(), 0);
        app.start_session(batch(3));

        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.current_question_number(), 1);
        assert_eq!(app.score(), 0);
        assert_eq!(app.options().len(), 4);
        assert_eq!(app.time_remaining(), QUESTION_TIME_SECS);
        assert!(app.countdown_mut().is_some());
        assert_eq!(app.prompt(), "Question 0?");
    }

    #[test]
    fn test_failed_fetch_stays_idle_without_partial_state() {
        let mut app = App::new(config(), 0);
        app.prepare_fetch();
        app.note_fetch_failure(&FetchError::Status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        ));

        assert_eq!(app.state, AppState::Start);
        assert_eq!(app.notice(), Some(StartNotice::FetchFailed));
        assert_eq!(app.total_questions(), 0);
    }

    #[test]
    fn test_empty_result_is_a_distinct_notice() {
        let mut app = App::new(config(), 0);
        app.prepare_fetch();
        app.note_empty_result();

        assert_eq!(app.state, AppState::Start);
        assert_eq!(app.notice(), Some(StartNotice::NoQuestions));
    }

    #[tokio::test]
    async fn test_correct_answer_increments_score() {
        let mut app = App::new(config(), 0);
        app.start_session(batch(2));

        answer(&mut app, true);
        assert_eq!(app.score(), 1);
        assert!(app.can_advance());
        assert!(app.countdown_mut().is_none());
    }

    #[tokio::test]
    async fn test_second_record_answer_is_a_no_op() {
        let mut app = App::new(config(), 0);
        app.start_session(batch(1));

        answer(&mut app, true);
        assert_eq!(app.score(), 1);

        // Cursor is frozen and a repeated submission must not re-score.
        app.select_next_option();
        app.record_answer();
        assert_eq!(app.score(), 1);
        assert_eq!(app.phase(), QuestionPhase::Revealed { selected: Some(app.selected_option()) });
    }

    #[tokio::test]
    async fn test_timer_expiry_reveals_without_scoring() {
        let mut app = App::new(config(), 0);
        app.start_session(batch(1));

        time_out(&mut app);
        assert_eq!(app.time_remaining(), 0);
        assert_eq!(app.score(), 0);
        assert_eq!(app.phase(), QuestionPhase::Revealed { selected: None });
        assert!(app.can_advance());
        assert!(app.countdown_mut().is_none());

        // Stray ticks after expiry change nothing.
        app.handle_tick();
        assert_eq!(app.time_remaining(), 0);
        assert_eq!(app.score(), 0);
    }

    #[tokio::test]
    async fn test_answer_before_expiry_stops_countdown() {
        let mut app = App::new(config(), 0);
        app.start_session(batch(1));

        app.handle_tick();
        app.handle_tick();
        assert_eq!(app.time_remaining(), QUESTION_TIME_SECS - 2);

        answer(&mut app, false);
        assert_eq!(app.score(), 0);
        assert!(app.countdown_mut().is_none());
    }

    #[tokio::test]
    async fn test_advance_past_last_question_finishes() {
        let store = TempStore::new();
        let mut app = App::new(config(), 0);
        app.start_session(batch(2));

        answer(&mut app, true);
        app.advance(&store.0);
        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.current_question_number(), 2);

        answer(&mut app, true);
        app.advance(&store.0);
        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.score(), 2);
    }

    #[tokio::test]
    async fn test_advance_requires_a_revealed_question() {
        let store = TempStore::new();
        let mut app = App::new(config(), 0);
        app.start_session(batch(2));

        app.advance(&store.0);
        assert_eq!(app.current_question_number(), 1);
    }

    #[tokio::test]
    async fn test_progress_is_fraction_of_questions_already_passed() {
        let store = TempStore::new();
        let mut app = App::new(config(), 0);
        app.start_session(batch(10));

        assert_eq!(app.progress_ratio(), 0.0);

        answer(&mut app, true);
        assert_eq!(app.progress_ratio(), 0.0);

        app.advance(&store.0);
        assert_eq!(app.progress_ratio(), 0.1);
    }

    #[tokio::test]
    async fn test_scenario_seven_correct_two_wrong_one_timeout() {
        let store = TempStore::new();
        let mut app = App::new(config(), 0);
        app.start_session(batch(10));

        for _ in 0..7 {
            answer(&mut app, true);
            app.advance(&store.0);
        }
        for _ in 0..2 {
            answer(&mut app, false);
            app.advance(&store.0);
        }
        time_out(&mut app);
        app.advance(&store.0);

        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.score_line(), "Your Score: 7 / 10");
        assert_eq!(store.0.get(HIGH_SCORE_KEY).unwrap(), Some(7));
    }

    #[tokio::test]
    async fn test_finalize_keeps_higher_prior_score() {
        let store = TempStore::new();
        store.0.set(HIGH_SCORE_KEY, 5).unwrap();

        let mut app = App::new(config(), 5);
        app.start_session(batch(1));
        answer(&mut app, false);
        app.advance(&store.0);

        assert_eq!(app.high_score(), 5);
        assert!(!app.is_new_high_score());
        assert_eq!(store.0.get(HIGH_SCORE_KEY).unwrap(), Some(5));
    }

    #[tokio::test]
    async fn test_first_run_persists_session_score() {
        let store = TempStore::new();
        let mut app = App::new(config(), 0);
        app.start_session(batch(4));

        for _ in 0..4 {
            answer(&mut app, true);
            app.advance(&store.0);
        }

        assert_eq!(app.high_score(), 4);
        assert!(app.is_new_high_score());
        assert_eq!(store.0.get(HIGH_SCORE_KEY).unwrap(), Some(4));
    }

    #[tokio::test]
    async fn test_restart_resets_transient_state_only() {
        let store = TempStore::new();
        let mut app = App::new(config(), 0);
        app.start_session(batch(1));
        answer(&mut app, true);
        app.advance(&store.0);
        assert_eq!(app.state, AppState::Result);

        app.restart();
        assert_eq!(app.state, AppState::Start);
        assert_eq!(app.score(), 0);
        assert_eq!(app.total_questions(), 0);
        assert!(app.countdown_mut().is_none());
        // The persisted high score survives the restart.
        assert_eq!(app.high_score(), 1);
        assert_eq!(store.0.get(HIGH_SCORE_KEY).unwrap(), Some(1));

        app.start_session(batch(3));
        assert_eq!(app.current_question_number(), 1);
        assert_eq!(app.score(), 0);
    }

    #[tokio::test]
    async fn test_score_stays_within_bounds() {
        let store = TempStore::new();
        let mut app = App::new(config(), 0);
        app.start_session(batch(3));

        for _ in 0..3 {
            answer(&mut app, true);
            assert!(app.score() <= app.total_questions());
            app.advance(&store.0);
        }
        assert_eq!(app.score(), 3);
    }
}
