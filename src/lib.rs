//! # trivia-quiz
//!
//! A terminal trivia quiz. Questions come from the Open Trivia DB, one
//! session at a time: pick category, difficulty and amount on the start
//! screen, answer each question before its 15-second countdown runs out,
//! and try to beat the high score persisted between runs.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trivia_quiz::{Difficulty, HighScoreStore, Quiz, SessionConfig, TriviaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), trivia_quiz::QuizError> {
//!     let quiz = Quiz::new(
//!         SessionConfig::new(9, Difficulty::Easy, 10),
//!         TriviaClient::new(trivia_quiz::DEFAULT_API_URL),
//!         HighScoreStore::new("highscore.json"),
//!     );
//!     quiz.run().await
//! }
//! ```

mod app;
mod data;
mod models;
mod storage;
pub mod terminal;
mod timer;
mod ui;

use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use log::warn;

pub use app::{App, AppState, QUESTION_TIME_SECS, QuestionPhase, StartNotice};
pub use data::{DEFAULT_API_URL, FetchError, TriviaClient, decode_entities};
pub use models::{AnswerOption, CATEGORIES, Category, Difficulty, Question, SessionConfig};
pub use storage::{HIGH_SCORE_KEY, HighScoreStore, StoreError};

use timer::Countdown;

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// IO error from the terminal layer.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
    client: TriviaClient,
    store: HighScoreStore,
}

impl Quiz {
    /// Create a quiz with the given session defaults, question supply, and
    /// high-score store. The stored high score is loaded here so the start
    /// screen can show it; an unreadable store counts as no high score.
    pub fn new(config: SessionConfig, client: TriviaClient, store: HighScoreStore) -> Self {
        let high_score = match store.get(HIGH_SCORE_KEY) {
            Ok(value) => value.unwrap_or(0),
            Err(err) => {
                warn!("could not read high score: {err}");
                0
            }
        };

        Self {
            app: App::new(config, high_score),
            client,
            store,
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app, &self.client, &self.store).await;
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }
}

/// What the input layer asks the event loop to do.
enum Action {
    None,
    Quit,
    BeginSession,
}

enum LoopEvent {
    Key(KeyCode),
    Tick,
    Idle,
    Closed,
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    client: &TriviaClient,
    store: &HighScoreStore,
) -> Result<(), QuizError> {
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match next_event(&mut events, app.countdown_mut()).await? {
            LoopEvent::Key(key) => match handle_input(app, store, key) {
                Action::Quit => break,
                Action::BeginSession => {
                    // One frame of the fetching splash while the request is
                    // in flight; input is not read until it resolves.
                    terminal.draw(|frame| ui::render(frame, app))?;
                    app.begin_session(client).await;
                }
                Action::None => {}
            },
            LoopEvent::Tick => app.handle_tick(),
            LoopEvent::Idle => {}
            LoopEvent::Closed => break,
        }
    }

    Ok(())
}

/// Wait for the next key press or countdown tick, whichever comes first.
async fn next_event(
    events: &mut EventStream,
    countdown: Option<&mut Countdown>,
) -> Result<LoopEvent, QuizError> {
    match countdown {
        Some(countdown) => tokio::select! {
            event = events.next() => map_terminal_event(event),
            tick = countdown.tick() => Ok(match tick {
                Some(()) => LoopEvent::Tick,
                None => LoopEvent::Idle,
            }),
        },
        None => map_terminal_event(events.next().await),
    }
}

fn map_terminal_event(event: Option<io::Result<Event>>) -> Result<LoopEvent, QuizError> {
    match event {
        None => Ok(LoopEvent::Closed),
        Some(Err(err)) => Err(QuizError::Io(err)),
        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => Ok(LoopEvent::Key(key.code)),
        Some(Ok(_)) => Ok(LoopEvent::Idle),
    }
}

fn handle_input(app: &mut App, store: &HighScoreStore, key: KeyCode) -> Action {
    match app.state {
        AppState::Start => handle_start_input(app, key),
        AppState::Fetching => Action::None,
        AppState::Quiz => handle_quiz_input(app, store, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_start_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_field();
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_field();
            Action::None
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.decrease_field();
            Action::None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.increase_field();
            Action::None
        }
        KeyCode::Enter => {
            app.prepare_fetch();
            Action::BeginSession
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

fn handle_quiz_input(app: &mut App, store: &HighScoreStore, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            Action::None
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.can_advance() {
                app.advance(store);
            } else {
                app.record_answer();
            }
            Action::None
        }
        KeyCode::Char('n') if app.can_advance() => {
            app.advance(store);
            Action::None
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
        _ => Action::None,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            Action::None
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}
