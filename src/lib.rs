//! # geoquiz
//!
//! A terminal geo-economic guessing game: identify the landmark's
//! location, then guess a local price before the clock runs out.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use geoquiz::{Game, GameError, JsonQuestionSource, JsonScoreSink};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), GameError> {
//!     let source = JsonQuestionSource::new("questions.json");
//!     let scores = JsonScoreSink::new("scores.json");
//!
//!     let game = Game::from_source(&source, None, Box::new(scores))?;
//!     game.run().await?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
mod engine;
mod models;
mod scores;
pub mod terminal;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use tokio::time::interval;

pub use app::App;
pub use data::{load_questions_from_json, JsonQuestionSource, LoadError, QuestionSource};
pub use engine::{
    AccuracyBand, Clock, FeedbackEvent, FeedbackSink, GameEngine, Inventory, ManualClock,
    NullFeedback, Outcome, Phase, PowerUp, QuestionKind, Session, SessionOutcome, SessionSummary,
    Submission, SystemClock, TickEvent,
};
pub use models::{PriceChallenge, Question, Screen};
pub use scores::{JsonScoreSink, MemoryScoreSink, ScoreError, ScoreRecord, ScoreSink};

/// Driver tick period; well under the one-second display granularity.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Slider nudge sizes as fractions of the price range.
const FINE_STEP: f64 = 0.01;
const COARSE_STEP: f64 = 0.05;

/// Error type for game operations.
#[derive(Debug)]
pub enum GameError {
    /// Error loading questions from file.
    Load(LoadError),
    /// IO error during game execution.
    Io(io::Error),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::Load(e) => write!(f, "Failed to load questions: {}", e),
            GameError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Load(e) => Some(e),
            GameError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for GameError {
    fn from(err: LoadError) -> Self {
        GameError::Load(err)
    }
}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        GameError::Io(err)
    }
}

/// A game instance that can be run in the terminal.
pub struct Game {
    app: App,
}

impl Game {
    /// Create a game over an already-loaded question set.
    pub fn new(questions: Vec<Question>, scores: Box<dyn ScoreSink>) -> Self {
        Self {
            app: App::new(questions, scores),
        }
    }

    /// Fetch questions from a source, optionally limited to the first
    /// `rounds` of the batch.
    pub fn from_source(
        source: &dyn QuestionSource,
        rounds: Option<usize>,
        scores: Box<dyn ScoreSink>,
    ) -> Result<Self, GameError> {
        let questions = source.fetch(rounds)?;
        Ok(Self::new(questions, scores))
    }

    /// Run the game in the terminal. Takes over the screen and returns
    /// when the player quits.
    pub async fn run(mut self) -> Result<(), GameError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app).await;
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::GameTerminal,
    app: &mut App,
) -> Result<(), GameError> {
    let mut events = EventStream::new();
    let mut ticker = interval(TICK_INTERVAL);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            _ = ticker.tick() => {
                app.on_tick();
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if handle_input(app, key.code) {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(GameError::Io(e)),
                    None => break,
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.screen {
        Screen::Welcome => handle_welcome_input(app, key),
        Screen::Playing => handle_playing_input(app, key),
        Screen::Summary => handle_summary_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_game();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_playing_input(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
        return true;
    }

    match app.engine().phase() {
        Phase::Location => handle_location_input(app, key),
        Phase::Price => handle_price_input(app, key),
        // Transition, result and loading panels take no input.
        _ => {}
    }

    false
}

fn handle_location_input(app: &mut App, key: KeyCode) {
    let engine = app.engine_mut();
    match key {
        KeyCode::Up | KeyCode::Char('k') => engine.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => engine.select_next(),
        KeyCode::Char(c @ '1'..='9') => engine.select(c as usize - '1' as usize),
        KeyCode::Enter | KeyCode::Char(' ') => {
            engine.submit_location();
        }
        KeyCode::Char('e') => {
            engine.use_power_up(PowerUp::ExtraLife);
        }
        KeyCode::Char('s') => {
            engine.use_power_up(PowerUp::Skip);
        }
        KeyCode::Char('f') => {
            engine.use_power_up(PowerUp::TimeFreeze);
        }
        KeyCode::Char('x') => {
            engine.use_power_up(PowerUp::Hint);
        }
        _ => {}
    }
}

fn handle_price_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Left | KeyCode::Char('h') => nudge_guess(app, -FINE_STEP),
        KeyCode::Right | KeyCode::Char('l') => nudge_guess(app, FINE_STEP),
        KeyCode::Up | KeyCode::Char('k') => nudge_guess(app, COARSE_STEP),
        KeyCode::Down | KeyCode::Char('j') => nudge_guess(app, -COARSE_STEP),
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.engine_mut().submit_price();
        }
        KeyCode::Char('e') => {
            app.engine_mut().use_power_up(PowerUp::ExtraLife);
        }
        KeyCode::Char('s') => {
            app.engine_mut().use_power_up(PowerUp::Skip);
        }
        KeyCode::Char('f') => {
            app.engine_mut().use_power_up(PowerUp::TimeFreeze);
        }
        _ => {}
    }
}

/// Nudge the price slider by a fraction of the question's range.
fn nudge_guess(app: &mut App, step: f64) {
    let Some(range) = app
        .engine()
        .current_question()
        .and_then(|q| q.price.as_ref())
        .map(|p| p.max - p.min)
    else {
        return;
    };
    app.engine_mut().adjust_guess(range * step);
}

fn handle_summary_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}
