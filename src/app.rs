use crate::engine::{GameEngine, Inventory};
use crate::models::{Question, Screen};
use crate::scores::{ScoreRecord, ScoreSink};

/// Number of best scores shown on the summary screen.
const LEADERBOARD_SIZE: usize = 5;

/// Terminal-side application state: which screen is up, the running
/// engine, and the score sink fed when a session finishes.
pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    engine: GameEngine,
    questions: Vec<Question>,
    scores: Box<dyn ScoreSink>,
    best: Vec<ScoreRecord>,
    score_error: Option<String>,
    submitted: bool,
}

impl App {
    pub fn new(questions: Vec<Question>, scores: Box<dyn ScoreSink>) -> Self {
        let engine = GameEngine::new(questions.clone(), Inventory::default_loadout());
        Self {
            screen: Screen::Welcome,
            should_quit: false,
            engine,
            questions,
            scores,
            best: Vec::new(),
            score_error: None,
            submitted: false,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    pub fn best_scores(&self) -> &[ScoreRecord] {
        &self.best
    }

    pub fn score_error(&self) -> Option<&str> {
        self.score_error.as_deref()
    }

    pub fn start_game(&mut self) {
        self.screen = Screen::Playing;
        self.engine.start();
    }

    /// Periodic driver tick: advance the engine and, once the session
    /// ends, record it and switch to the summary screen.
    pub fn on_tick(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        self.engine.tick();
        if self.engine.is_over() {
            self.finish();
        }
    }

    fn finish(&mut self) {
        if !self.submitted {
            let summary = self.engine.summary();
            self.score_error = self.scores.submit(&summary).err().map(|e| e.to_string());
            self.submitted = true;
        }
        self.best = self.scores.best(LEADERBOARD_SIZE);
        self.screen = Screen::Summary;
    }

    /// Fresh session over the same question set.
    pub fn restart(&mut self) {
        self.engine = GameEngine::new(self.questions.clone(), Inventory::default_loadout());
        self.submitted = false;
        self.score_error = None;
        self.screen = Screen::Playing;
        self.engine.start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::MemoryScoreSink;

    // An empty question set makes the engine finish immediately, which
    // is all these tests need.
    fn finished_app() -> App {
        let mut app = App::new(Vec::new(), Box::new(MemoryScoreSink::default()));
        app.start_game();
        app
    }

    #[test]
    fn finished_session_is_submitted_once() {
        let mut app = finished_app();

        app.on_tick();
        assert_eq!(app.screen, Screen::Summary);
        assert_eq!(app.best_scores().len(), 1);

        app.on_tick();
        app.on_tick();
        assert_eq!(app.best_scores().len(), 1);
        assert!(app.score_error().is_none());
    }

    #[test]
    fn restart_resubmits_on_next_finish() {
        let mut app = finished_app();
        app.on_tick();
        assert_eq!(app.best_scores().len(), 1);

        app.restart();
        assert_eq!(app.screen, Screen::Playing);
        app.on_tick();
        assert_eq!(app.screen, Screen::Summary);
        assert_eq!(app.best_scores().len(), 2);
    }
}
