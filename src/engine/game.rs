//! The game state machine.
//!
//! Drives one session through its questions: location guess, optional
//! price guess, feedback, next question or game over. All mutation
//! happens in response to discrete calls from the driver (submissions,
//! power-up uses, ticks); nothing here blocks or touches the network.

use std::time::Instant;

use crate::models::Question;

use super::clock::{Clock, SystemClock};
use super::feedback::{FeedbackEvent, FeedbackSink, NullFeedback};
use super::powerup::{Inventory, PowerUp};
use super::scoring::{
    location_points, price_points, relative_error, within_tolerance, AccuracyBand, SKIP_POINTS,
};
use super::session::{QuestionKind, Session, SessionSummary};
use super::timer::PhaseTimer;
use super::{FEEDBACK_PAUSE, FREEZE_EXTENSION, LOCATION_PHASE, PRICE_PHASE};

/// Where the machine currently is within a question (or outside one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed but not started.
    Loading,
    /// Multiple-choice location guess.
    Location,
    /// Location solved; brief pause before the price guess.
    Transition,
    /// Numeric price guess on the slider.
    Price,
    /// Question resolved; showing its outcome.
    Result,
    /// Session finished; no further questions are issued.
    GameOver,
}

/// How the current question ended, for the result panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Location right and, if present, price within tolerance.
    Solved { band: Option<AccuracyBand> },
    /// Location right but the price guess was beyond tolerance.
    PriceMissed { band: AccuracyBand },
    /// Wrong twice, or timed out without a selection.
    LocationMissed,
    /// Resolved by the skip power-up.
    Skipped,
}

/// What a submission did. `Rejected` covers every invalid operation:
/// wrong phase, no selection, or a finished session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Submission {
    Rejected,
    LocationCorrect { points: u32, retried: bool },
    LocationRetry,
    LocationMissed,
    PriceScored {
        points: u32,
        band: AccuracyBand,
        within: bool,
    },
}

/// What a tick did, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// The phase timer expired and the current guess was auto-submitted.
    TimedOut,
    /// The transition pause ended; the price phase began.
    PriceStarted,
    /// The result pause ended; the next question began.
    Advanced,
    /// The session ended.
    GameOver,
}

/// Transient per-question state, reset when a new question starts.
#[derive(Debug)]
pub struct QuestionState {
    pub selected: Option<usize>,
    pub retry_used: bool,
    /// Choice indices eliminated by hints.
    pub eliminated: Vec<usize>,
    /// Current slider value for the price phase.
    pub guess: f64,
    pub phase1_points: u32,
    pub phase2_points: u32,
    pub outcome: Option<Outcome>,
    used_powerups: Vec<PowerUp>,
}

impl QuestionState {
    fn for_question(question: &Question) -> Self {
        Self {
            selected: None,
            retry_used: false,
            eliminated: Vec::new(),
            guess: question.price.as_ref().map(|p| p.midpoint()).unwrap_or(0.0),
            phase1_points: 0,
            phase2_points: 0,
            outcome: None,
            used_powerups: Vec::new(),
        }
    }

    fn idle() -> Self {
        Self {
            selected: None,
            retry_used: false,
            eliminated: Vec::new(),
            guess: 0.0,
            phase1_points: 0,
            phase2_points: 0,
            outcome: None,
            used_powerups: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Price,
    NextQuestion,
    GameOver,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    at: Instant,
    step: Step,
}

pub struct GameEngine {
    session: Session,
    inventory: Inventory,
    timer: PhaseTimer,
    phase: Phase,
    qstate: QuestionState,
    pending: Option<Pending>,
    clock: Box<dyn Clock>,
    feedback: Box<dyn FeedbackSink>,
}

impl GameEngine {
    pub fn new(questions: Vec<Question>, inventory: Inventory) -> Self {
        Self::with_parts(
            questions,
            inventory,
            Box::new(SystemClock),
            Box::new(NullFeedback),
        )
    }

    /// Full constructor with injected collaborators.
    pub fn with_parts(
        questions: Vec<Question>,
        inventory: Inventory,
        clock: Box<dyn Clock>,
        feedback: Box<dyn FeedbackSink>,
    ) -> Self {
        Self {
            session: Session::new(questions),
            inventory,
            timer: PhaseTimer::new(),
            phase: Phase::Loading,
            qstate: QuestionState::idle(),
            pending: None,
            clock,
            feedback,
        }
    }

    /// Leave `Loading` and arm the first question's timer.
    pub fn start(&mut self) {
        if self.phase != Phase::Loading {
            return;
        }
        if self.session.is_over() {
            self.phase = Phase::GameOver;
            return;
        }
        self.begin_question();
    }

    // --- accessors -----------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn question_state(&self) -> &QuestionState {
        &self.qstate
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn summary(&self) -> SessionSummary {
        self.session.summary()
    }

    pub fn timer_seconds(&self) -> u64 {
        self.timer.display_seconds(self.clock.now())
    }

    pub fn timer_critical(&self) -> bool {
        self.timer.is_critical(self.clock.now())
    }

    pub fn timer_ratio(&self) -> f64 {
        self.timer.ratio(self.clock.now())
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    // --- selection and slider ------------------------------------------

    /// Cycle the selection forward, skipping eliminated choices.
    pub fn select_next(&mut self) {
        self.cycle_selection(1);
    }

    /// Cycle the selection backward, skipping eliminated choices.
    pub fn select_previous(&mut self) {
        self.cycle_selection(-1);
    }

    fn cycle_selection(&mut self, direction: isize) {
        if self.phase != Phase::Location {
            return;
        }
        let Some(question) = self.session.current_question() else {
            return;
        };
        let n = question.choices.len() as isize;
        let start = match (self.qstate.selected, direction) {
            (Some(current), d) => current as isize + d,
            (None, 1) => 0,
            (None, _) => n - 1,
        };
        for offset in 0..n {
            let idx = (start + direction * offset).rem_euclid(n) as usize;
            if !self.qstate.eliminated.contains(&idx) {
                self.qstate.selected = Some(idx);
                return;
            }
        }
    }

    /// Select a choice directly (1-based keys map to 0-based indices).
    pub fn select(&mut self, index: usize) {
        if self.phase != Phase::Location {
            return;
        }
        let Some(question) = self.session.current_question() else {
            return;
        };
        if index < question.choices.len() && !self.qstate.eliminated.contains(&index) {
            self.qstate.selected = Some(index);
        }
    }

    /// Nudge the price slider, clamped to the question's range.
    pub fn adjust_guess(&mut self, delta: f64) {
        if self.phase != Phase::Price {
            return;
        }
        let Some(price) = self
            .session
            .current_question()
            .and_then(|q| q.price.as_ref())
        else {
            return;
        };
        self.qstate.guess = (self.qstate.guess + delta).clamp(price.min, price.max);
    }

    // --- submissions ---------------------------------------------------

    /// Submit the current location selection. Rejected outside the
    /// location phase or with nothing selected.
    pub fn submit_location(&mut self) -> Submission {
        if self.phase != Phase::Location {
            return Submission::Rejected;
        }
        if self.qstate.selected.is_none() {
            return Submission::Rejected;
        }
        self.resolve_location(self.qstate.selected, false)
    }

    /// Submit the current slider value. Rejected outside the price phase.
    pub fn submit_price(&mut self) -> Submission {
        if self.phase != Phase::Price {
            return Submission::Rejected;
        }
        self.resolve_price()
    }

    fn resolve_location(&mut self, selection: Option<usize>, timed_out: bool) -> Submission {
        let Some(question) = self.session.current_question() else {
            return Submission::Rejected;
        };
        let correct = question.correct_choice;
        let has_price = question.price.is_some();

        match selection {
            Some(picked) if picked == correct => {
                let retried = self.qstate.retry_used;
                let points = location_points(!retried);
                self.qstate.phase1_points = points;
                self.timer.stop();
                self.session.apply_success(QuestionKind::Landmark, points);
                self.feedback.notify(FeedbackEvent::CorrectAnswer);
                if has_price {
                    self.phase = Phase::Transition;
                    self.schedule(Step::Price);
                } else {
                    self.qstate.outcome = Some(Outcome::Solved { band: None });
                    self.finish_question();
                }
                Submission::LocationCorrect { points, retried }
            }
            Some(_) if !self.qstate.retry_used => {
                // One retry per question. A timeout mid-selection still
                // grants it, with the countdown rearmed from the ceiling.
                self.qstate.retry_used = true;
                self.feedback.notify(FeedbackEvent::WrongAnswer);
                if timed_out {
                    self.timer.start(self.clock.now(), LOCATION_PHASE);
                }
                Submission::LocationRetry
            }
            _ => {
                self.timer.stop();
                self.session.apply_failure(QuestionKind::Landmark);
                self.feedback.notify(FeedbackEvent::LifeLost);
                self.qstate.outcome = Some(Outcome::LocationMissed);
                self.finish_question();
                Submission::LocationMissed
            }
        }
    }

    fn resolve_price(&mut self) -> Submission {
        let Some(price) = self
            .session
            .current_question()
            .and_then(|q| q.price.as_ref())
        else {
            return Submission::Rejected;
        };
        let actual = price.actual;
        let guess = self.qstate.guess;

        let rel = relative_error(guess, actual);
        let points = price_points(guess, actual);
        let band = AccuracyBand::for_error(rel);
        let within = within_tolerance(rel);

        self.timer.stop();
        self.qstate.phase2_points = points;
        if within {
            self.session.apply_success(QuestionKind::Price, points);
            self.feedback.notify(FeedbackEvent::CorrectAnswer);
            self.qstate.outcome = Some(Outcome::Solved { band: Some(band) });
        } else {
            self.session.apply_failure(QuestionKind::Price);
            self.session.award(points);
            self.feedback.notify(FeedbackEvent::LifeLost);
            self.qstate.outcome = Some(Outcome::PriceMissed { band });
        }
        self.finish_question();
        Submission::PriceScored {
            points,
            band,
            within,
        }
    }

    // --- power-ups -----------------------------------------------------

    /// Use a power-up. Returns false without consuming inventory when
    /// the effect cannot apply: wrong phase, already used this question
    /// (hints excepted), no decoys left to reveal, or an empty slot.
    pub fn use_power_up(&mut self, kind: PowerUp) -> bool {
        if !matches!(self.phase, Phase::Location | Phase::Price) {
            return false;
        }
        // Hints stack per question until the decoys run out; everything
        // else applies at most once per question.
        if kind != PowerUp::Hint && self.qstate.used_powerups.contains(&kind) {
            return false;
        }
        if !self.applicable(kind) {
            return false;
        }
        if !self.inventory.spend(kind) {
            return false;
        }
        self.qstate.used_powerups.push(kind);
        self.apply_power_up(kind);
        self.feedback.notify(FeedbackEvent::PowerUpUsed(kind));
        true
    }

    fn applicable(&self, kind: PowerUp) -> bool {
        match kind {
            PowerUp::ExtraLife | PowerUp::Skip => true,
            PowerUp::TimeFreeze => self.timer.is_running(),
            PowerUp::Hint => self.phase == Phase::Location && self.hint_target().is_some(),
        }
    }

    /// Lowest-indexed incorrect choice not yet eliminated.
    fn hint_target(&self) -> Option<usize> {
        let question = self.session.current_question()?;
        (0..question.choices.len())
            .find(|&i| i != question.correct_choice && !self.qstate.eliminated.contains(&i))
    }

    fn apply_power_up(&mut self, kind: PowerUp) {
        match kind {
            PowerUp::ExtraLife => self.session.grant_life(),
            PowerUp::Skip => {
                self.timer.stop();
                self.session.award(SKIP_POINTS);
                self.qstate.outcome = Some(Outcome::Skipped);
                self.finish_question();
            }
            PowerUp::TimeFreeze => {
                self.timer.extend(FREEZE_EXTENSION);
            }
            PowerUp::Hint => {
                if let Some(target) = self.hint_target() {
                    self.qstate.eliminated.push(target);
                    if self.qstate.selected == Some(target) {
                        self.qstate.selected = None;
                    }
                }
            }
        }
    }

    // --- time ----------------------------------------------------------

    /// Advance the machine against the clock: auto-submit on timer
    /// expiry, and move past transition/result pauses when they lapse.
    pub fn tick(&mut self) -> Option<TickEvent> {
        let now = self.clock.now();

        if self.timer.poll(now) {
            self.feedback.notify(FeedbackEvent::TimedOut);
            match self.phase {
                Phase::Location => {
                    self.resolve_location(self.qstate.selected, true);
                }
                Phase::Price => {
                    self.resolve_price();
                }
                // A tick landing after the phase already resolved; the
                // poll has disarmed the timer, nothing to do.
                _ => {}
            }
            return Some(TickEvent::TimedOut);
        }

        let fired = match self.pending {
            Some(pending) if now >= pending.at => pending,
            _ => return None,
        };
        self.pending = None;

        match fired.step {
            Step::Price => {
                self.phase = Phase::Price;
                self.timer.start(now, PRICE_PHASE);
                Some(TickEvent::PriceStarted)
            }
            Step::NextQuestion => {
                self.session.advance();
                if self.session.is_over() {
                    self.enter_game_over();
                    Some(TickEvent::GameOver)
                } else {
                    self.begin_question();
                    Some(TickEvent::Advanced)
                }
            }
            Step::GameOver => {
                self.enter_game_over();
                Some(TickEvent::GameOver)
            }
        }
    }

    // --- internals -----------------------------------------------------

    fn begin_question(&mut self) {
        let question = self
            .session
            .current_question()
            .expect("begin_question on exhausted session");
        self.qstate = QuestionState::for_question(question);
        self.phase = Phase::Location;
        self.timer.start(self.clock.now(), LOCATION_PHASE);
    }

    /// Show the result panel, then move on or end the session.
    fn finish_question(&mut self) {
        self.phase = Phase::Result;
        if self.session.health() == 0 {
            self.schedule(Step::GameOver);
        } else {
            self.schedule(Step::NextQuestion);
        }
    }

    fn enter_game_over(&mut self) {
        self.timer.stop();
        self.pending = None;
        self.phase = Phase::GameOver;
        self.feedback.notify(FeedbackEvent::GameOver);
    }

    fn schedule(&mut self, step: Step) {
        self.pending = Some(Pending {
            at: self.clock.now() + FEEDBACK_PAUSE,
            step,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::engine::clock::ManualClock;
    use crate::models::PriceChallenge;

    fn location_question(subject: &str) -> Question {
        Question {
            subject: subject.to_string(),
            category: "landmark".to_string(),
            choices: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_choice: 1,
            price: None,
        }
    }

    fn priced_question(subject: &str) -> Question {
        Question {
            subject: subject.to_string(),
            category: "food".to_string(),
            choices: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_choice: 0,
            price: Some(PriceChallenge {
                item: "espresso".to_string(),
                actual: 10.0,
                min: 5.0,
                max: 20.0,
                unit: "$".to_string(),
            }),
        }
    }

    fn engine_with(
        questions: Vec<Question>,
        inventory: Inventory,
    ) -> (GameEngine, ManualClock) {
        let clock = ManualClock::new();
        let engine = GameEngine::with_parts(
            questions,
            inventory,
            Box::new(clock.clone()),
            Box::new(NullFeedback),
        );
        (engine, clock)
    }

    fn started(questions: Vec<Question>) -> (GameEngine, ManualClock) {
        let (mut engine, clock) = engine_with(questions, Inventory::default_loadout());
        engine.start();
        (engine, clock)
    }

    /// Let a pending transition or result pause lapse.
    fn pass_pause(engine: &mut GameEngine, clock: &ManualClock) -> Option<TickEvent> {
        clock.advance(FEEDBACK_PAUSE + Duration::from_millis(100));
        engine.tick()
    }

    #[derive(Clone, Default)]
    struct RecordingFeedback(Rc<RefCell<Vec<FeedbackEvent>>>);

    impl FeedbackSink for RecordingFeedback {
        fn notify(&mut self, event: FeedbackEvent) {
            self.0.borrow_mut().push(event);
        }
    }

    #[test]
    fn rejects_everything_before_start() {
        let (mut engine, _clock) =
            engine_with(vec![location_question("q1")], Inventory::default_loadout());

        assert_eq!(engine.phase(), Phase::Loading);
        assert_eq!(engine.submit_location(), Submission::Rejected);
        assert_eq!(engine.submit_price(), Submission::Rejected);
        assert!(!engine.use_power_up(PowerUp::Skip));
        assert_eq!(engine.tick(), None);
    }

    #[test]
    fn clears_a_two_question_session() {
        let (mut engine, clock) =
            started(vec![location_question("q1"), priced_question("q2")]);

        // Q1: correct on the first try.
        engine.select(1);
        assert_eq!(
            engine.submit_location(),
            Submission::LocationCorrect {
                points: 100,
                retried: false
            }
        );
        assert_eq!(engine.session().health(), 3);
        assert_eq!(engine.phase(), Phase::Result);
        assert_eq!(engine.tick(), None); // pause not yet over

        assert_eq!(pass_pause(&mut engine, &clock), Some(TickEvent::Advanced));
        assert_eq!(engine.phase(), Phase::Location);

        // Q2: location right, then a 5% price guess.
        engine.select(0);
        assert!(matches!(
            engine.submit_location(),
            Submission::LocationCorrect { points: 100, .. }
        ));
        assert_eq!(engine.phase(), Phase::Transition);
        assert_eq!(pass_pause(&mut engine, &clock), Some(TickEvent::PriceStarted));
        assert_eq!(engine.phase(), Phase::Price);

        engine.adjust_guess(-2.0); // 12.5 -> 10.5
        assert_eq!(
            engine.submit_price(),
            Submission::PriceScored {
                points: 95,
                band: AccuracyBand::Exact,
                within: true
            }
        );
        assert_eq!(engine.session().prices(), (1, 1));
        assert_eq!(engine.session().health(), 3);

        assert_eq!(pass_pause(&mut engine, &clock), Some(TickEvent::GameOver));
        assert!(engine.is_over());
        let summary = engine.summary();
        assert_eq!(summary.outcome, crate::engine::SessionOutcome::Cleared);
        assert_eq!(summary.points, 295);
        assert_eq!(summary.health, 3);
    }

    #[test]
    fn two_misses_cost_a_life_and_score_nothing() {
        let (mut engine, clock) =
            started(vec![location_question("q1"), priced_question("q2")]);

        engine.select(0);
        assert_eq!(engine.submit_location(), Submission::LocationRetry);
        assert_eq!(engine.session().health(), 3); // no loss on the first miss

        engine.select(2);
        assert_eq!(engine.submit_location(), Submission::LocationMissed);
        assert_eq!(engine.session().health(), 2);
        assert_eq!(engine.session().points(), 0);
        assert_eq!(engine.session().landmarks(), (0, 1));

        // The game proceeds to the next question regardless.
        assert_eq!(pass_pause(&mut engine, &clock), Some(TickEvent::Advanced));
        assert_eq!(engine.phase(), Phase::Location);
        assert_eq!(engine.session().cursor(), 1);
    }

    #[test]
    fn retry_is_granted_even_at_one_health() {
        let (mut engine, clock) = started(vec![
            location_question("q1"),
            location_question("q2"),
            location_question("q3"),
        ]);

        for _ in 0..2 {
            engine.select(0);
            engine.submit_location();
            engine.select(0);
            engine.submit_location();
            pass_pause(&mut engine, &clock);
        }
        assert_eq!(engine.session().health(), 1);
        assert_eq!(engine.phase(), Phase::Location);

        engine.select(0);
        assert_eq!(engine.submit_location(), Submission::LocationRetry);
        assert_eq!(engine.session().health(), 1);
    }

    #[test]
    fn timeout_without_selection_skips_the_retry() {
        let (mut engine, clock) = started(vec![location_question("q1")]);

        clock.advance(LOCATION_PHASE);
        assert_eq!(engine.tick(), Some(TickEvent::TimedOut));

        assert_eq!(engine.session().health(), 2);
        assert!(matches!(
            engine.question_state().outcome,
            Some(Outcome::LocationMissed)
        ));
        assert_eq!(engine.phase(), Phase::Result);
    }

    #[test]
    fn timeout_with_first_wrong_selection_still_grants_retry() {
        let (mut engine, clock) = started(vec![location_question("q1")]);

        engine.select(0);
        clock.advance(LOCATION_PHASE);
        assert_eq!(engine.tick(), Some(TickEvent::TimedOut));

        assert_eq!(engine.phase(), Phase::Location);
        assert!(engine.question_state().retry_used);
        assert_eq!(engine.session().health(), 3);
        // Countdown rearmed from the ceiling for the retry.
        assert_eq!(engine.timer_seconds(), LOCATION_PHASE.as_secs());
    }

    #[test]
    fn price_timeout_submits_the_slider_value() {
        let (mut engine, clock) = started(vec![priced_question("q1")]);

        engine.select(0);
        engine.submit_location();
        pass_pause(&mut engine, &clock);
        assert_eq!(engine.phase(), Phase::Price);

        // Slider untouched: the midpoint (12.5 vs 10.0, 25% off) goes in.
        clock.advance(PRICE_PHASE);
        assert_eq!(engine.tick(), Some(TickEvent::TimedOut));

        assert_eq!(engine.question_state().phase2_points, 75);
        assert_eq!(engine.session().prices(), (1, 1)); // boundary is inclusive
        assert_eq!(engine.session().health(), 3);
    }

    #[test]
    fn wide_price_miss_costs_a_life() {
        let (mut engine, clock) = started(vec![priced_question("q1")]);

        engine.select(0);
        engine.submit_location();
        pass_pause(&mut engine, &clock);

        engine.adjust_guess(100.0); // clamped to max = 20.0, 100% off
        assert_eq!(
            engine.submit_price(),
            Submission::PriceScored {
                points: 0,
                band: AccuracyBand::WayOff,
                within: false
            }
        );
        assert_eq!(engine.session().health(), 2);
        assert_eq!(engine.session().prices(), (0, 1));
        assert!(matches!(
            engine.question_state().outcome,
            Some(Outcome::PriceMissed {
                band: AccuracyBand::WayOff
            })
        ));
    }

    #[test]
    fn wrong_phase_submissions_are_rejected() {
        let (mut engine, clock) = started(vec![priced_question("q1")]);

        // Price submission during the location phase.
        assert_eq!(engine.submit_price(), Submission::Rejected);
        // Location submission with nothing selected.
        assert_eq!(engine.submit_location(), Submission::Rejected);

        engine.select(0);
        engine.submit_location();
        // During the transition pause both are rejected.
        assert_eq!(engine.submit_location(), Submission::Rejected);
        assert_eq!(engine.submit_price(), Submission::Rejected);

        pass_pause(&mut engine, &clock);
        assert_eq!(engine.phase(), Phase::Price);
        assert_eq!(engine.submit_location(), Submission::Rejected);
    }

    #[test]
    fn extra_life_never_exceeds_cap() {
        let (mut engine, clock) = started(vec![
            location_question("q1"),
            location_question("q2"),
        ]);

        // Burn a life on q1.
        engine.select(0);
        engine.submit_location();
        engine.select(0);
        engine.submit_location();
        assert_eq!(engine.session().health(), 2);
        pass_pause(&mut engine, &clock);

        assert!(engine.use_power_up(PowerUp::ExtraLife));
        assert_eq!(engine.session().health(), 3);
        // Loadout carries a single extra life.
        assert!(!engine.use_power_up(PowerUp::ExtraLife));
        assert_eq!(engine.session().health(), 3);
    }

    #[test]
    fn extra_life_at_full_health_clamps() {
        let (mut engine, _clock) = started(vec![location_question("q1")]);

        assert!(engine.use_power_up(PowerUp::ExtraLife));
        assert_eq!(engine.session().health(), 3);
        assert_eq!(engine.inventory().count(PowerUp::ExtraLife), 0);
    }

    #[test]
    fn skip_banks_consolation_points_without_counters() {
        let (mut engine, clock) = started(vec![
            location_question("q1"),
            location_question("q2"),
        ]);

        assert!(engine.use_power_up(PowerUp::Skip));
        assert_eq!(engine.phase(), Phase::Result);
        assert_eq!(engine.session().points(), SKIP_POINTS);
        assert_eq!(engine.session().landmarks(), (0, 0));
        assert_eq!(engine.session().health(), 3);
        assert!(matches!(
            engine.question_state().outcome,
            Some(Outcome::Skipped)
        ));

        assert_eq!(pass_pause(&mut engine, &clock), Some(TickEvent::Advanced));
        assert_eq!(engine.session().cursor(), 1);
    }

    #[test]
    fn freeze_extends_only_a_running_timer() {
        let (mut engine, clock) = started(vec![location_question("q1")]);

        clock.advance(Duration::from_secs(10));
        assert!(engine.use_power_up(PowerUp::TimeFreeze));
        // 20 s were left; the freeze adds 10 more.
        assert_eq!(engine.timer_seconds(), 30);
    }

    #[test]
    fn freeze_is_rejected_when_no_timer_runs() {
        let (mut engine, _clock) = started(vec![location_question("q1")]);

        engine.select(1);
        engine.submit_location();
        assert_eq!(engine.phase(), Phase::Result);

        assert!(!engine.use_power_up(PowerUp::TimeFreeze));
        assert_eq!(engine.inventory().count(PowerUp::TimeFreeze), 1);
    }

    #[test]
    fn hint_eliminates_one_decoy_at_a_time() {
        let (mut engine, _clock) = started(vec![location_question("q1")]);

        engine.select(0);
        assert!(engine.use_power_up(PowerUp::Hint));
        // The eliminated choice was selected; the selection is cleared.
        assert_eq!(engine.question_state().eliminated, vec![0]);
        assert_eq!(engine.question_state().selected, None);

        assert!(engine.use_power_up(PowerUp::Hint));
        assert_eq!(engine.question_state().eliminated, vec![0, 2]);

        // Loadout exhausted; the last decoy stays on the board.
        assert!(!engine.use_power_up(PowerUp::Hint));

        // Cycling skips the eliminated choices.
        engine.select_next();
        assert_eq!(engine.question_state().selected, Some(1));
        engine.select_next();
        assert_eq!(engine.question_state().selected, Some(3));
    }

    #[test]
    fn hint_is_rejected_on_the_price_phase() {
        let (mut engine, clock) = started(vec![priced_question("q1")]);

        engine.select(0);
        engine.submit_location();
        pass_pause(&mut engine, &clock);
        assert_eq!(engine.phase(), Phase::Price);

        assert!(!engine.use_power_up(PowerUp::Hint));
        assert_eq!(engine.inventory().count(PowerUp::Hint), 2);
    }

    #[test]
    fn empty_inventory_use_is_rejected() {
        let (mut engine, _clock) =
            engine_with(vec![location_question("q1")], Inventory::new(0, 0, 0, 0));
        engine.start();

        for kind in PowerUp::ALL {
            assert!(!engine.use_power_up(kind));
        }
        assert_eq!(engine.session().health(), 3);
        assert_eq!(engine.session().points(), 0);
        assert_eq!(engine.phase(), Phase::Location);
    }

    #[test]
    fn non_hint_powerups_apply_once_per_question() {
        let (mut engine, clock) = engine_with(
            vec![location_question("q1"), location_question("q2")],
            Inventory::new(0, 0, 2, 0),
        );
        engine.start();

        assert!(engine.use_power_up(PowerUp::TimeFreeze));
        assert!(!engine.use_power_up(PowerUp::TimeFreeze));
        assert_eq!(engine.inventory().count(PowerUp::TimeFreeze), 1);

        engine.select(1);
        engine.submit_location();
        pass_pause(&mut engine, &clock);

        // Fresh question, fresh allowance.
        assert!(engine.use_power_up(PowerUp::TimeFreeze));
    }

    #[test]
    fn death_ends_the_session_after_the_pause() {
        let (mut engine, clock) = started(vec![
            location_question("q1"),
            location_question("q2"),
            location_question("q3"),
            location_question("q4"),
            location_question("q5"),
        ]);

        for _ in 0..3 {
            engine.select(0);
            engine.submit_location();
            engine.select(0);
            engine.submit_location();
            if engine.session().health() > 0 {
                pass_pause(&mut engine, &clock);
            }
        }
        assert_eq!(engine.session().health(), 0);
        assert_eq!(engine.phase(), Phase::Result);

        assert_eq!(engine.tick(), None); // still inside the pause
        assert_eq!(pass_pause(&mut engine, &clock), Some(TickEvent::GameOver));
        assert!(engine.is_over());

        // No further questions, no further attempts counted.
        assert_eq!(engine.submit_location(), Submission::Rejected);
        assert!(!engine.use_power_up(PowerUp::ExtraLife));
        let summary = engine.summary();
        assert_eq!(summary.outcome, crate::engine::SessionOutcome::OutOfLives);
        assert_eq!(summary.questions_played, 2);
        assert_eq!(summary.landmarks_attempted, 3);
    }

    #[test]
    fn stale_tick_after_resolution_is_harmless() {
        let (mut engine, clock) = started(vec![priced_question("q1")]);

        engine.select(0);
        engine.submit_location(); // stops the location timer

        // Well past the old location deadline; the only thing the tick
        // may do is fire the transition pause.
        clock.advance(Duration::from_secs(40));
        assert_eq!(engine.tick(), Some(TickEvent::PriceStarted));
        assert_eq!(engine.phase(), Phase::Price);
        assert_eq!(engine.timer_seconds(), PRICE_PHASE.as_secs());
    }

    #[test]
    fn feedback_sink_hears_key_transitions() {
        let feedback = RecordingFeedback::default();
        let clock = ManualClock::new();
        let mut engine = GameEngine::with_parts(
            vec![location_question("q1")],
            Inventory::default_loadout(),
            Box::new(clock.clone()),
            Box::new(feedback.clone()),
        );
        engine.start();

        engine.select(1);
        engine.submit_location();
        pass_pause(&mut engine, &clock);

        let events = feedback.0.borrow();
        assert!(events.contains(&FeedbackEvent::CorrectAnswer));
        assert!(events.contains(&FeedbackEvent::GameOver));
    }
}
