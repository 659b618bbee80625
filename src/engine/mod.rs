//! Game core: session bookkeeping, scoring, the phase timer, power-ups
//! and the state machine that ties them together.
//!
//! Everything in here is synchronous and UI-agnostic; the terminal
//! front end drives it through discrete calls (`submit_*`, `tick`) and
//! reads state back for rendering.

mod clock;
mod feedback;
mod game;
mod powerup;
mod scoring;
mod session;
mod timer;

use std::time::Duration;

pub use clock::{Clock, ManualClock, SystemClock};
pub use feedback::{FeedbackEvent, FeedbackSink, NullFeedback};
pub use game::{GameEngine, Outcome, Phase, QuestionState, Submission, TickEvent};
pub use powerup::{Inventory, PowerUp};
pub use scoring::{
    location_points, price_points, relative_error, within_tolerance, AccuracyBand,
    LOCATION_POINTS, LOCATION_RETRY_POINTS, PRICE_MAX_POINTS, SKIP_POINTS,
};
pub use session::{QuestionKind, Session, SessionOutcome, SessionSummary};

/// Lives at session start; also the cap for the extra-life power-up.
pub const MAX_HEALTH: u8 = 3;

/// Countdown ceiling for the location (multiple choice) phase.
pub const LOCATION_PHASE: Duration = Duration::from_secs(30);

/// Countdown ceiling for the price (slider) phase.
pub const PRICE_PHASE: Duration = Duration::from_secs(20);

/// Remaining time at or below which the timer counts as critical.
pub const CRITICAL_THRESHOLD: Duration = Duration::from_secs(5);

/// How long transition and result panels stay up before auto-advancing.
pub const FEEDBACK_PAUSE: Duration = Duration::from_millis(1800);

/// Seconds added to a running timer by the time-freeze power-up.
pub const FREEZE_EXTENSION: Duration = Duration::from_secs(10);
