//! Fire-and-forget feedback notifications (the haptics/sound seam).
//!
//! The engine reports key transitions; implementations may beep, buzz
//! or ignore them. Nothing here affects game state.

use super::PowerUp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackEvent {
    CorrectAnswer,
    WrongAnswer,
    TimedOut,
    PowerUpUsed(PowerUp),
    LifeLost,
    GameOver,
}

pub trait FeedbackSink {
    fn notify(&mut self, event: FeedbackEvent);
}

/// Default sink: swallows everything.
#[derive(Debug, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn notify(&mut self, _event: FeedbackEvent) {}
}
