//! Session bookkeeping: question cursor, health, points and accuracy
//! counters. Mutated only by the state machine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Question;

use super::MAX_HEALTH;

/// Which half of a question a result belongs to, for the per-kind
/// accuracy counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Landmark,
    Price,
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Every question was played.
    Cleared,
    /// Health reached zero first.
    OutOfLives,
}

pub struct Session {
    id: Uuid,
    questions: Vec<Question>,
    cursor: usize,
    health: u8,
    points: u32,
    landmarks_correct: u32,
    landmarks_attempted: u32,
    prices_correct: u32,
    prices_attempted: u32,
}

impl Session {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            id: Uuid::new_v4(),
            questions,
            cursor: 0,
            health: MAX_HEALTH,
            points: 0,
            landmarks_correct: 0,
            landmarks_attempted: 0,
            prices_correct: 0,
            prices_attempted: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    /// The session is over exactly when health is spent or the cursor
    /// has run past the question list. Derived, never stored.
    pub fn is_over(&self) -> bool {
        self.health == 0 || self.cursor >= self.questions.len()
    }

    /// Move to the next question. Must not be called on a session that
    /// is already over.
    pub fn advance(&mut self) {
        debug_assert!(!self.is_over(), "advance called on a finished session");
        self.cursor += 1;
    }

    /// Record a terminal miss for `kind`: one life lost, one attempt.
    pub fn apply_failure(&mut self, kind: QuestionKind) {
        self.health = self.health.saturating_sub(1);
        match kind {
            QuestionKind::Landmark => self.landmarks_attempted += 1,
            QuestionKind::Price => self.prices_attempted += 1,
        }
    }

    /// Record a correct answer for `kind` and bank the points.
    pub fn apply_success(&mut self, kind: QuestionKind, points: u32) {
        match kind {
            QuestionKind::Landmark => {
                self.landmarks_correct += 1;
                self.landmarks_attempted += 1;
            }
            QuestionKind::Price => {
                self.prices_correct += 1;
                self.prices_attempted += 1;
            }
        }
        self.points += points;
    }

    /// Bank points without touching the accuracy counters (skip).
    pub fn award(&mut self, points: u32) {
        self.points += points;
    }

    /// One life back, capped at the maximum.
    pub fn grant_life(&mut self) {
        self.health = (self.health + 1).min(MAX_HEALTH);
    }

    pub fn landmarks(&self) -> (u32, u32) {
        (self.landmarks_correct, self.landmarks_attempted)
    }

    pub fn prices(&self) -> (u32, u32) {
        (self.prices_correct, self.prices_attempted)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            points: self.points,
            landmarks_correct: self.landmarks_correct,
            landmarks_attempted: self.landmarks_attempted,
            prices_correct: self.prices_correct,
            prices_attempted: self.prices_attempted,
            health: self.health,
            questions_played: self.cursor.min(self.questions.len()),
            outcome: if self.health == 0 {
                SessionOutcome::OutOfLives
            } else {
                SessionOutcome::Cleared
            },
        }
    }
}

/// Immutable record of a finished session, handed to the score sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub points: u32,
    pub landmarks_correct: u32,
    pub landmarks_attempted: u32,
    pub prices_correct: u32,
    pub prices_attempted: u32,
    pub health: u8,
    pub questions_played: usize,
    pub outcome: SessionOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;

    fn question(subject: &str) -> Question {
        Question {
            subject: subject.to_string(),
            category: "test".to_string(),
            choices: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_choice: 1,
            price: None,
        }
    }

    fn session(n: usize) -> Session {
        Session::new((0..n).map(|i| question(&format!("q{}", i))).collect())
    }

    #[test]
    fn health_never_leaves_bounds() {
        let mut s = session(5);
        for _ in 0..10 {
            s.apply_failure(QuestionKind::Landmark);
        }
        assert_eq!(s.health(), 0);

        for _ in 0..10 {
            s.grant_life();
        }
        assert_eq!(s.health(), MAX_HEALTH);
    }

    #[test]
    fn over_iff_dead_or_exhausted() {
        let mut s = session(2);
        assert!(!s.is_over());

        s.advance();
        assert!(!s.is_over());
        s.advance();
        assert!(s.is_over());

        let mut s = session(2);
        s.apply_failure(QuestionKind::Landmark);
        s.apply_failure(QuestionKind::Price);
        assert!(!s.is_over());
        s.apply_failure(QuestionKind::Landmark);
        assert!(s.is_over());
    }

    #[test]
    #[should_panic(expected = "finished session")]
    #[cfg(debug_assertions)]
    fn advancing_past_the_end_is_a_logic_error() {
        let mut s = session(1);
        s.advance();
        s.advance();
    }

    #[test]
    fn success_updates_both_counters_and_points() {
        let mut s = session(3);
        s.apply_success(QuestionKind::Landmark, 100);
        s.apply_success(QuestionKind::Price, 95);
        s.apply_failure(QuestionKind::Price);

        assert_eq!(s.points(), 195);
        assert_eq!(s.landmarks(), (1, 1));
        assert_eq!(s.prices(), (1, 2));
        assert_eq!(s.health(), 2);
    }

    #[test]
    fn award_skips_counters() {
        let mut s = session(3);
        s.award(10);
        assert_eq!(s.points(), 10);
        assert_eq!(s.landmarks(), (0, 0));
        assert_eq!(s.prices(), (0, 0));
    }

    #[test]
    fn summary_reflects_outcome() {
        let mut s = session(1);
        s.apply_success(QuestionKind::Landmark, 100);
        s.advance();
        let summary = s.summary();
        assert_eq!(summary.outcome, SessionOutcome::Cleared);
        assert_eq!(summary.points, 100);
        assert_eq!(summary.questions_played, 1);

        let mut s = session(5);
        s.apply_failure(QuestionKind::Landmark);
        s.apply_failure(QuestionKind::Landmark);
        s.apply_failure(QuestionKind::Landmark);
        assert_eq!(s.summary().outcome, SessionOutcome::OutOfLives);
    }
}
