mod question;

pub use question::{PriceChallenge, Question};

/// Top-level screen the terminal UI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Playing,
    Summary,
}
