use serde::Deserialize;

/// A single two-phase question: identify the landmark's location, then
/// guess a price of something there.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    /// Landmark or subject shown to the player, e.g. "Sagrada Família".
    pub subject: String,
    /// Free-form category label, e.g. "architecture".
    pub category: String,
    /// Location choices, one correct among decoys.
    pub choices: Vec<String>,
    /// Index into `choices` of the correct location.
    pub correct_choice: usize,
    /// Optional numeric follow-up; a question without one resolves
    /// after the location phase.
    pub price: Option<PriceChallenge>,
}

/// The numeric half of a question: guess the price of `item` within
/// `[min, max]`.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceChallenge {
    pub item: String,
    pub actual: f64,
    pub min: f64,
    pub max: f64,
    /// Currency or unit label for display, defaults to "$".
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "$".to_string()
}

impl PriceChallenge {
    /// Midpoint of the guess range, the slider's starting value and the
    /// value submitted when the price timer expires untouched.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

