//! Question loading.

mod loader;

use std::path::PathBuf;

use crate::models::Question;

pub use loader::{load_questions_from_json, parse_questions, LoadError};

/// Capability interface for fetching an ordered question batch, so the
/// game can be fed from something other than a JSON file in tests.
pub trait QuestionSource {
    fn fetch(&self, limit: Option<usize>) -> Result<Vec<Question>, LoadError>;
}

/// The shipped source: a JSON file on disk.
pub struct JsonQuestionSource {
    path: PathBuf,
}

impl JsonQuestionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QuestionSource for JsonQuestionSource {
    fn fetch(&self, limit: Option<usize>) -> Result<Vec<Question>, LoadError> {
        let mut questions = load_questions_from_json(&self.path)?;
        if let Some(limit) = limit {
            questions.truncate(limit.max(1));
        }
        Ok(questions)
    }
}
