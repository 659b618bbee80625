use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::models::Question;

/// Error loading or validating a question set.
#[derive(Debug)]
pub enum LoadError {
    /// Could not read the file.
    Io(io::Error),
    /// The file is not valid question JSON.
    Parse(serde_json::Error),
    /// The file parsed but contains no questions.
    Empty,
    /// A question fails validation (bad index, bad range).
    Invalid { index: usize, reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read question file: {}", e),
            LoadError::Parse(e) => write!(f, "failed to parse question file: {}", e),
            LoadError::Empty => write!(f, "question file contains no questions"),
            LoadError::Invalid { index, reason } => {
                write!(f, "question {} is invalid: {}", index + 1, reason)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

/// Parse and validate a question set from JSON text.
pub fn parse_questions(json: &str) -> Result<Vec<Question>, LoadError> {
    let questions: Vec<Question> = serde_json::from_str(json)?;

    if questions.is_empty() {
        return Err(LoadError::Empty);
    }
    for (index, question) in questions.iter().enumerate() {
        validate(index, question)?;
    }

    Ok(questions)
}

/// Load a question set from a JSON file.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let json = fs::read_to_string(path)?;
    parse_questions(&json)
}

fn validate(index: usize, question: &Question) -> Result<(), LoadError> {
    let invalid = |reason: String| LoadError::Invalid { index, reason };

    if question.choices.len() < 2 {
        return Err(invalid("needs at least two choices".to_string()));
    }
    if question.correct_choice >= question.choices.len() {
        return Err(invalid(format!(
            "correct_choice {} out of range for {} choices",
            question.correct_choice,
            question.choices.len()
        )));
    }
    if let Some(price) = &question.price {
        if price.actual <= 0.0 {
            return Err(invalid("price must be positive".to_string()));
        }
        if price.min >= price.max {
            return Err(invalid("price range must satisfy min < max".to_string()));
        }
        if price.actual < price.min || price.actual > price.max {
            return Err(invalid("actual price must lie within the range".to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"[
        {
            "subject": "Eiffel Tower",
            "category": "architecture",
            "choices": ["Paris", "Lyon", "Brussels", "Geneva"],
            "correct_choice": 0,
            "price": { "item": "espresso", "actual": 4.0, "min": 1.0, "max": 10.0 }
        },
        {
            "subject": "Table Mountain",
            "category": "nature",
            "choices": ["Cape Town", "Durban"],
            "correct_choice": 0
        }
    ]"#;

    #[test]
    fn parses_a_valid_set() {
        let questions = parse_questions(VALID).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].subject, "Eiffel Tower");
        assert_eq!(questions[0].price.as_ref().unwrap().unit, "$");
        assert!(questions[1].price.is_none());
    }

    #[test]
    fn rejects_an_empty_set() {
        assert!(matches!(parse_questions("[]"), Err(LoadError::Empty)));
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let json = r#"[{
            "subject": "X", "category": "c",
            "choices": ["a", "b"], "correct_choice": 5
        }]"#;
        assert!(matches!(
            parse_questions(json),
            Err(LoadError::Invalid { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_bad_price_range() {
        let json = r#"[{
            "subject": "X", "category": "c",
            "choices": ["a", "b"], "correct_choice": 0,
            "price": { "item": "i", "actual": 5.0, "min": 10.0, "max": 3.0 }
        }]"#;
        assert!(matches!(
            parse_questions(json),
            Err(LoadError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_actual_outside_range() {
        let json = r#"[{
            "subject": "X", "category": "c",
            "choices": ["a", "b"], "correct_choice": 0,
            "price": { "item": "i", "actual": 50.0, "min": 1.0, "max": 10.0 }
        }]"#;
        assert!(matches!(
            parse_questions(json),
            Err(LoadError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_questions("not json"),
            Err(LoadError::Parse(_))
        ));
    }
}
