//! Answer payloads shared by the certification test and the profiling quiz.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw value submitted for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    /// Agreement on a 1–5 scale.
    Likert(u8),
    /// Zero-based index of the chosen scenario option.
    Choice(usize),
    /// Free text for open questions.
    Text(String),
}

impl AnswerValue {
    pub fn kind_str(&self) -> &'static str {
        match self {
            AnswerValue::Likert(_) => "likert",
            AnswerValue::Choice(_) => "choice",
            AnswerValue::Text(_) => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u8,
    pub value: AnswerValue,
}

/// Rejections raised while validating submitted answers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Unknown question id {0}")]
    UnknownQuestion(u8),

    #[error("Question {0} was answered more than once")]
    DuplicateAnswer(u8),

    #[error("Question {question_id} expects a {expected} answer, got {got}")]
    KindMismatch {
        question_id: u8,
        expected: &'static str,
        got: &'static str,
    },

    #[error("Likert answer for question {question_id} must be between 1 and 5, got {value}")]
    LikertOutOfRange { question_id: u8, value: u8 },

    #[error("Choice {index} is not an option of question {question_id}")]
    ChoiceOutOfRange { question_id: u8, index: usize },
}

pub const LIKERT_MIN: u8 = 1;
pub const LIKERT_MAX: u8 = 5;

/// Maps a 1–5 Likert answer onto [0, 1].
pub fn normalize_likert(question_id: u8, value: u8) -> Result<f64, ScoringError> {
    if !(LIKERT_MIN..=LIKERT_MAX).contains(&value) {
        return Err(ScoringError::LikertOutOfRange { question_id, value });
    }
    Ok(f64::from(value - LIKERT_MIN) / f64::from(LIKERT_MAX - LIKERT_MIN))
}
