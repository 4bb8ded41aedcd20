//! Raw assessment answers as submitted, keyed by question id.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const CAREER_CLARITY: &str = "career_clarity";
pub const GRADE: &str = "grade";
pub const ZIP_CODE: &str = "zip_code";
pub const EDUCATION_WILLINGNESS: &str = "education_willingness";
pub const SUBJECT_RATINGS: &str = "subject_ratings";
pub const CAREER_CATEGORY: &str = "career_category";
pub const SPECIFIC_CAREER: &str = "specific_career";
pub const INTEREST_AREAS: &str = "interest_areas";
pub const PERSONAL_TRAITS: &str = "personal_traits";
pub const CONSTRAINTS: &str = "constraints";
pub const INTERESTS_TEXT: &str = "interests_text";
pub const EXPERIENCE_TEXT: &str = "experience_text";
pub const INSPIRATION_TEXT: &str = "inspiration_text";

/// Questions every submission must answer, whichever path was chosen.
pub const COMMON_REQUIRED: &[&str] = &[GRADE, ZIP_CODE, EDUCATION_WILLINGNESS, SUBJECT_RATINGS];

/// Answers keyed by question id, exactly as the assessment form sent them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentAnswers(Map<String, Value>);

impl AssessmentAnswers {
    pub fn new(answers: Map<String, Value>) -> Self {
        Self(answers)
    }

    /// Returns the answer only when it carries content: null, blank strings,
    /// and empty arrays/objects count as unanswered.
    pub fn get(&self, question_id: &str) -> Option<&Value> {
        self.0.get(question_id).filter(|v| is_answered(v))
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.get(question_id).is_some()
    }

    pub fn insert(&mut self, question_id: impl Into<String>, value: Value) {
        self.0.insert(question_id.into(), value);
    }
}

impl From<Value> for AssessmentAnswers {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

fn is_answered(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}
