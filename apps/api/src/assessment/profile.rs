//! Converts raw answers into a validated `StudentProfile`.
//!
//! Pure transform. Every problem is collected before returning, so the caller
//! receives the complete list of missing/invalid fields in one `ValidationError`.
//! A partial profile is never produced.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::assessment::models::{
    parse_tag, CareerCategory, Constraint, FreeText, PersonalTrait, StudentProfile, Subject,
};
use crate::assessment::path::AssessmentPath;
use crate::assessment::questions::{
    AssessmentAnswers, CAREER_CATEGORY, CONSTRAINTS, EDUCATION_WILLINGNESS, EXPERIENCE_TEXT,
    GRADE, INSPIRATION_TEXT, INTERESTS_TEXT, INTEREST_AREAS, PERSONAL_TRAITS, SPECIFIC_CAREER,
    SUBJECT_RATINGS, ZIP_CODE,
};
use crate::catalog::EducationLevel;

const MIN_GRADE: u8 = 9;
const MAX_GRADE: u8 = 12;

/// One missing or malformed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub reason: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid assessment submission ({} issue(s)): {}", .issues.len(), render_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.into(),
                reason: reason.into(),
            }],
        }
    }

    /// Names of every offending field, in the order they were found.
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.field.as_str()).collect()
    }
}

fn render_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Builds a `StudentProfile` for the given path, or reports every problem found.
pub fn build_profile(
    answers: &AssessmentAnswers,
    path: AssessmentPath,
) -> Result<StudentProfile, ValidationError> {
    let mut b = FieldReader::new(answers);

    for question in path.required_questions() {
        if !answers.is_answered(question) {
            b.issue(question, "required answer is missing");
        }
    }

    let grade = b.read(GRADE, parse_grade);
    let zip_code = b.read(ZIP_CODE, parse_zip);
    let education_willingness = b.read(EDUCATION_WILLINGNESS, parse_education);
    let subject_ratings = b.read_ratings();
    let constraints = b.read_tags::<Constraint>(CONSTRAINTS).unwrap_or_default();

    let path_fields = match path {
        AssessmentPath::Decided => decided_fields(&mut b),
        AssessmentPath::Undecided => undecided_fields(&mut b),
    };

    let free_text = FreeText {
        interests: b.read(INTERESTS_TEXT, parse_text),
        experience: b.read(EXPERIENCE_TEXT, parse_text),
        inspiration: b.read(INSPIRATION_TEXT, parse_text),
    };

    if !b.issues.is_empty() {
        debug!("Profile rejected on {} path: {:?}", path, b.issues);
        return Err(ValidationError { issues: b.issues });
    }

    // Every required field either produced a value or recorded an issue above.
    match (grade, zip_code, education_willingness, subject_ratings) {
        (Some(grade), Some(zip_code), Some(education_willingness), Some(subject_ratings)) => {
            Ok(StudentProfile {
                grade,
                zip_code,
                career_clarity: path,
                career_category: path_fields.career_category,
                specific_career_id: path_fields.specific_career_id,
                interest_areas: path_fields.interest_areas,
                education_willingness,
                subject_ratings,
                personal_traits: path_fields.personal_traits,
                constraints: constraints.into_iter().collect(),
                free_text,
            })
        }
        _ => Err(ValidationError::single(
            "submission",
            "required answers could not be read",
        )),
    }
}

struct PathFields {
    career_category: Option<CareerCategory>,
    specific_career_id: Option<String>,
    interest_areas: Vec<CareerCategory>,
    personal_traits: BTreeSet<PersonalTrait>,
}

fn decided_fields(b: &mut FieldReader<'_>) -> PathFields {
    PathFields {
        career_category: b.read(CAREER_CATEGORY, parse_enum::<CareerCategory>),
        specific_career_id: b.read(SPECIFIC_CAREER, parse_text),
        interest_areas: b.read_tags(INTEREST_AREAS).unwrap_or_default(),
        personal_traits: b
            .read_tags::<PersonalTrait>(PERSONAL_TRAITS)
            .unwrap_or_default()
            .into_iter()
            .collect(),
    }
}

fn undecided_fields(b: &mut FieldReader<'_>) -> PathFields {
    PathFields {
        career_category: None,
        specific_career_id: None,
        interest_areas: b.read_required_tags(INTEREST_AREAS).unwrap_or_default(),
        personal_traits: b
            .read_required_tags::<PersonalTrait>(PERSONAL_TRAITS)
            .unwrap_or_default()
            .into_iter()
            .collect(),
    }
}

/// Reads answered questions and accumulates issues instead of failing fast.
struct FieldReader<'a> {
    answers: &'a AssessmentAnswers,
    issues: Vec<FieldIssue>,
}

impl<'a> FieldReader<'a> {
    fn new(answers: &'a AssessmentAnswers) -> Self {
        Self {
            answers,
            issues: Vec::new(),
        }
    }

    fn issue(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.issues.push(FieldIssue {
            field: field.into(),
            reason: reason.into(),
        });
    }

    /// Parses the answer if present. Absence is not an issue here; required
    /// questions are checked up front.
    fn read<T>(&mut self, field: &str, parse: impl FnOnce(&Value) -> Result<T, String>) -> Option<T> {
        let answers = self.answers;
        let value = answers.get(field)?;
        match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(reason) => {
                self.issue(field, reason);
                None
            }
        }
    }

    /// Reads a list of enum tags, preserving order and dropping duplicates.
    fn read_tags<T>(&mut self, field: &str) -> Option<Vec<T>>
    where
        T: DeserializeOwned + PartialEq,
    {
        let answers = self.answers;
        let value = answers.get(field)?;
        let raw: Vec<&str> = match value {
            Value::Array(items) => {
                let mut raw = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(s) => raw.push(s),
                        None => {
                            self.issue(field, format!("expected a list of strings, found {item}"));
                            return None;
                        }
                    }
                }
                raw
            }
            Value::String(s) => s.split(',').filter(|s| !s.trim().is_empty()).collect(),
            other => {
                self.issue(field, format!("expected a list of strings, found {other}"));
                return None;
            }
        };

        let mut tags = Vec::with_capacity(raw.len());
        let mut unknown = Vec::new();
        for item in raw {
            match parse_tag::<T>(item) {
                Some(tag) if !tags.contains(&tag) => tags.push(tag),
                Some(_) => {}
                None => unknown.push(item.trim().to_string()),
            }
        }

        if !unknown.is_empty() {
            self.issue(field, format!("unknown value(s): {}", unknown.join(", ")));
            return None;
        }
        Some(tags)
    }

    /// Like `read_tags`, but an answer that parses to no tags at all (e.g. `" , "`)
    /// counts as missing.
    fn read_required_tags<T>(&mut self, field: &str) -> Option<Vec<T>>
    where
        T: DeserializeOwned + PartialEq,
    {
        let tags = self.read_tags::<T>(field)?;
        if tags.is_empty() {
            self.issue(field, "required answer is missing");
            return None;
        }
        Some(tags)
    }

    /// Ratings must cover every subject in the fixed list with an integer 1–5.
    fn read_ratings(&mut self) -> Option<BTreeMap<Subject, u8>> {
        let answers = self.answers;
        let value = answers.get(SUBJECT_RATINGS)?;
        let Value::Object(map) = value else {
            self.issue(SUBJECT_RATINGS, "expected an object of subject ratings");
            return None;
        };

        let mut given: BTreeMap<Subject, &Value> = BTreeMap::new();
        for (key, rating) in map {
            match parse_tag::<Subject>(key) {
                Some(subject) => {
                    given.insert(subject, rating);
                }
                None => debug!("Ignoring rating for unknown subject '{key}'"),
            }
        }

        let mut ratings = BTreeMap::new();
        let mut complete = true;
        for subject in Subject::ALL {
            let field = format!("{SUBJECT_RATINGS}.{}", subject.label());
            match given.get(&subject) {
                None | Some(Value::Null) => {
                    self.issue(field, "missing rating");
                    complete = false;
                }
                Some(rating) => match parse_rating(rating) {
                    Ok(r) => {
                        ratings.insert(subject, r);
                    }
                    Err(reason) => {
                        self.issue(field, reason);
                        complete = false;
                    }
                },
            }
        }

        complete.then_some(ratings)
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn parse_grade(value: &Value) -> Result<u8, String> {
    match as_integer(value) {
        Some(g) if (MIN_GRADE as i64..=MAX_GRADE as i64).contains(&g) => Ok(g as u8),
        _ => Err(format!(
            "must be a whole number between {MIN_GRADE} and {MAX_GRADE}, got {value}"
        )),
    }
}

fn parse_zip(value: &Value) -> Result<String, String> {
    let zip = value
        .as_str()
        .ok_or_else(|| format!("must be a 5-digit string, got {value}"))?;
    if zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit()) {
        Ok(zip.to_string())
    } else {
        Err(format!("must be exactly 5 digits, got '{zip}'"))
    }
}

fn parse_education(value: &Value) -> Result<EducationLevel, String> {
    value
        .as_str()
        .and_then(EducationLevel::parse)
        .ok_or_else(|| format!("unknown education level {value}"))
}

fn parse_rating(value: &Value) -> Result<u8, String> {
    match as_integer(value) {
        Some(r) if (1..=5).contains(&r) => Ok(r as u8),
        _ => Err(format!("rating must be a whole number from 1 to 5, got {value}")),
    }
}

fn parse_enum<T: DeserializeOwned>(value: &Value) -> Result<T, String> {
    value
        .as_str()
        .and_then(parse_tag::<T>)
        .ok_or_else(|| format!("unknown value {value}"))
}

fn parse_text(value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| format!("expected text, got {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_ratings() -> Value {
        json!({
            "Math": 4,
            "Science": 5,
            "English": 3,
            "Social Studies": 2,
            "Arts": 1,
            "Technology": "4"
        })
    }

    fn decided_answers() -> AssessmentAnswers {
        AssessmentAnswers::from(json!({
            "career_clarity": "yes",
            "grade": 11,
            "zip_code": "60601",
            "career_category": "healthcare",
            "education_willingness": "associate",
            "subject_ratings": full_ratings(),
            "constraints": ["stay_close_home"],
            "experience_text": "Volunteered at a clinic"
        }))
    }

    fn undecided_answers() -> AssessmentAnswers {
        AssessmentAnswers::from(json!({
            "grade": "10",
            "zip_code": "02139",
            "interest_areas": ["Technology", "creative arts"],
            "personal_traits": ["analytical", "curious", "analytical"],
            "education_willingness": "bachelor",
            "subject_ratings": full_ratings()
        }))
    }

    #[test]
    fn test_decided_profile_builds() {
        let profile = build_profile(&decided_answers(), AssessmentPath::Decided).unwrap();
        assert_eq!(profile.grade, 11);
        assert_eq!(profile.zip_code, "60601");
        assert_eq!(profile.career_category, Some(CareerCategory::Healthcare));
        assert_eq!(profile.education_willingness, EducationLevel::Associate);
        assert_eq!(profile.subject_ratings.len(), Subject::ALL.len());
        assert_eq!(profile.rating(Subject::Technology), 4);
        assert!(profile.has_constraint(Constraint::StayCloseHome));
        assert_eq!(
            profile.free_text.experience.as_deref(),
            Some("Volunteered at a clinic")
        );
        assert_eq!(profile.primary_category(), Some(CareerCategory::Healthcare));
    }

    #[test]
    fn test_undecided_profile_builds_and_dedups_traits() {
        let profile = build_profile(&undecided_answers(), AssessmentPath::Undecided).unwrap();
        assert_eq!(profile.grade, 10);
        assert_eq!(profile.zip_code, "02139");
        assert_eq!(
            profile.interest_areas,
            vec![CareerCategory::Technology, CareerCategory::CreativeArts]
        );
        assert_eq!(profile.personal_traits.len(), 2);
        assert_eq!(profile.primary_category(), Some(CareerCategory::Technology));
        assert_eq!(
            profile.secondary_categories(),
            vec![CareerCategory::CreativeArts]
        );
    }

    #[test]
    fn test_missing_single_rating_is_hard_failure() {
        let mut answers = decided_answers();
        answers.insert(
            SUBJECT_RATINGS,
            json!({"Math": 4, "Science": 5, "English": 3, "Social Studies": 2, "Arts": 1}),
        );
        let err = build_profile(&answers, AssessmentPath::Decided).unwrap_err();
        assert_eq!(err.fields(), vec!["subject_ratings.Technology"]);
    }

    #[test]
    fn test_out_of_range_rating_rejected() {
        let mut answers = decided_answers();
        answers.insert(
            SUBJECT_RATINGS,
            json!({"Math": 6, "Science": 5, "English": 3, "Social Studies": 2, "Arts": 0, "Technology": 3}),
        );
        let err = build_profile(&answers, AssessmentPath::Decided).unwrap_err();
        assert_eq!(
            err.fields(),
            vec!["subject_ratings.Math", "subject_ratings.Arts"]
        );
    }

    #[test]
    fn test_invalid_zip_and_grade_reported_together() {
        let mut answers = decided_answers();
        answers.insert(ZIP_CODE, json!("6060"));
        answers.insert(GRADE, json!(13));
        let err = build_profile(&answers, AssessmentPath::Decided).unwrap_err();
        assert_eq!(err.fields(), vec![GRADE, ZIP_CODE]);
    }

    #[test]
    fn test_numeric_zip_rejected() {
        let mut answers = decided_answers();
        answers.insert(ZIP_CODE, json!(60601));
        let err = build_profile(&answers, AssessmentPath::Decided).unwrap_err();
        assert_eq!(err.fields(), vec![ZIP_CODE]);
    }

    #[test]
    fn test_padded_zip_rejected() {
        let mut answers = decided_answers();
        answers.insert(ZIP_CODE, json!(" 60601 "));
        let err = build_profile(&answers, AssessmentPath::Decided).unwrap_err();
        assert_eq!(err.fields(), vec![ZIP_CODE]);
    }

    #[test]
    fn test_decided_requires_category() {
        let mut answers = decided_answers();
        answers.insert(CAREER_CATEGORY, Value::Null);
        let err = build_profile(&answers, AssessmentPath::Decided).unwrap_err();
        assert_eq!(err.fields(), vec![CAREER_CATEGORY]);
    }

    #[test]
    fn test_undecided_requires_interests_and_traits() {
        let mut answers = undecided_answers();
        answers.insert(INTEREST_AREAS, json!([]));
        answers.insert(PERSONAL_TRAITS, Value::Null);
        let err = build_profile(&answers, AssessmentPath::Undecided).unwrap_err();
        assert_eq!(err.fields(), vec![INTEREST_AREAS, PERSONAL_TRAITS]);
    }

    #[test]
    fn test_separator_only_tags_count_as_missing() {
        let mut answers = undecided_answers();
        answers.insert(INTEREST_AREAS, json!(","));
        answers.insert(PERSONAL_TRAITS, json!(" , "));
        let err = build_profile(&answers, AssessmentPath::Undecided).unwrap_err();
        assert_eq!(err.fields(), vec![INTEREST_AREAS, PERSONAL_TRAITS]);
        assert!(err
            .issues
            .iter()
            .all(|i| i.reason == "required answer is missing"));
    }

    #[test]
    fn test_comma_separated_tags_accepted() {
        let mut answers = undecided_answers();
        answers.insert(INTEREST_AREAS, json!("technology, ,healthcare"));
        let profile = build_profile(&answers, AssessmentPath::Undecided).unwrap();
        assert_eq!(
            profile.interest_areas,
            vec![CareerCategory::Technology, CareerCategory::Healthcare]
        );
    }

    #[test]
    fn test_unknown_tag_is_invalid() {
        let mut answers = undecided_answers();
        answers.insert(PERSONAL_TRAITS, json!(["curious", "telepathic"]));
        let err = build_profile(&answers, AssessmentPath::Undecided).unwrap_err();
        assert_eq!(err.fields(), vec![PERSONAL_TRAITS]);
        assert!(err.issues[0].reason.contains("telepathic"));
    }

    #[test]
    fn test_empty_submission_lists_every_required_field() {
        let err = build_profile(&AssessmentAnswers::default(), AssessmentPath::Decided)
            .unwrap_err();
        assert_eq!(
            err.fields(),
            vec![
                GRADE,
                ZIP_CODE,
                EDUCATION_WILLINGNESS,
                SUBJECT_RATINGS,
                CAREER_CATEGORY
            ]
        );
    }

    #[test]
    fn test_validation_error_display_lists_fields() {
        let err = ValidationError::single("zip_code", "must be exactly 5 digits");
        assert!(err.to_string().contains("zip_code: must be exactly 5 digits"));
    }
}
