//! The two-branch assessment state machine.
//!
//! `Undetermined → {Decided, Undecided}`, chosen once per submission by the
//! branching "do you already know what career you want?" answer. The chosen
//! path fixes both the mandatory question subset and the scoring configuration.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::assessment::questions::{
    AssessmentAnswers, CAREER_CATEGORY, CAREER_CLARITY, COMMON_REQUIRED, INTEREST_AREAS,
    PERSONAL_TRAITS,
};
use crate::matching::scoring::ScoringConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentPath {
    Decided,
    Undecided,
}

impl AssessmentPath {
    /// Interprets the branching answer. Accepts the path names, yes/no, and booleans.
    pub fn from_answer(answer: &Value) -> Option<Self> {
        match answer {
            Value::Bool(true) => Some(AssessmentPath::Decided),
            Value::Bool(false) => Some(AssessmentPath::Undecided),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "decided" | "yes" | "y" | "true" => Some(AssessmentPath::Decided),
                "undecided" | "no" | "n" | "false" | "not_sure" | "unsure" => {
                    Some(AssessmentPath::Undecided)
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Question ids that must be answered on this path, common ones first.
    pub fn required_questions(&self) -> Vec<&'static str> {
        let specific: &[&str] = match self {
            AssessmentPath::Decided => &[CAREER_CATEGORY],
            AssessmentPath::Undecided => &[INTEREST_AREAS, PERSONAL_TRAITS],
        };
        COMMON_REQUIRED.iter().chain(specific).copied().collect()
    }

    pub fn scoring_config(&self) -> ScoringConfig {
        match self {
            AssessmentPath::Decided => ScoringConfig::decided(),
            AssessmentPath::Undecided => ScoringConfig::undecided(),
        }
    }
}

impl fmt::Display for AssessmentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentPath::Decided => f.write_str("decided"),
            AssessmentPath::Undecided => f.write_str("undecided"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("no path given and 'career_clarity' was not answered")]
    Missing,

    #[error("unrecognized answer for 'career_clarity': {0}")]
    Unrecognized(String),

    #[error("requested path '{requested}' contradicts the 'career_clarity' answer '{answered}'")]
    Conflict {
        requested: AssessmentPath,
        answered: AssessmentPath,
    },

    #[error("path already chosen as '{0}'")]
    AlreadyChosen(AssessmentPath),
}

/// State of the branching machine for one submission. Terminal once chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathState {
    #[default]
    Undetermined,
    Chosen(AssessmentPath),
}

impl PathState {
    pub fn choose(&mut self, path: AssessmentPath) -> Result<AssessmentPath, PathError> {
        match *self {
            PathState::Undetermined => {
                *self = PathState::Chosen(path);
                Ok(path)
            }
            PathState::Chosen(existing) => Err(PathError::AlreadyChosen(existing)),
        }
    }

    pub fn path(&self) -> Option<AssessmentPath> {
        match self {
            PathState::Undetermined => None,
            PathState::Chosen(path) => Some(*path),
        }
    }
}

/// Resolves the path for a submission from an explicit request and/or the branching answer.
pub fn resolve_path(
    requested: Option<AssessmentPath>,
    answers: &AssessmentAnswers,
) -> Result<AssessmentPath, PathError> {
    let answered = match answers.get(CAREER_CLARITY) {
        Some(value) => Some(
            AssessmentPath::from_answer(value)
                .ok_or_else(|| PathError::Unrecognized(value.to_string()))?,
        ),
        None => None,
    };

    let path = match (requested, answered) {
        (Some(requested), Some(answered)) if requested != answered => {
            return Err(PathError::Conflict {
                requested,
                answered,
            })
        }
        (Some(path), _) | (None, Some(path)) => path,
        (None, None) => return Err(PathError::Missing),
    };

    let mut state = PathState::default();
    state.choose(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::questions::{GRADE, SUBJECT_RATINGS, ZIP_CODE};
    use serde_json::json;

    #[test]
    fn test_from_answer_variants() {
        assert_eq!(
            AssessmentPath::from_answer(&json!("yes")),
            Some(AssessmentPath::Decided)
        );
        assert_eq!(
            AssessmentPath::from_answer(&json!(false)),
            Some(AssessmentPath::Undecided)
        );
        assert_eq!(
            AssessmentPath::from_answer(&json!("Undecided")),
            Some(AssessmentPath::Undecided)
        );
        assert_eq!(AssessmentPath::from_answer(&json!("maybe")), None);
        assert_eq!(AssessmentPath::from_answer(&json!(3)), None);
    }

    #[test]
    fn test_state_machine_is_terminal() {
        let mut state = PathState::default();
        assert_eq!(state.path(), None);
        assert_eq!(
            state.choose(AssessmentPath::Undecided),
            Ok(AssessmentPath::Undecided)
        );
        assert_eq!(
            state.choose(AssessmentPath::Decided),
            Err(PathError::AlreadyChosen(AssessmentPath::Undecided))
        );
        assert_eq!(state.path(), Some(AssessmentPath::Undecided));
    }

    #[test]
    fn test_required_questions_per_path() {
        let decided = AssessmentPath::Decided.required_questions();
        assert!(decided.contains(&CAREER_CATEGORY));
        assert!(!decided.contains(&PERSONAL_TRAITS));

        let undecided = AssessmentPath::Undecided.required_questions();
        assert!(undecided.contains(&INTEREST_AREAS));
        assert!(undecided.contains(&PERSONAL_TRAITS));
        assert!(!undecided.contains(&CAREER_CATEGORY));

        for common in [GRADE, ZIP_CODE, SUBJECT_RATINGS] {
            assert!(decided.contains(&common) && undecided.contains(&common));
        }
    }

    #[test]
    fn test_scoring_config_selected_by_path() {
        assert!(AssessmentPath::Decided.scoring_config().education_hard_filter);
        assert!(!AssessmentPath::Undecided.scoring_config().education_hard_filter);
        assert_eq!(AssessmentPath::Decided.scoring_config().trait_weight, 0.0);
    }

    #[test]
    fn test_resolve_from_answer_only() {
        let answers = AssessmentAnswers::from(json!({ "career_clarity": "no" }));
        assert_eq!(resolve_path(None, &answers), Ok(AssessmentPath::Undecided));
    }

    #[test]
    fn test_resolve_explicit_without_answer() {
        let answers = AssessmentAnswers::default();
        assert_eq!(
            resolve_path(Some(AssessmentPath::Decided), &answers),
            Ok(AssessmentPath::Decided)
        );
    }

    #[test]
    fn test_resolve_conflict_is_rejected() {
        let answers = AssessmentAnswers::from(json!({ "career_clarity": "yes" }));
        assert_eq!(
            resolve_path(Some(AssessmentPath::Undecided), &answers),
            Err(PathError::Conflict {
                requested: AssessmentPath::Undecided,
                answered: AssessmentPath::Decided,
            })
        );
    }

    #[test]
    fn test_resolve_missing_and_unrecognized() {
        assert_eq!(
            resolve_path(None, &AssessmentAnswers::default()),
            Err(PathError::Missing)
        );
        let answers = AssessmentAnswers::from(json!({ "career_clarity": "perhaps" }));
        assert!(matches!(
            resolve_path(None, &answers),
            Err(PathError::Unrecognized(_))
        ));
    }
}
