//! Assessment intake: raw answers, path determination, and profile building.

pub mod models;
pub mod path;
pub mod profile;
pub mod questions;

pub use models::{CareerCategory, Constraint, FreeText, PersonalTrait, StudentProfile, Subject};
pub use path::{resolve_path, AssessmentPath, PathError, PathState};
pub use profile::{build_profile, FieldIssue, ValidationError};
pub use questions::AssessmentAnswers;
