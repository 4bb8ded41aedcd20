use serde::{Deserialize, Serialize};

use crate::catalog::Sector;

/// A skill the student should build for a career. `sector` is `None` only for
/// the generic communication skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub sector: Option<Sector>,
    pub why_it_matters: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_to_build: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayStep {
    pub stage: String,
    pub description: String,
    #[serde(default)]
    pub timeframe: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademicYear {
    pub grade: u8,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademicPlan {
    #[serde(default)]
    pub years: Vec<AcademicYear>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceSource {
    Ai,
    Fallback,
}

/// Narrative guidance for one career, from the model or the deterministic templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerGuidance {
    pub career_id: String,
    pub explanation: String,
    pub career_pathway: Vec<PathwayStep>,
    pub academic_plan: AcademicPlan,
    pub skill_gaps: Vec<SkillGap>,
    pub source: GuidanceSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContradictionKind {
    EducationGap,
    MinimalAnswer,
    ConstraintConflict,
    LowSubjectAlignment,
}

/// A tension in the student's own answers, surfaced to the model and counselor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contradiction {
    pub kind: ContradictionKind,
    pub detail: String,
}
