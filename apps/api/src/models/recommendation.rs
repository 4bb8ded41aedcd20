use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::AssessmentPath;
use crate::catalog::{CareerRecord, EducationLevel, Sector};
use crate::models::guidance::{
    AcademicPlan, CareerGuidance, Contradiction, GuidanceSource, PathwayStep, SkillGap,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    ChosenCareer,
    Interest,
    Education,
    Subjects,
    Traits,
}

/// One contribution to a match score, kept for explainability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchFactor {
    pub factor: FactorKind,
    pub points: f64,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalOpportunities {
    pub estimated_jobs: u32,
    pub average_local_salary: Option<u32>,
    pub distance_from_student_miles: u32,
}

/// A scored career. Enrichment consumes a match and returns a new one; a
/// result is never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub career_id: String,
    pub title: String,
    pub sector: Sector,
    pub required_education: EducationLevel,
    pub average_salary: u32,
    pub match_score: u8,
    pub reasoning: Vec<MatchFactor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_opportunities: Option<LocalOpportunities>,
    #[serde(default)]
    pub skill_gaps: Vec<SkillGap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_pathway: Option<Vec<PathwayStep>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_plan: Option<AcademicPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance_source: Option<GuidanceSource>,
}

impl MatchResult {
    pub fn new(career: &CareerRecord, match_score: u8, reasoning: Vec<MatchFactor>) -> Self {
        Self {
            career_id: career.id.clone(),
            title: career.title.clone(),
            sector: career.sector,
            required_education: career.required_education,
            average_salary: career.average_salary,
            match_score,
            reasoning,
            local_opportunities: None,
            skill_gaps: Vec::new(),
            explanation: None,
            career_pathway: None,
            academic_plan: None,
            guidance_source: None,
        }
    }

    pub fn with_skill_gaps(self, skill_gaps: Vec<SkillGap>) -> Self {
        Self { skill_gaps, ..self }
    }

    pub fn with_guidance(self, guidance: CareerGuidance) -> Self {
        Self {
            explanation: Some(guidance.explanation),
            career_pathway: Some(guidance.career_pathway),
            academic_plan: Some(guidance.academic_plan),
            skill_gaps: guidance.skill_gaps,
            guidance_source: Some(guidance.source),
            ..self
        }
    }

    pub fn with_local_opportunities(self, local: LocalOpportunities) -> Self {
        Self {
            local_opportunities: Some(local),
            ..self
        }
    }

    /// The factor that contributed the most points.
    pub fn strongest_factor(&self) -> Option<&MatchFactor> {
        self.reasoning.first()
    }
}

/// Whether AI augmentation succeeded for every, some, or none of the matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Augmented,
    Partial,
    Fallback,
}

impl Provenance {
    pub fn from_counts(ai: usize, total: usize) -> Self {
        if total > 0 && ai == total {
            Provenance::Augmented
        } else if ai > 0 {
            Provenance::Partial
        } else {
            Provenance::Fallback
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerHighlight {
    pub title: String,
    pub match_score: u8,
    pub average_salary: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_jobs: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentSummary {
    pub headline: String,
    pub top_careers: Vec<CareerHighlight>,
    pub education_outlook: String,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounselorNotes {
    pub path: AssessmentPath,
    pub flags: Vec<Contradiction>,
    pub talking_points: Vec<String>,
    pub scoring_summary: String,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    pub bundle_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub path: AssessmentPath,
    pub matches: Vec<MatchResult>,
    pub parent_summary: ParentSummary,
    pub counselor_notes: CounselorNotes,
    pub provenance: Provenance,
}
