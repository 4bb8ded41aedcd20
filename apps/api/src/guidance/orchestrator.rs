//! AI orchestration: one guidance request per career, issued concurrently.
//!
//! Flow per career: context document → prompt → provider (with timeout) →
//! JSON repair → schema check → merge onto the deterministic parts.
//! Any failure yields the templated fallback for that career only.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::assessment::StudentProfile;
use crate::catalog::CareerCatalog;
use crate::guidance::context::GuidanceContext;
use crate::guidance::fallback::{academic_plan, fallback_guidance, pathway_steps, LAST_GRADE};
use crate::guidance::prompts::{build_guidance_prompt, guidance_system};
use crate::llm_client::repair::{repair_json, RepairError};
use crate::llm_client::{GenerativeTextProvider, LlmError};
use crate::models::guidance::{
    AcademicPlan, CareerGuidance, Contradiction, GuidanceSource, PathwayStep, SkillGap,
};
use crate::models::recommendation::MatchResult;

/// Why a career fell back to templated guidance. Logged, never returned to clients.
#[derive(Debug, Error)]
pub enum GuidanceError {
    #[error("provider error: {0}")]
    Provider(#[from] LlmError),

    #[error("provider timed out after {0:?}")]
    Timeout(Duration),

    #[error("unrepairable response: {0}")]
    Repair(#[from] RepairError),

    #[error("response did not match the guidance schema: {0}")]
    Schema(String),

    #[error("guidance task failed: {0}")]
    Task(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Model output schema
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct GuidanceDraft {
    explanation: String,
    career_pathway: Vec<PathwayStep>,
    academic_plan: AcademicPlan,
    skill_gaps: Vec<DraftSkill>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DraftSkill {
    skill: String,
    how_to_build: Option<String>,
}

/// Guidance for every match, index-aligned with the input.
#[derive(Debug, Clone)]
pub struct Augmentation {
    pub guidance: Vec<CareerGuidance>,
    pub contradictions: Vec<Contradiction>,
}

impl Augmentation {
    pub fn ai_count(&self) -> usize {
        self.guidance
            .iter()
            .filter(|g| g.source == GuidanceSource::Ai)
            .count()
    }
}

pub struct GuidanceOrchestrator {
    provider: Option<Arc<dyn GenerativeTextProvider>>,
    catalog: Arc<CareerCatalog>,
    timeout: Duration,
}

impl GuidanceOrchestrator {
    pub fn new(
        provider: Option<Arc<dyn GenerativeTextProvider>>,
        catalog: Arc<CareerCatalog>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            catalog,
            timeout,
        }
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.name())
    }

    /// Produces guidance for every match. Never fails: each career gets either
    /// model guidance or the deterministic fallback.
    pub async fn augment(&self, profile: &StudentProfile, matches: &[MatchResult]) -> Augmentation {
        let context = GuidanceContext::new(profile, matches, &self.catalog);

        let Some(provider) = &self.provider else {
            return Augmentation {
                guidance: matches.iter().map(|m| fallback_guidance(profile, m)).collect(),
                contradictions: context.contradictions().to_vec(),
            };
        };

        let system = Arc::new(guidance_system());
        let mut set = JoinSet::new();
        for (index, career) in matches.iter().enumerate() {
            let provider = Arc::clone(provider);
            let system = Arc::clone(&system);
            let prompt = build_guidance_prompt(&context.document_for(career));
            let timeout = self.timeout;
            set.spawn(async move {
                (index, request_draft(provider.as_ref(), &prompt, &system, timeout).await)
            });
        }

        let mut drafts: Vec<Option<Result<GuidanceDraft, GuidanceError>>> =
            (0..matches.len()).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, result)) => drafts[index] = Some(result),
                Err(e) => warn!("Guidance task did not complete: {e}"),
            }
        }

        let guidance: Vec<CareerGuidance> = matches
            .iter()
            .zip(drafts)
            .map(|(career, draft)| {
                let result = draft
                    .unwrap_or_else(|| Err(GuidanceError::Task("task aborted".to_string())))
                    .and_then(|d| merge_draft(profile, career, d));
                match result {
                    Ok(guidance) => guidance,
                    Err(e) => {
                        warn!(
                            "Guidance for {} fell back to templates ({}): {e}",
                            career.career_id,
                            provider.name()
                        );
                        fallback_guidance(profile, career)
                    }
                }
            })
            .collect();

        let augmentation = Augmentation {
            guidance,
            contradictions: context.contradictions().to_vec(),
        };
        info!(
            "AI guidance for {}/{} careers via {}",
            augmentation.ai_count(),
            matches.len(),
            provider.name()
        );
        augmentation
    }
}

async fn request_draft(
    provider: &dyn GenerativeTextProvider,
    prompt: &str,
    system: &str,
    timeout: Duration,
) -> Result<GuidanceDraft, GuidanceError> {
    let raw = tokio::time::timeout(timeout, provider.generate(prompt, system))
        .await
        .map_err(|_| GuidanceError::Timeout(timeout))??;

    let outcome = repair_json(&raw)?;
    if outcome.was_repaired() {
        info!("Repaired model JSON with {:?}", outcome.applied);
    }

    serde_json::from_value(outcome.value).map_err(|e| GuidanceError::Schema(e.to_string()))
}

/// Combines model output with the deterministic parts. The model can annotate
/// the resolver's skills but never add one.
fn merge_draft(
    profile: &StudentProfile,
    career: &MatchResult,
    draft: GuidanceDraft,
) -> Result<CareerGuidance, GuidanceError> {
    let explanation = draft.explanation.trim().to_string();
    if explanation.is_empty() {
        return Err(GuidanceError::Schema("missing explanation".to_string()));
    }

    let career_pathway = if draft.career_pathway.is_empty() {
        pathway_steps(career.required_education)
    } else {
        draft.career_pathway
    };

    // Only the grades the student still has ahead count.
    let years: Vec<_> = draft
        .academic_plan
        .years
        .into_iter()
        .filter(|y| (profile.grade..=LAST_GRADE).contains(&y.grade))
        .collect();
    let academic_plan = if years.is_empty() {
        academic_plan(profile, career.sector)
    } else {
        AcademicPlan {
            years,
            notes: draft.academic_plan.notes,
        }
    };

    Ok(CareerGuidance {
        career_id: career.career_id.clone(),
        explanation,
        career_pathway,
        academic_plan,
        skill_gaps: merge_skill_gaps(&career.skill_gaps, &draft.skill_gaps),
        source: GuidanceSource::Ai,
    })
}

fn merge_skill_gaps(resolved: &[SkillGap], drafted: &[DraftSkill]) -> Vec<SkillGap> {
    resolved
        .iter()
        .map(|gap| {
            let how_to_build = drafted
                .iter()
                .find(|d| d.skill.trim().eq_ignore_ascii_case(&gap.skill))
                .and_then(|d| d.how_to_build.clone())
                .filter(|h| !h.trim().is_empty());
            SkillGap {
                how_to_build: how_to_build.or_else(|| gap.how_to_build.clone()),
                ..gap.clone()
            }
        })
        .collect()
}
