//! Recommendation pipeline.
//!
//! Flow: resolve_path → build_profile → score/select → resolve skill gaps →
//!       (AI guidance ∥ local market) → assemble bundle.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::assessment::{
    build_profile, resolve_path, AssessmentAnswers, AssessmentPath, PathError, ValidationError,
};
use crate::catalog::CareerCatalog;
use crate::guidance::GuidanceOrchestrator;
use crate::market::{search_radius_miles, MarketAugmenter};
use crate::matching::{interest_sectors, skill_gaps_for, CareerScorer, NoEligibleCareers};
use crate::models::recommendation::{MatchResult, Provenance, RecommendationBundle};
use crate::recommendation::summary::{counselor_notes, parent_summary};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NoEligibleCareers(#[from] NoEligibleCareers),
}

/// One assessment submission. `path` is optional when the answers include
/// the branching question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    #[serde(default)]
    pub path: Option<AssessmentPath>,
    pub answers: AssessmentAnswers,
}

pub struct RecommendationEngine {
    catalog: Arc<CareerCatalog>,
    scorer: Arc<dyn CareerScorer>,
    guidance: GuidanceOrchestrator,
    market: MarketAugmenter,
}

impl RecommendationEngine {
    pub fn new(
        catalog: Arc<CareerCatalog>,
        scorer: Arc<dyn CareerScorer>,
        guidance: GuidanceOrchestrator,
        market: MarketAugmenter,
    ) -> Self {
        Self {
            catalog,
            scorer,
            guidance,
            market,
        }
    }

    pub fn catalog(&self) -> &CareerCatalog {
        &self.catalog
    }

    pub fn ai_provider(&self) -> Option<&'static str> {
        self.guidance.provider_name()
    }

    pub fn market_enabled(&self) -> bool {
        self.market.is_enabled()
    }

    pub async fn submit(
        &self,
        submission: AssessmentSubmission,
    ) -> Result<RecommendationBundle, EngineError> {
        // Step 1: Path and profile
        let path = resolve_path(submission.path, &submission.answers)?;
        let profile = build_profile(&submission.answers, path)?;
        info!(
            "Assessment accepted: path={path}, grade={}, willingness={:?}",
            profile.grade, profile.education_willingness
        );

        // Step 2: Score and select
        let scored = self.scorer.score(&profile, &self.catalog)?;
        if let Some(top) = scored.first() {
            info!(
                "Selected {} match(es) with {} scorer; top={} ({})",
                scored.len(),
                self.scorer.name(),
                top.career_id,
                top.match_score
            );
        }

        // Step 3: Sector skill gaps
        let interests = interest_sectors(&profile);
        let matches: Vec<MatchResult> = scored
            .into_iter()
            .map(|m| {
                let gaps = skill_gaps_for(m.sector, &interests);
                m.with_skill_gaps(gaps)
            })
            .collect();

        // Step 4: AI guidance and local market, concurrently
        let radius = search_radius_miles(&profile);
        let (augmentation, enriched) = tokio::join!(
            self.guidance.augment(&profile, &matches),
            self.market.enrich(matches.clone(), &profile.zip_code, radius),
        );

        // Step 5: Assemble
        let ai_count = augmentation.ai_count();
        let matches: Vec<MatchResult> = enriched
            .into_iter()
            .zip(augmentation.guidance)
            .map(|(m, guidance)| m.with_guidance(guidance))
            .collect();
        let provenance = Provenance::from_counts(ai_count, matches.len());

        let scoring_summary = format!(
            "{} scorer; {}",
            self.scorer.name(),
            path.scoring_config().summary()
        );
        let bundle = RecommendationBundle {
            bundle_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            path,
            parent_summary: parent_summary(&profile, &matches),
            counselor_notes: counselor_notes(
                &profile,
                &matches,
                augmentation.contradictions,
                scoring_summary,
                provenance,
            ),
            matches,
            provenance,
        };

        info!(
            "Bundle {} ready: {} match(es), provenance={:?}, {} flag(s)",
            bundle.bundle_id,
            bundle.matches.len(),
            bundle.provenance,
            bundle.counselor_notes.flags.len()
        );
        Ok(bundle)
    }
}
