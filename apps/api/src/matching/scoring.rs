//! Weighted scoring: pure, deterministic career ranking.
//!
//! Default: `WeightedCareerScorer`. `RecommendationEngine` holds an
//! `Arc<dyn CareerScorer>` so an alternative ranking can be swapped in at startup.
//!
//! Algorithm (points out of 100, weights from `ScoringConfig`):
//! 1. Category/interest ↔ sector match
//! 2. Education compatibility (hard filter on the decided path)
//! 3. Subject aptitude for the sector's curricular subjects
//! 4. Personality-trait affinity (undecided path only)
//!
//! Results are stable-sorted by score, so ties keep catalog order.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::assessment::{AssessmentPath, StudentProfile};
use crate::catalog::{CareerCatalog, CareerRecord};
use crate::matching::selection::{select, SelectionPolicy};
use crate::matching::tables::{category_sectors, sector_subjects, trait_sectors};
use crate::models::recommendation::{FactorKind, MatchFactor, MatchResult};

const PRIMARY_CORE_SECTOR: f64 = 1.0;
const PRIMARY_RELATED_SECTOR: f64 = 0.85;
const SECONDARY_INTEREST: f64 = 0.5;

const HIGH_INTEREST_RATING: u8 = 4;
const MODERATE_RATING: u8 = 3;

const TRAIT_MATCH_CAP: usize = 2;

/// Per-path weights and rules. Selected by `AssessmentPath::scoring_config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub category_weight: f64,
    pub education_weight: f64,
    pub subject_weight: f64,
    pub trait_weight: f64,
    /// Extra points when the career is the one the student named.
    pub chosen_career_bonus: f64,
    /// Exclude careers requiring more education than the student will pursue.
    pub education_hard_filter: bool,
    pub selection: SelectionPolicy,
}

impl ScoringConfig {
    pub fn decided() -> Self {
        Self {
            category_weight: 50.0,
            education_weight: 30.0,
            subject_weight: 20.0,
            trait_weight: 0.0,
            chosen_career_bonus: 5.0,
            education_hard_filter: true,
            selection: SelectionPolicy::ConfidenceThreshold {
                min_score: 90,
                cap: 5,
                fallback: 3,
            },
        }
    }

    pub fn undecided() -> Self {
        Self {
            category_weight: 40.0,
            education_weight: 30.0,
            subject_weight: 15.0,
            trait_weight: 15.0,
            chosen_career_bonus: 0.0,
            education_hard_filter: false,
            selection: SelectionPolicy::Breadth { count: 3 },
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "weights: interest {}, education {}, subjects {}, traits {}; education filter {}; selection {}",
            self.category_weight,
            self.education_weight,
            self.subject_weight,
            self.trait_weight,
            if self.education_hard_filter { "hard" } else { "soft" },
            self.selection.describe()
        )
    }
}

/// Scoring produced nothing to recommend. Surfaced so the caller can show a
/// guided fallback instead of an empty page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no eligible careers on the {path} path: {reason}")]
pub struct NoEligibleCareers {
    pub path: AssessmentPath,
    pub reason: String,
}

/// The scorer trait. Implementations must be pure: identical input, identical output.
pub trait CareerScorer: Send + Sync {
    fn score(
        &self,
        profile: &StudentProfile,
        catalog: &CareerCatalog,
    ) -> Result<Vec<MatchResult>, NoEligibleCareers>;

    /// Backend label, reported in counselor notes.
    fn name(&self) -> &'static str;
}

pub struct WeightedCareerScorer;

impl CareerScorer for WeightedCareerScorer {
    fn score(
        &self,
        profile: &StudentProfile,
        catalog: &CareerCatalog,
    ) -> Result<Vec<MatchResult>, NoEligibleCareers> {
        let config = profile.career_clarity.scoring_config();
        score_careers(profile, catalog, &config)
    }

    fn name(&self) -> &'static str {
        "weighted"
    }
}

/// Ranks the catalog and applies the path's selection policy.
pub fn score_careers(
    profile: &StudentProfile,
    catalog: &CareerCatalog,
    config: &ScoringConfig,
) -> Result<Vec<MatchResult>, NoEligibleCareers> {
    if catalog.is_empty() {
        return Err(NoEligibleCareers {
            path: profile.career_clarity,
            reason: "the career catalog is empty".to_string(),
        });
    }

    if let Some(id) = profile.specific_career_id.as_deref() {
        if catalog.get(id).is_none() {
            debug!("Chosen career '{id}' is not in the catalog; no chosen-career bonus applies");
        }
    }

    let ranked = rank_careers(profile, catalog, config);
    if ranked.is_empty() {
        return Err(NoEligibleCareers {
            path: profile.career_clarity,
            reason: format!(
                "every career requires more than a {}",
                profile.education_willingness.label()
            ),
        });
    }

    debug!(
        "Ranked {} of {} careers; top score {}",
        ranked.len(),
        catalog.len(),
        ranked[0].match_score
    );

    Ok(select(ranked, &config.selection))
}

/// Scores every eligible career, highest first. Stable: ties keep catalog order.
pub fn rank_careers(
    profile: &StudentProfile,
    catalog: &CareerCatalog,
    config: &ScoringConfig,
) -> Vec<MatchResult> {
    let mut ranked: Vec<MatchResult> = catalog
        .all()
        .iter()
        .filter_map(|career| score_career(profile, career, config))
        .collect();
    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    ranked
}

/// Scores a single career, or `None` when the education hard filter excludes it.
pub fn score_career(
    profile: &StudentProfile,
    career: &CareerRecord,
    config: &ScoringConfig,
) -> Option<MatchResult> {
    if config.education_hard_filter && career.required_education > profile.education_willingness {
        return None;
    }

    let mut factors = Vec::with_capacity(5);

    let chosen = profile.specific_career_id.as_deref() == Some(career.id.as_str());
    if chosen && config.chosen_career_bonus > 0.0 {
        factors.push(MatchFactor {
            factor: FactorKind::ChosenCareer,
            points: config.chosen_career_bonus,
            note: "This is the career you told us you want".to_string(),
        });
    }

    factors.push(interest_factor(profile, career, chosen, config.category_weight));
    factors.push(education_factor(profile, career, config.education_weight));
    factors.push(subject_factor(profile, career, config.subject_weight));
    if config.trait_weight > 0.0 {
        factors.push(trait_factor(profile, career, config.trait_weight));
    }

    let total: f64 = factors.iter().map(|f| f.points).sum();
    let match_score = total.round().clamp(0.0, 100.0) as u8;

    // Strongest reason first; stable so equal points keep component order.
    factors.sort_by(|a, b| {
        b.points
            .partial_cmp(&a.points)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Some(MatchResult::new(career, match_score, factors))
}

fn interest_factor(
    profile: &StudentProfile,
    career: &CareerRecord,
    chosen: bool,
    weight: f64,
) -> MatchFactor {
    let (strength, note) = match profile.primary_category() {
        _ if chosen => (PRIMARY_CORE_SECTOR, "Your chosen career".to_string()),
        Some(primary) => {
            let sectors = category_sectors(primary);
            match sectors.iter().position(|s| *s == career.sector) {
                Some(0) => (
                    PRIMARY_CORE_SECTOR,
                    format!("{} is the heart of your {} interest", career.sector, primary.label()),
                ),
                Some(_) => (
                    PRIMARY_RELATED_SECTOR,
                    format!("{} is closely related to your {} interest", career.sector, primary.label()),
                ),
                None => secondary_interest(profile, career),
            }
        }
        None => secondary_interest(profile, career),
    };

    MatchFactor {
        factor: FactorKind::Interest,
        points: weight * strength,
        note,
    }
}

fn secondary_interest(profile: &StudentProfile, career: &CareerRecord) -> (f64, String) {
    profile
        .secondary_categories()
        .into_iter()
        .find(|c| category_sectors(*c).contains(&career.sector))
        .map(|c| {
            (
                SECONDARY_INTEREST,
                format!("Connects to your secondary interest in {}", c.label()),
            )
        })
        .unwrap_or((0.0, format!("{} is outside your stated interests", career.sector)))
}

fn education_factor(profile: &StudentProfile, career: &CareerRecord, weight: f64) -> MatchFactor {
    let diff = profile.education_willingness.ordinal() - career.required_education.ordinal();
    let required = career.required_education.label();
    let (strength, note) = match diff {
        0 => (1.0, format!("Requires a {required}, exactly what you plan to pursue")),
        1 => (0.7, format!("Requires a {required}, one step below your plan")),
        d if d >= 2 => (0.4, format!("Requires only a {required}, well below your plan")),
        -1 => (0.35, format!("Requires a {required}, one step beyond your plan")),
        _ => (0.1, format!("Requires a {required}, well beyond your plan")),
    };

    MatchFactor {
        factor: FactorKind::Education,
        points: weight * strength,
        note,
    }
}

fn subject_factor(profile: &StudentProfile, career: &CareerRecord, weight: f64) -> MatchFactor {
    let subjects = sector_subjects(career.sector);
    let mut high = Vec::new();
    let mut moderate = Vec::new();
    let mut strength_sum = 0.0;

    for subject in subjects {
        let rating = profile.rating(*subject);
        if rating >= HIGH_INTEREST_RATING {
            strength_sum += 1.0;
            high.push(subject.label());
        } else if rating == MODERATE_RATING {
            strength_sum += 0.5;
            moderate.push(subject.label());
        }
    }

    let strength = strength_sum / subjects.len() as f64;
    let note = if !high.is_empty() {
        format!("Strong interest in {}", high.join(", "))
    } else if !moderate.is_empty() {
        format!("Moderate interest in {}", moderate.join(", "))
    } else {
        let names: Vec<&str> = subjects.iter().map(|s| s.label()).collect();
        format!("Low ratings in related subjects ({})", names.join(", "))
    };

    MatchFactor {
        factor: FactorKind::Subjects,
        points: weight * strength,
        note,
    }
}

fn trait_factor(profile: &StudentProfile, career: &CareerRecord, weight: f64) -> MatchFactor {
    let matching: Vec<&str> = profile
        .personal_traits
        .iter()
        .filter(|t| trait_sectors(**t).contains(&career.sector))
        .map(|t| t.label())
        .collect();

    let strength = matching.len().min(TRAIT_MATCH_CAP) as f64 / TRAIT_MATCH_CAP as f64;
    let note = if matching.is_empty() {
        "None of your listed traits stand out for this field".to_string()
    } else {
        format!("Being {} suits this field", matching.join(" and "))
    };

    MatchFactor {
        factor: FactorKind::Traits,
        points: weight * strength,
        note,
    }
}
