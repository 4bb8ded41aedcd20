//! Career matching: weighted scoring, selection, and sector skill resolution.

pub mod scoring;
pub mod selection;
pub mod skills;
pub mod tables;

pub use scoring::{CareerScorer, NoEligibleCareers, ScoringConfig, WeightedCareerScorer};
pub use selection::SelectionPolicy;
pub use skills::{interest_sectors, skill_gaps_for};
