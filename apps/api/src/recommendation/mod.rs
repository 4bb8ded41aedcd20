//! End-to-end recommendation pipeline and its human-readable digests.

pub mod engine;
pub mod summary;

pub use engine::{AssessmentSubmission, EngineError, RecommendationEngine};
