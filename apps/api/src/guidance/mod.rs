//! Per-career narrative guidance: model-backed with a deterministic fallback.

pub mod context;
pub mod fallback;
pub mod orchestrator;
pub mod prompts;

pub use orchestrator::{Augmentation, GuidanceError, GuidanceOrchestrator};
