pub mod guidance;
pub mod recommendation;
