//! Compass: career recommendation and matching engine for high-school students.

pub mod assessment;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod guidance;
pub mod llm_client;
pub mod market;
pub mod matching;
pub mod models;
pub mod recommendation;
pub mod routes;
pub mod state;
