//! How many ranked matches a student sees.

use serde::{Deserialize, Serialize};

use crate::models::recommendation::MatchResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Every match scoring at least `min_score`, up to `cap`. When none
    /// qualify, the top `fallback` instead.
    ConfidenceThreshold { min_score: u8, cap: usize, fallback: usize },
    /// Always the top `count`, regardless of score.
    Breadth { count: usize },
}

impl SelectionPolicy {
    pub fn describe(&self) -> String {
        match self {
            SelectionPolicy::ConfidenceThreshold {
                min_score,
                cap,
                fallback,
            } => format!("scores >= {min_score} up to {cap}, else top {fallback}"),
            SelectionPolicy::Breadth { count } => format!("top {count}"),
        }
    }
}

/// Applies the policy to matches already sorted best first.
pub fn select(ranked: Vec<MatchResult>, policy: &SelectionPolicy) -> Vec<MatchResult> {
    match *policy {
        SelectionPolicy::ConfidenceThreshold {
            min_score,
            cap,
            fallback,
        } => {
            let confident = ranked
                .iter()
                .take_while(|m| m.match_score >= min_score)
                .count();
            let keep = if confident > 0 {
                confident.min(cap)
            } else {
                fallback
            };
            ranked.into_iter().take(keep).collect()
        }
        SelectionPolicy::Breadth { count } => ranked.into_iter().take(count).collect(),
    }
}
