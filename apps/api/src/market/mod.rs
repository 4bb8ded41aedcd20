//! Local job-market enrichment.
//!
//! Each match is looked up independently and concurrently. A failed lookup
//! leaves that one match without local data; nothing here fails a request.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::assessment::{Constraint, StudentProfile};
use crate::models::recommendation::{LocalOpportunities, MatchResult};

pub mod adzuna;

pub use adzuna::AdzunaJobSearch;

pub const CLOSE_TO_HOME_RADIUS_MILES: u32 = 25;
pub const DEFAULT_RADIUS_MILES: u32 = 50;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("job search timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed job search payload: {0}")]
    Payload(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobSearchSummary {
    pub total_jobs: u32,
    pub average_salary: Option<u32>,
}

#[async_trait]
pub trait JobSearchProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(
        &self,
        title: &str,
        zip_code: &str,
        radius_miles: u32,
    ) -> Result<JobSearchSummary, MarketError>;
}

pub fn search_radius_miles(profile: &StudentProfile) -> u32 {
    if profile.has_constraint(Constraint::StayCloseHome) {
        CLOSE_TO_HOME_RADIUS_MILES
    } else {
        DEFAULT_RADIUS_MILES
    }
}

pub struct MarketAugmenter {
    provider: Option<Arc<dyn JobSearchProvider>>,
    timeout: Duration,
}

impl MarketAugmenter {
    /// `None` disables enrichment; matches keep their national salary only.
    pub fn new(provider: Option<Arc<dyn JobSearchProvider>>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn disabled() -> Self {
        Self::new(None, Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Attaches local opportunities to each match, preserving order.
    pub async fn enrich(
        &self,
        matches: Vec<MatchResult>,
        zip_code: &str,
        radius_miles: u32,
    ) -> Vec<MatchResult> {
        let Some(provider) = &self.provider else {
            return matches;
        };

        let mut set = JoinSet::new();
        for (index, career) in matches.iter().enumerate() {
            let provider = Arc::clone(provider);
            let title = career.title.clone();
            let zip_code = zip_code.to_string();
            let timeout = self.timeout;
            set.spawn(async move {
                let result = tokio::time::timeout(
                    timeout,
                    provider.search(&title, &zip_code, radius_miles),
                )
                .await
                .unwrap_or_else(|_| Err(MarketError::Timeout(timeout)));
                (index, result)
            });
        }

        let mut summaries: Vec<Option<JobSearchSummary>> = vec![None; matches.len()];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, Ok(summary))) => summaries[index] = Some(summary),
                Ok((index, Err(e))) => warn!(
                    "Job search for {} skipped ({}): {e}",
                    matches[index].career_id,
                    provider.name()
                ),
                Err(e) => warn!("Job search task did not complete: {e}"),
            }
        }

        let found = summaries.iter().filter(|s| s.is_some()).count();
        info!(
            "Local market data for {found}/{} careers within {radius_miles} miles",
            matches.len()
        );

        matches
            .into_iter()
            .zip(summaries)
            .map(|(career, summary)| match summary {
                Some(summary) => career.with_local_opportunities(LocalOpportunities {
                    estimated_jobs: summary.total_jobs,
                    average_local_salary: summary.average_salary,
                    distance_from_student_miles: radius_miles,
                }),
                None => career,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AssessmentPath, FreeText};
    use crate::catalog::{builtin_catalog, EducationLevel};
    use std::collections::{BTreeMap, BTreeSet};

    /// Fails for titles in `failing`.
    struct FakeJobSearch {
        failing: Vec<&'static str>,
        delay: Duration,
    }

    impl FakeJobSearch {
        fn new(failing: Vec<&'static str>) -> Self {
            Self {
                failing,
                delay: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl JobSearchProvider for FakeJobSearch {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn search(
            &self,
            title: &str,
            _zip_code: &str,
            _radius_miles: u32,
        ) -> Result<JobSearchSummary, MarketError> {
            tokio::time::sleep(self.delay).await;
            if self.failing.iter().any(|f| *f == title) {
                return Err(MarketError::Payload("bad".to_string()));
            }
            Ok(JobSearchSummary {
                total_jobs: title.len() as u32,
                average_salary: Some(50_000),
            })
        }
    }

    fn matches() -> Vec<MatchResult> {
        let catalog = builtin_catalog();
        ["registered-nurse", "software-developer", "physician"]
            .iter()
            .map(|id| MatchResult::new(catalog.get(id).unwrap(), 90, vec![]))
            .collect()
    }

    #[tokio::test]
    async fn test_disabled_passes_through() {
        let input = matches();
        let out = MarketAugmenter::disabled().enrich(input.clone(), "10001", 50).await;
        assert_eq!(out, input);
    }

    #[tokio::test]
    async fn test_failure_skips_only_that_career_and_keeps_order() {
        let provider = Arc::new(FakeJobSearch::new(vec!["Software Developer"]));
        let augmenter = MarketAugmenter::new(Some(provider), Duration::from_secs(5));
        let out = augmenter.enrich(matches(), "10001", 50).await;

        let ids: Vec<&str> = out.iter().map(|m| m.career_id.as_str()).collect();
        assert_eq!(ids, vec!["registered-nurse", "software-developer", "physician"]);
        assert_eq!(
            out[0].local_opportunities,
            Some(LocalOpportunities {
                estimated_jobs: "Registered Nurse".len() as u32,
                average_local_salary: Some(50_000),
                distance_from_student_miles: 50,
            })
        );
        assert!(out[1].local_opportunities.is_none());
        assert!(out[2].local_opportunities.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_skips_career() {
        let mut fake = FakeJobSearch::new(vec![]);
        fake.delay = Duration::from_secs(60);
        let augmenter = MarketAugmenter::new(Some(Arc::new(fake)), Duration::from_secs(10));
        let out = augmenter.enrich(matches(), "10001", 25).await;
        assert!(out.iter().all(|m| m.local_opportunities.is_none()));
    }

    #[test]
    fn test_radius_depends_on_stay_close_home() {
        let mut profile = StudentProfile {
            grade: 12,
            zip_code: "10001".to_string(),
            career_clarity: AssessmentPath::Undecided,
            career_category: None,
            specific_career_id: None,
            interest_areas: vec![],
            education_willingness: EducationLevel::Bachelor,
            subject_ratings: BTreeMap::new(),
            personal_traits: BTreeSet::new(),
            constraints: BTreeSet::new(),
            free_text: FreeText::default(),
        };
        assert_eq!(search_radius_miles(&profile), 50);
        profile.constraints.insert(Constraint::StayCloseHome);
        assert_eq!(search_radius_miles(&profile), 25);
    }
}
