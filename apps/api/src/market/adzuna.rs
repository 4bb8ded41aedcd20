use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{JobSearchProvider, JobSearchSummary, MarketError};

const ADZUNA_API_URL: &str = "https://api.adzuna.com/v1/api/jobs";
const RESULTS_PER_PAGE: u32 = 20;
const KM_PER_MILE: f64 = 1.609_344;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    count: u64,
    #[serde(default)]
    mean: Option<f64>,
    #[serde(default)]
    results: Vec<JobPosting>,
}

#[derive(Debug, Deserialize)]
struct JobPosting {
    #[serde(default)]
    salary_min: Option<f64>,
    #[serde(default)]
    salary_max: Option<f64>,
}

impl SearchResponse {
    fn into_summary(self) -> JobSearchSummary {
        let average_salary = self
            .mean
            .filter(|m| *m > 0.0)
            .or_else(|| mean_of_postings(&self.results));
        JobSearchSummary {
            total_jobs: u32::try_from(self.count).unwrap_or(u32::MAX),
            average_salary: average_salary.map(|s| s.round() as u32),
        }
    }
}

/// Average of each posting's salary midpoint, using whichever bound is present.
fn mean_of_postings(postings: &[JobPosting]) -> Option<f64> {
    let midpoints: Vec<f64> = postings
        .iter()
        .filter_map(|p| match (p.salary_min, p.salary_max) {
            (Some(min), Some(max)) => Some((min + max) / 2.0),
            (Some(one), None) | (None, Some(one)) => Some(one),
            (None, None) => None,
        })
        .filter(|s| *s > 0.0)
        .collect();
    if midpoints.is_empty() {
        None
    } else {
        Some(midpoints.iter().sum::<f64>() / midpoints.len() as f64)
    }
}

/// Adzuna jobs search API.
#[derive(Clone)]
pub struct AdzunaJobSearch {
    client: Client,
    app_id: String,
    app_key: String,
    country: String,
}

impl AdzunaJobSearch {
    pub fn new(app_id: String, app_key: String, country: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            app_id,
            app_key,
            country,
        }
    }
}

#[async_trait]
impl JobSearchProvider for AdzunaJobSearch {
    fn name(&self) -> &'static str {
        "adzuna"
    }

    async fn search(
        &self,
        title: &str,
        zip_code: &str,
        radius_miles: u32,
    ) -> Result<JobSearchSummary, MarketError> {
        let url = format!("{ADZUNA_API_URL}/{}/search/1", self.country);
        let distance_km = (f64::from(radius_miles) * KM_PER_MILE).round() as u32;

        let response = self
            .client
            .get(&url)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
                ("what", title),
                ("where", zip_code),
                ("content-type", "application/json"),
            ])
            .query(&[("distance", distance_km), ("results_per_page", RESULTS_PER_PAGE)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| MarketError::Payload(e.to_string()))?;
        debug!("Adzuna: {} postings for {title} near {zip_code}", body.count);

        Ok(body.into_summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prefers_reported_mean() {
        let raw = r#"{"count": 412, "mean": 80123.6, "results": [{"salary_min": 10.0}]}"#;
        let summary = serde_json::from_str::<SearchResponse>(raw).unwrap().into_summary();
        assert_eq!(summary.total_jobs, 412);
        assert_eq!(summary.average_salary, Some(80124));
    }

    #[test]
    fn test_summary_falls_back_to_posting_midpoints() {
        let raw = r#"{
            "count": 3,
            "results": [
                {"salary_min": 60000, "salary_max": 80000},
                {"salary_max": 90000},
                {"title": "no salary listed"}
            ]
        }"#;
        let summary = serde_json::from_str::<SearchResponse>(raw).unwrap().into_summary();
        assert_eq!(summary.average_salary, Some(80000));
    }

    #[test]
    fn test_summary_without_salaries() {
        let raw = r#"{"count": 0, "results": []}"#;
        let summary = serde_json::from_str::<SearchResponse>(raw).unwrap().into_summary();
        assert_eq!(summary.total_jobs, 0);
        assert_eq!(summary.average_salary, None);
    }

    #[test]
    fn test_missing_count_is_a_payload_error() {
        assert!(serde_json::from_str::<SearchResponse>(r#"{"results": []}"#).is_err());
    }
}
