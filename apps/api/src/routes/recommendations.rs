//! Axum route handlers for the Recommendation API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::recommendation::RecommendationBundle;
use crate::recommendation::AssessmentSubmission;
use crate::state::AppState;

/// POST /api/v1/recommendations
/// Scores a completed assessment and returns the full recommendation bundle.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(submission): Json<AssessmentSubmission>,
) -> Result<Json<RecommendationBundle>, AppError> {
    let bundle = state.engine.submit(submission).await?;
    Ok(Json(bundle))
}
