//! Axum route handlers for the Analysis API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::analysis::profile::Profile;
use crate::analysis::service::analyze_profile;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: Value,
}

/// POST /analyze
///
/// Submits a candidate profile and returns the six-category visa assessment.
/// Missing profile fields are defaulted; only a body that is not a JSON object
/// is rejected.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::MalformedInput(e.body_text()))?;
    let profile = Profile::from_json(body).map_err(AppError::MalformedInput)?;

    let analysis = analyze_profile(&profile, state.llm.as_ref(), state.analysis).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
    }))
}
