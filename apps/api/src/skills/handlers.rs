//! Axum route handlers for the skill gap API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::skills::analyzer::GapReport;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub target_role: String,
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze
///
/// Extract skills → look up role → analyze gap. Any stage failing fails the
/// whole request; no partial report is returned. Malformed bodies get the same
/// `{"error": ...}` shape as pipeline failures.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<GapReport>, AppError> {
    let Json(request) = payload?;
    let report = run_analysis(&state, &request).await?;
    Ok(Json(report))
}

/// GET /roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: state
            .registry
            .roles()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

async fn run_analysis(state: &AppState, request: &AnalyzeRequest) -> Result<GapReport, AppError> {
    debug!(
        "Analyzing {} bytes of resume text for role '{}'",
        request.resume_text.len(),
        request.target_role
    );
    let resume_skills = state.extractor.extract(&request.resume_text).await?;

    let role_skills = state.registry.lookup(&request.target_role);
    if role_skills.is_empty() {
        info!(
            "Role '{}' not in registry; no required skills",
            request.target_role
        );
    }

    let report = state.analyzer.analyze(&resume_skills, role_skills).await?;
    Ok(report)
}
