use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::availability::{employee_availability, Interval};
use crate::catalog::CandidateFilters;
use crate::errors::AppError;
use crate::matching::engine::{run_matching, RunMatchingSummary};
use crate::matching::results::{list_matches, set_shortlist};
use crate::models::matching::MatchResultRow;
use crate::state::AppState;

/// Tenant scope for callers. Tenant resolution middleware is an outer
/// collaborator; the CORE takes the already-resolved id.
#[derive(Deserialize)]
pub struct TenantQuery {
    pub tenant_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunMatchingRequest {
    #[serde(default)]
    pub filters: CandidateFilters,
}

/// POST /api/v1/roles/:role_id/matching/run
pub async fn handle_run_matching(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
    Query(params): Query<TenantQuery>,
    body: Bytes,
) -> Result<Json<RunMatchingSummary>, AppError> {
    let request = parse_run_request(&body)?;
    let summary = run_matching(
        &state.db,
        params.tenant_id,
        role_id,
        &request.filters,
        state.config.scoring_concurrency,
    )
    .await?;
    Ok(Json(summary))
}

/// An absent body means "no filters". A body that is present but does not
/// parse is the caller's bug and gets INVALID_INPUT, not a silent default run.
fn parse_run_request(body: &[u8]) -> Result<RunMatchingRequest, AppError> {
    if body.is_empty() {
        return Ok(RunMatchingRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Malformed matching request body: {e}")))
}

#[derive(Deserialize)]
pub struct ListMatchesQuery {
    pub tenant_id: i64,
    #[serde(default)]
    pub shortlisted_only: bool,
}

/// GET /api/v1/roles/:role_id/matches
pub async fn handle_list_matches(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
    Query(params): Query<ListMatchesQuery>,
) -> Result<Json<Vec<MatchResultRow>>, AppError> {
    let matches = list_matches(
        &state.db,
        params.tenant_id,
        role_id,
        params.shortlisted_only,
    )
    .await?;
    Ok(Json(matches))
}

#[derive(Deserialize)]
pub struct ShortlistRequest {
    pub tenant_id: i64,
    pub shortlisted: bool,
    pub reviewer_id: i64,
}

/// PATCH /api/v1/matches/:result_id/shortlist
pub async fn handle_set_shortlist(
    State(state): State<AppState>,
    Path(result_id): Path<i64>,
    Json(req): Json<ShortlistRequest>,
) -> Result<Json<MatchResultRow>, AppError> {
    let updated = set_shortlist(
        &state.db,
        req.tenant_id,
        result_id,
        req.shortlisted,
        req.reviewer_id,
    )
    .await?;
    Ok(Json(updated))
}

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub tenant_id: i64,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

/// GET /api/v1/employees/:employee_id/availability
pub async fn handle_availability(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let interval = Interval::new(params.start, params.end);
    let available =
        employee_availability(&state.db, params.tenant_id, employee_id, interval).await?;
    Ok(Json(serde_json::json!({
        "employee_id": employee_id,
        "available_percentage": available
    })))
}
