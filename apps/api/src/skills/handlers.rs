use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::errors::AppError;
use crate::skills::ingest::{ingest_employee_skills, SkillIngestRequest, SkillIngestResponse};
use crate::skills::resolver::{resolve, Resolution, ResolutionPath, NAME_FALLBACK_LEVELS};
use crate::state::AppState;

/// POST /api/v1/skills/ingest
pub async fn handle_skill_ingest(
    State(state): State<AppState>,
    Json(req): Json<SkillIngestRequest>,
) -> Result<Json<SkillIngestResponse>, AppError> {
    let response = ingest_employee_skills(&state.db, &req).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct ResolveSkillRequest {
    pub tenant_id: i64,
    pub skill_id: Option<i64>,
    pub name: String,
}

/// A clean miss is a 200 with `resolved_id: null` plus the exhausted
/// cascade levels, never an error.
#[derive(Debug, Serialize)]
pub struct ResolveSkillResponse {
    pub resolved_id: Option<i64>,
    pub via: Option<ResolutionPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried_levels: Option<Vec<&'static str>>,
}

fn miss_response(id_provided: bool) -> ResolveSkillResponse {
    let mut tried = Vec::with_capacity(NAME_FALLBACK_LEVELS.len() + 1);
    if id_provided {
        tried.push("validated_id");
    }
    tried.extend(NAME_FALLBACK_LEVELS);
    ResolveSkillResponse {
        resolved_id: None,
        via: None,
        tried_levels: Some(tried),
    }
}

/// POST /api/v1/skills/resolve
pub async fn handle_skill_resolve(
    State(state): State<AppState>,
    Json(req): Json<ResolveSkillRequest>,
) -> Result<Json<ResolveSkillResponse>, AppError> {
    let skill_master = catalog::list_tenant_skills(&state.db, req.tenant_id).await?;
    let response = match resolve(&skill_master, req.skill_id, &req.name) {
        Resolution::Match { skill_id, via } => ResolveSkillResponse {
            resolved_id: Some(skill_id),
            via: Some(via),
            tried_levels: None,
        },
        Resolution::Miss => miss_response(req.skill_id.is_some()),
    };
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_reports_exhausted_levels() {
        let with_id = miss_response(true);
        let levels = with_id.tried_levels.unwrap();
        assert_eq!(levels.len(), NAME_FALLBACK_LEVELS.len() + 1);
        assert_eq!(levels[0], "validated_id");

        let without_id = miss_response(false);
        assert_eq!(without_id.tried_levels.unwrap(), NAME_FALLBACK_LEVELS.to_vec());
        assert!(without_id.resolved_id.is_none());
    }
}
