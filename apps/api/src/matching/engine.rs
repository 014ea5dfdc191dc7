//! Matching Engine — orchestrates a full matching run for one role:
//! candidate load, parallel scoring, threshold + top-K selection, and the
//! atomic replacement of the role's persisted result set.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use crate::availability::{free_capacity, load_active_assignments, Interval};
use crate::catalog::{self, CandidateFilters};
use crate::errors::AppError;
use crate::matching::scorer::{score_candidate, ScoredMatch};
use crate::models::project::ProjectRoleRow;

/// Results at or below this total are not persisted.
pub const MIN_TOTAL_SCORE: i32 = 30;
/// At most this many results are persisted per role.
pub const MAX_PERSISTED_MATCHES: usize = 20;
/// At most this many results are returned inline with employee detail.
pub const MAX_INLINE_MATCHES: usize = 10;
/// Results at or above this total are auto-shortlisted.
pub const SHORTLIST_THRESHOLD: i32 = 70;

/// Single decision point for auto-shortlisting; persistence and the inline
/// top list must agree on it.
fn auto_shortlisted(total: i32) -> bool {
    total >= SHORTLIST_THRESHOLD
}

#[derive(Debug, Serialize)]
pub struct TopMatch {
    pub employee_id: i64,
    pub full_name: String,
    pub seniority: Option<String>,
    pub total_score: i32,
    pub skills_score: i32,
    pub availability_score: i32,
    pub experience_score: i32,
    pub preference_score: i32,
    pub suggested_allocation: i32,
    pub is_shortlisted: bool,
}

#[derive(Debug, Serialize)]
pub struct RunMatchingSummary {
    pub role_id: i64,
    pub total_candidates: usize,
    pub qualified_matches: usize,
    pub top_matches: Vec<TopMatch>,
}

/// Runs matching for `role_id` and atomically replaces its result set.
///
/// The whole candidate pool is scored with bounded fan-out; scoring is pure,
/// so completion order is irrelevant — results are sorted before persistence.
/// A per-role advisory lock serialises concurrent runs: the loser gets a
/// retryable CONFLICT instead of interleaving partial sets.
pub async fn run_matching(
    pool: &PgPool,
    tenant_id: i64,
    role_id: i64,
    filters: &CandidateFilters,
    concurrency: usize,
) -> Result<RunMatchingSummary, AppError> {
    let started = Instant::now();
    let run_id = Uuid::new_v4();

    // Tenant scoping happens in the queries: a role owned by another tenant
    // is indistinguishable from a missing one.
    let role = catalog::get_role(pool, tenant_id, role_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role {role_id} not found")))?;
    let project = catalog::get_project(pool, tenant_id, role.project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {} not found", role.project_id)))?;

    let today = Utc::now().date_naive();
    let interval = Interval::new(project.start_date, project.end_date);

    let candidates = catalog::list_candidates(pool, tenant_id, filters, today).await?;
    let total_candidates = candidates.len();
    let candidate_ids: Vec<i64> = candidates.iter().map(|e| e.id).collect();

    let mut skills_by_employee = catalog::load_skills_for(pool, tenant_id, &candidate_ids).await?;
    let mut assignments_by_employee =
        load_active_assignments(pool, tenant_id, &candidate_ids).await?;

    // Employee detail for the inline top list, kept before ownership moves
    // into the scoring tasks.
    let employee_detail: HashMap<i64, (String, Option<String>)> = candidates
        .iter()
        .map(|e| (e.id, (e.full_name.clone(), e.seniority.clone())))
        .collect();

    let role = Arc::new(role);
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks: JoinSet<ScoredMatch> = JoinSet::new();

    for candidate in candidates {
        let role = Arc::clone(&role);
        let semaphore = Arc::clone(&semaphore);
        let skills = skills_by_employee.remove(&candidate.id).unwrap_or_default();
        let assignments = assignments_by_employee
            .remove(&candidate.id)
            .unwrap_or_default();

        tasks.spawn(async move {
            // The semaphore is never closed; a failed acquire just means
            // this task runs unbounded.
            let _permit = semaphore.acquire_owned().await.ok();
            let available = free_capacity(&assignments, interval);
            score_candidate(&candidate, &skills, &role, available, today)
        });
    }

    let mut scored = Vec::with_capacity(total_candidates);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => scored.push(result),
            // A panicked scoring task skips that candidate; never a partial row.
            Err(e) => warn!(run_id = %run_id, role_id, "Candidate scoring failed, skipping: {e}"),
        }
    }

    let qualified = select_qualified(scored);
    let qualified_count = qualified.len();

    persist_result_set(pool, tenant_id, &role, &qualified).await?;

    info!(
        run_id = %run_id,
        role_id,
        candidates_evaluated = total_candidates,
        qualified_count,
        threshold = MIN_TOTAL_SCORE,
        duration_ms = started.elapsed().as_millis() as u64,
        "Matching run completed"
    );

    let top_matches = qualified
        .iter()
        .take(MAX_INLINE_MATCHES)
        .map(|m| {
            let (full_name, seniority) = employee_detail
                .get(&m.employee_id)
                .cloned()
                .unwrap_or_default();
            TopMatch {
                employee_id: m.employee_id,
                full_name,
                seniority,
                total_score: m.total,
                skills_score: m.sub.skills,
                availability_score: m.sub.availability,
                experience_score: m.sub.experience,
                preference_score: m.sub.preference,
                suggested_allocation: m.suggested_allocation,
                is_shortlisted: auto_shortlisted(m.total),
            }
        })
        .collect();

    Ok(RunMatchingSummary {
        role_id,
        total_candidates,
        qualified_matches: qualified_count,
        top_matches,
    })
}

/// Threshold filter, deterministic ordering (total desc, employee id asc as
/// tiebreaker), top-K truncation.
fn select_qualified(scored: Vec<ScoredMatch>) -> Vec<ScoredMatch> {
    let mut qualified: Vec<ScoredMatch> = scored
        .into_iter()
        .filter(|m| m.total > MIN_TOTAL_SCORE)
        .collect();
    qualified.sort_by(|a, b| b.total.cmp(&a.total).then(a.employee_id.cmp(&b.employee_id)));
    qualified.truncate(MAX_PERSISTED_MATCHES);
    qualified
}

/// Replaces the role's result set in one transaction under a per-role
/// advisory lock. Delete and insert commit together or not at all; an abort
/// at any point leaves the prior set intact.
async fn persist_result_set(
    pool: &PgPool,
    tenant_id: i64,
    role: &ProjectRoleRow,
    matches: &[ScoredMatch],
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let locked: bool = sqlx::query_scalar("SELECT pg_try_advisory_xact_lock($1)")
        .bind(role.id)
        .fetch_one(&mut *tx)
        .await?;
    if !locked {
        return Err(AppError::Conflict(format!(
            "A matching run for role {} is already in progress",
            role.id
        )));
    }

    sqlx::query("DELETE FROM match_results WHERE role_id = $1 AND tenant_id = $2")
        .bind(role.id)
        .bind(tenant_id)
        .execute(&mut *tx)
        .await?;

    for m in matches {
        sqlx::query(
            r#"
            INSERT INTO match_results
                (tenant_id, role_id, employee_id, total_score, skills_score,
                 availability_score, experience_score, preference_score,
                 reasoning, risks, growth, suggested_allocation, is_shortlisted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(tenant_id)
        .bind(role.id)
        .bind(m.employee_id)
        .bind(m.total)
        .bind(m.sub.skills)
        .bind(m.sub.availability)
        .bind(m.sub.experience)
        .bind(m.sub.preference)
        .bind(Json(&m.reasoning))
        .bind(Json(&m.risks))
        .bind(Json(&m.growth))
        .bind(m.suggested_allocation)
        .bind(auto_shortlisted(m.total))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
