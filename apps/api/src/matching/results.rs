//! Result Store — reads over the persisted result set of a role and the
//! reviewer-facing shortlist toggle. Writes that replace whole sets live in
//! the engine; this module never mutates scores.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::matching::MatchResultRow;

/// Persisted matches for a role, highest total first.
pub async fn list_matches(
    pool: &PgPool,
    tenant_id: i64,
    role_id: i64,
    shortlisted_only: bool,
) -> Result<Vec<MatchResultRow>, AppError> {
    Ok(sqlx::query_as::<_, MatchResultRow>(
        r#"
        SELECT * FROM match_results
        WHERE tenant_id = $1 AND role_id = $2
          AND ($3 = FALSE OR is_shortlisted = TRUE)
        ORDER BY total_score DESC, employee_id
        "#,
    )
    .bind(tenant_id)
    .bind(role_id)
    .bind(shortlisted_only)
    .fetch_all(pool)
    .await?)
}

/// Sets or clears the shortlist flag, stamping reviewer and review time.
/// Idempotent: repeating a call only refreshes the reviewer metadata.
pub async fn set_shortlist(
    pool: &PgPool,
    tenant_id: i64,
    result_id: i64,
    shortlisted: bool,
    reviewer_id: i64,
) -> Result<MatchResultRow, AppError> {
    sqlx::query_as::<_, MatchResultRow>(
        r#"
        UPDATE match_results
        SET is_shortlisted = $1, reviewer_id = $2, reviewed_at = NOW()
        WHERE id = $3 AND tenant_id = $4
        RETURNING *
        "#,
    )
    .bind(shortlisted)
    .bind(reviewer_id)
    .bind(result_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Match result {result_id} not found")))
}
