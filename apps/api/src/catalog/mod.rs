//! Catalog Store — narrow, tenant-scoped read projections over the
//! reference tables the matcher consumes. Every query binds `tenant_id`;
//! nothing here pulls nested graphs the matcher does not need.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::employee::{EmployeeRow, EmployeeSkillRow};
use crate::models::project::{ProjectRoleRow, ProjectRow};
use crate::models::skill::SkillRow;

/// Optional narrowing of the candidate pool for a matching run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateFilters {
    pub department_id: Option<i64>,
    pub min_experience_years: Option<i32>,
}

pub async fn get_role(
    pool: &PgPool,
    tenant_id: i64,
    role_id: i64,
) -> Result<Option<ProjectRoleRow>, AppError> {
    Ok(sqlx::query_as::<_, ProjectRoleRow>(
        "SELECT * FROM project_roles WHERE id = $1 AND tenant_id = $2",
    )
    .bind(role_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await?)
}

pub async fn get_project(
    pool: &PgPool,
    tenant_id: i64,
    project_id: i64,
) -> Result<Option<ProjectRow>, AppError> {
    Ok(sqlx::query_as::<_, ProjectRow>(
        "SELECT * FROM projects WHERE id = $1 AND tenant_id = $2",
    )
    .bind(project_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await?)
}

/// Active employees of the tenant, optionally narrowed by department and a
/// minimum-experience floor. The experience filter is applied as a hire-date
/// cutoff so it stays a single indexed query.
pub async fn list_candidates(
    pool: &PgPool,
    tenant_id: i64,
    filters: &CandidateFilters,
    today: NaiveDate,
) -> Result<Vec<EmployeeRow>, AppError> {
    let hire_cutoff = filters
        .min_experience_years
        .map(|years| today - Duration::days((years as f64 * 365.25) as i64));

    Ok(sqlx::query_as::<_, EmployeeRow>(
        r#"
        SELECT * FROM employees
        WHERE tenant_id = $1
          AND is_active = TRUE
          AND ($2::BIGINT IS NULL OR department_id = $2)
          AND ($3::DATE IS NULL OR hire_date <= $3)
        ORDER BY id
        "#,
    )
    .bind(tenant_id)
    .bind(filters.department_id)
    .bind(hire_cutoff)
    .fetch_all(pool)
    .await?)
}

/// Bulk-loads employee skills for a candidate set, keyed by employee id.
pub async fn load_skills_for(
    pool: &PgPool,
    tenant_id: i64,
    employee_ids: &[i64],
) -> Result<HashMap<i64, Vec<EmployeeSkillRow>>, AppError> {
    let rows = sqlx::query_as::<_, EmployeeSkillRow>(
        r#"
        SELECT * FROM employee_skills
        WHERE tenant_id = $1 AND employee_id = ANY($2)
        ORDER BY employee_id, skill_id
        "#,
    )
    .bind(tenant_id)
    .bind(employee_ids)
    .fetch_all(pool)
    .await?;

    let mut by_employee: HashMap<i64, Vec<EmployeeSkillRow>> = HashMap::new();
    for row in rows {
        by_employee.entry(row.employee_id).or_default().push(row);
    }
    Ok(by_employee)
}

/// The tenant's skill master, ordered by id so name-based fallback picks the
/// oldest row on ties. Loaded once per ingest batch for the resolver.
pub async fn list_tenant_skills(
    pool: &PgPool,
    tenant_id: i64,
) -> Result<Vec<SkillRow>, AppError> {
    Ok(
        sqlx::query_as::<_, SkillRow>(
            "SELECT * FROM skills WHERE tenant_id = $1 ORDER BY id",
        )
        .bind(tenant_id)
        .fetch_all(pool)
        .await?,
    )
}

pub async fn get_employee(
    pool: &PgPool,
    tenant_id: i64,
    employee_id: i64,
) -> Result<Option<EmployeeRow>, AppError> {
    Ok(sqlx::query_as::<_, EmployeeRow>(
        "SELECT * FROM employees WHERE id = $1 AND tenant_id = $2",
    )
    .bind(employee_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await?)
}
