//! Employee-skill ingest — the write-side discipline the matcher depends on.
//!
//! Externally extracted skills arrive as (id?, name) pairs plus proficiency.
//! Each item is resolved against the tenant skill master; resolved rows are
//! upserted, misses are skipped and reported back. Unresolved skills are
//! never persisted.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;

use crate::catalog;
use crate::errors::AppError;
use crate::skills::resolver::{resolve, Resolution, ResolutionCounters};

use crate::models::skill::SkillSource;

/// One skill as reported by CV extraction or an import feed.
/// `proficiency` accepts either the normalised 0–1 scale or a legacy 1–5
/// rating; values above 1 are divided by 5 on write.
#[derive(Debug, Deserialize)]
pub struct ExtractedSkill {
    pub skill_id: Option<i64>,
    pub name: String,
    pub proficiency: f64,
    #[serde(default)]
    pub is_certified: bool,
    pub source: Option<SkillSource>,
}

#[derive(Debug, Deserialize)]
pub struct SkillIngestRequest {
    pub tenant_id: i64,
    pub employee_id: i64,
    pub skills: Vec<ExtractedSkill>,
}

#[derive(Debug, Serialize)]
pub struct SkillIngestResponse {
    pub resolved: usize,
    /// Names that did not resolve; left to human review.
    pub skipped: Vec<String>,
    pub counters: ResolutionCounters,
}

pub async fn ingest_employee_skills(
    pool: &PgPool,
    request: &SkillIngestRequest,
) -> Result<SkillIngestResponse, AppError> {
    let employee = catalog::get_employee(pool, request.tenant_id, request.employee_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Employee {} not found", request.employee_id))
        })?;

    let skill_master = catalog::list_tenant_skills(pool, request.tenant_id).await?;

    let mut counters = ResolutionCounters::default();
    let mut resolved = 0usize;
    let mut skipped = Vec::new();

    for item in &request.skills {
        let proficiency = normalize_proficiency(item.proficiency)?;
        let resolution = resolve(&skill_master, item.skill_id, &item.name);
        counters.record(item.skill_id.is_some(), &resolution);

        match resolution {
            Resolution::Match { skill_id, .. } => {
                upsert_employee_skill(
                    pool,
                    request.tenant_id,
                    employee.id,
                    skill_id,
                    proficiency,
                    item.is_certified,
                    item.source.unwrap_or(SkillSource::CvExtracted),
                )
                .await?;
                resolved += 1;
            }
            Resolution::Miss => skipped.push(item.name.clone()),
        }
    }

    info!(
        employee_id = request.employee_id,
        resolved,
        skipped = skipped.len(),
        validated_id = counters.validated_id,
        fallback = counters.fallback,
        id_discarded = counters.id_discarded,
        not_found = counters.not_found,
        "Skill ingest completed"
    );

    Ok(SkillIngestResponse {
        resolved,
        skipped,
        counters,
    })
}

/// Collapses the two scales seen in the wild onto 0–1.
fn normalize_proficiency(value: f64) -> Result<f64, AppError> {
    if !(0.0..=5.0).contains(&value) {
        return Err(AppError::Validation(format!(
            "Proficiency must be within 0..=5, got {value}"
        )));
    }
    if value > 1.0 {
        Ok(value / 5.0)
    } else {
        Ok(value)
    }
}

async fn upsert_employee_skill(
    pool: &PgPool,
    tenant_id: i64,
    employee_id: i64,
    skill_id: i64,
    proficiency: f64,
    is_certified: bool,
    source: SkillSource,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO employee_skills
            (tenant_id, employee_id, skill_id, proficiency, is_certified, source)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (employee_id, skill_id) DO UPDATE
            SET proficiency = EXCLUDED.proficiency,
                is_certified = EXCLUDED.is_certified,
                source = EXCLUDED.source
        "#,
    )
    .bind(tenant_id)
    .bind(employee_id)
    .bind(skill_id)
    .bind(proficiency)
    .bind(is_certified)
    .bind(source.as_str())
    .execute(pool)
    .await?;
    Ok(())
}
