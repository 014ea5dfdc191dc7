use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub tenant_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    /// None = open-ended project; availability treats it as +∞.
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRoleRow {
    pub id: i64,
    pub tenant_id: i64,
    pub project_id: i64,
    pub title: String,
    pub seniority: Option<String>,
    pub allocation_percentage: i32,
    /// Canonical skill ids. Must-have set for the skills sub-score.
    pub required_skills: Vec<i64>,
    /// Canonical skill ids. Nice-to-have; bonus only.
    pub preferred_skills: Vec<i64>,
    pub required_certifications: Vec<String>,
    pub required_languages: Vec<String>,
    pub min_experience_years: Option<i32>,
    pub preferred_experience_years: Option<i32>,
    pub work_mode: Option<String>,
    pub location: Option<String>,
    pub is_critical: bool,
    pub is_urgent: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl ProjectRoleRow {
    pub fn seniority(&self) -> Option<crate::models::employee::Seniority> {
        crate::models::employee::Seniority::parse(self.seniority.as_deref())
    }
}
