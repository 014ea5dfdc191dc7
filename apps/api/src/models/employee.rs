use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Seniority ladder. Ordinals are used by the experience sub-score and the
/// growth assessment; stored as lowercase TEXT in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    Middle,
    Senior,
    Lead,
    Principal,
}

impl Seniority {
    /// 1 (Junior) .. 5 (Principal).
    pub fn ordinal(self) -> i32 {
        match self {
            Seniority::Junior => 1,
            Seniority::Middle => 2,
            Seniority::Senior => 3,
            Seniority::Lead => 4,
            Seniority::Principal => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Seniority::Junior => "junior",
            Seniority::Middle => "middle",
            Seniority::Senior => "senior",
            Seniority::Lead => "lead",
            Seniority::Principal => "principal",
        }
    }

    /// Parses the TEXT column value. Unknown or absent values map to None
    /// rather than an error: legacy rows may carry free-form seniority.
    pub fn parse(value: Option<&str>) -> Option<Seniority> {
        match value?.to_lowercase().as_str() {
            "junior" => Some(Seniority::Junior),
            "middle" => Some(Seniority::Middle),
            "senior" => Some(Seniority::Senior),
            "lead" => Some(Seniority::Lead),
            "principal" => Some(Seniority::Principal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeRow {
    pub id: i64,
    pub tenant_id: i64,
    pub hire_date: NaiveDate,
    pub department_id: Option<i64>,
    pub seniority: Option<String>,
    pub is_active: bool,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl EmployeeRow {
    pub fn seniority(&self) -> Option<Seniority> {
        Seniority::parse(self.seniority.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeSkillRow {
    pub id: i64,
    pub tenant_id: i64,
    pub employee_id: i64,
    pub skill_id: i64,
    /// Normalised 0–1 scale. Ingest converts 1–5 inputs on write.
    pub proficiency: f64,
    pub is_certified: bool,
    pub source: String,
    pub created_at: DateTime<Utc>,
}
