use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Canonical skill master row. Display names are not unique; only the id
/// disambiguates.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: i64,
    pub tenant_id: i64,
    pub name: String,
    pub known_name: Option<String>,
    pub synonyms: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Provenance of an employee-skill row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillSource {
    CvExtracted,
    Manual,
    Imported,
}

impl SkillSource {
    pub fn as_str(self) -> &'static str {
        match self {
            SkillSource::CvExtracted => "cv_extracted",
            SkillSource::Manual => "manual",
            SkillSource::Imported => "imported",
        }
    }
}
