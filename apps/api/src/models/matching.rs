use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Explainable reasoning attached to every match result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reasoning {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    /// "excellent" | "good" | "partial" | "limited"
    pub overall: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    Availability,
    Skills,
    Experience,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Risk {
    #[serde(rename = "type")]
    pub risk_type: RiskType,
    pub level: RiskLevel,
    pub description: String,
}

/// Growth assessment: what the candidate would gain from the role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Growth {
    pub skill_development: bool,
    pub career_advancement: bool,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchResultRow {
    pub id: i64,
    pub tenant_id: i64,
    pub role_id: i64,
    pub employee_id: i64,
    pub total_score: i32,
    pub skills_score: i32,
    pub availability_score: i32,
    pub experience_score: i32,
    pub preference_score: i32,
    pub reasoning: Json<Reasoning>,
    pub risks: Json<Vec<Risk>>,
    pub growth: Json<Growth>,
    pub suggested_allocation: i32,
    pub is_shortlisted: bool,
    pub reviewer_id: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
