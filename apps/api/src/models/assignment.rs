use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One booked allocation of an employee. `role_id` is NULL for
/// administrative allocations (internal duties, long leave).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssignmentRow {
    pub id: i64,
    pub tenant_id: i64,
    pub employee_id: i64,
    pub role_id: Option<i64>,
    pub allocation_percentage: i32,
    pub start_date: NaiveDate,
    /// None = ongoing; treated as ending at +∞.
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
