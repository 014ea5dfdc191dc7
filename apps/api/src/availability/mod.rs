//! Availability Calculator — free capacity of an employee over an interval,
//! derived from the assignment ledger.
//!
//! Pure interval arithmetic lives here alongside the bulk loaders the
//! matching engine uses. Over-allocation is never rejected on write; it
//! simply drives availability to 0 and surfaces as a matching risk.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::assignment::AssignmentRow;

/// A date interval. `end = None` means open-ended (+∞).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl Interval {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }
}

/// Half-open overlap: [a,b) overlaps [c,d) iff a < d and c < b.
/// A `None` bound stands in for +∞ on either side.
fn overlaps(a_start: NaiveDate, a_end: Option<NaiveDate>, b: Interval) -> bool {
    let before_b_end = match b.end {
        Some(b_end) => a_start < b_end,
        None => true,
    };
    let before_a_end = match a_end {
        Some(a_end) => b.start < a_end,
        None => true,
    };
    before_b_end && before_a_end
}

/// Free allocation percentage of an employee over `interval`:
/// 100 minus the sum of overlapping active allocations, floored at 0.
pub fn free_capacity(assignments: &[AssignmentRow], interval: Interval) -> i32 {
    let booked: i32 = assignments
        .iter()
        .filter(|a| a.is_active)
        .filter(|a| overlaps(a.start_date, a.end_date, interval))
        .map(|a| a.allocation_percentage)
        .sum();
    (100 - booked).max(0)
}

/// Bulk-loads active assignments for a candidate set, keyed by employee id.
/// Employees without assignments are simply absent from the map.
pub async fn load_active_assignments(
    pool: &PgPool,
    tenant_id: i64,
    employee_ids: &[i64],
) -> Result<HashMap<i64, Vec<AssignmentRow>>, AppError> {
    let rows = sqlx::query_as::<_, AssignmentRow>(
        r#"
        SELECT * FROM assignments
        WHERE tenant_id = $1 AND employee_id = ANY($2) AND is_active = TRUE
        ORDER BY employee_id, start_date
        "#,
    )
    .bind(tenant_id)
    .bind(employee_ids)
    .fetch_all(pool)
    .await?;

    let mut by_employee: HashMap<i64, Vec<AssignmentRow>> = HashMap::new();
    for row in rows {
        by_employee.entry(row.employee_id).or_default().push(row);
    }
    Ok(by_employee)
}

/// Availability of a single employee over `interval`. NOT_FOUND when the
/// employee does not exist in the caller's tenant.
pub async fn employee_availability(
    pool: &PgPool,
    tenant_id: i64,
    employee_id: i64,
    interval: Interval,
) -> Result<i32, AppError> {
    if let Some(end) = interval.end {
        if interval.start > end {
            return Err(AppError::Validation(
                "Interval start must not be after end".to_string(),
            ));
        }
    }

    let exists: Option<i64> =
        sqlx::query_scalar("SELECT id FROM employees WHERE id = $1 AND tenant_id = $2")
            .bind(employee_id)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await?;
    if exists.is_none() {
        return Err(AppError::NotFound(format!(
            "Employee {employee_id} not found"
        )));
    }

    let assignments = load_active_assignments(pool, tenant_id, &[employee_id]).await?;
    Ok(free_capacity(
        assignments.get(&employee_id).map(Vec::as_slice).unwrap_or(&[]),
        interval,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assignment(alloc: i32, start: NaiveDate, end: Option<NaiveDate>, active: bool) -> AssignmentRow {
        AssignmentRow {
            id: 1,
            tenant_id: 1,
            employee_id: 1,
            role_id: None,
            allocation_percentage: alloc,
            start_date: start,
            end_date: end,
            is_active: active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_assignments_is_fully_available() {
        let q = Interval::new(date(2026, 1, 1), Some(date(2026, 6, 30)));
        assert_eq!(free_capacity(&[], q), 100);
    }

    #[test]
    fn test_overlapping_allocations_sum() {
        let q = Interval::new(date(2026, 1, 1), Some(date(2026, 6, 30)));
        let rows = vec![
            assignment(40, date(2025, 10, 1), Some(date(2026, 3, 1)), true),
            assignment(30, date(2026, 2, 1), None, true),
        ];
        assert_eq!(free_capacity(&rows, q), 30);
    }

    #[test]
    fn test_inactive_assignments_ignored() {
        let q = Interval::new(date(2026, 1, 1), Some(date(2026, 6, 30)));
        let rows = vec![assignment(80, date(2026, 1, 1), None, false)];
        assert_eq!(free_capacity(&rows, q), 100);
    }

    #[test]
    fn test_over_allocation_floors_at_zero() {
        let q = Interval::new(date(2026, 1, 1), Some(date(2026, 6, 30)));
        let rows = vec![
            assignment(80, date(2026, 1, 1), None, true),
            assignment(50, date(2026, 1, 1), None, true),
        ];
        assert_eq!(free_capacity(&rows, q), 0);
    }

    #[test]
    fn test_half_open_boundary_does_not_overlap() {
        // Assignment ends exactly where the query starts: [a,b) vs [b,c).
        let q = Interval::new(date(2026, 3, 1), Some(date(2026, 6, 1)));
        let rows = vec![assignment(60, date(2026, 1, 1), Some(date(2026, 3, 1)), true)];
        assert_eq!(free_capacity(&rows, q), 100);
    }

    #[test]
    fn test_open_ended_assignment_overlaps_everything_after_start() {
        let q = Interval::new(date(2030, 1, 1), Some(date(2030, 12, 31)));
        let rows = vec![assignment(25, date(2026, 1, 1), None, true)];
        assert_eq!(free_capacity(&rows, q), 75);
    }

    #[test]
    fn test_open_ended_query_interval() {
        // Project without an end date: query end = +∞.
        let q = Interval::new(date(2026, 1, 1), None);
        let rows = vec![assignment(50, date(2027, 1, 1), Some(date(2027, 6, 1)), true)];
        assert_eq!(free_capacity(&rows, q), 50);
    }

    #[test]
    fn test_assignment_entirely_before_interval() {
        let q = Interval::new(date(2026, 1, 1), None);
        let rows = vec![assignment(100, date(2024, 1, 1), Some(date(2025, 1, 1)), true)];
        assert_eq!(free_capacity(&rows, q), 100);
    }
}
