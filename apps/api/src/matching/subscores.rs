//! The four sub-score calculators. Each is a pure function returning an
//! integer in 0..=100, independently auditable.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::employee::{EmployeeSkillRow, Seniority};
use crate::models::project::ProjectRoleRow;

/// Skills match: coverage of the must-have set, with certification and
/// soft-skill bonuses that express preference without dominating.
pub fn skills_match(role: &ProjectRoleRow, employee_skills: &[EmployeeSkillRow]) -> i32 {
    let owned: HashSet<i64> = employee_skills.iter().map(|s| s.skill_id).collect();

    // Coverage of the must-have set; neutral 50 when the role lists none.
    let required = &role.required_skills;
    let mut score = if required.is_empty() {
        50.0
    } else {
        let covered = required.iter().filter(|id| owned.contains(id)).count();
        100.0 * covered as f64 / required.len() as f64
    };

    if !role.required_certifications.is_empty() {
        let certified = employee_skills.iter().filter(|s| s.is_certified).count();
        let cert_bonus = (10.0 * certified as f64).min(20.0);
        score = (score + cert_bonus) / 2.0;
    }

    if !role.preferred_skills.is_empty() {
        let overlap = role
            .preferred_skills
            .iter()
            .filter(|id| owned.contains(id))
            .count();
        if overlap > 0 {
            let soft_bonus = (5.0 * overlap as f64).min(20.0);
            score = (score + soft_bonus).min(100.0);
        }
    }

    score.round() as i32
}

/// Availability match: tiered comparison of free capacity `available`
/// against the role's requested allocation.
pub fn availability_match(role_allocation: i32, available: i32) -> i32 {
    if role_allocation <= 0 {
        return 100;
    }
    let requested = role_allocation as f64;
    let free = available as f64;
    if free >= requested {
        100
    } else if free >= 0.75 * requested {
        75
    } else if free >= 0.5 * requested {
        50
    } else {
        (100.0 * free / requested).round() as i32
    }
}

/// Tenure in whole years, 365.25-day years.
pub fn experience_years(hire_date: NaiveDate, today: NaiveDate) -> i32 {
    let days = (today - hire_date).num_days();
    if days <= 0 {
        return 0;
    }
    (days as f64 / 365.25).floor() as i32
}

/// Experience match: tenure against the role's experience floors plus a
/// seniority-ladder comparison. One step below the target counts as a
/// growth placement.
pub fn experience_match(
    hire_date: NaiveDate,
    seniority: Option<Seniority>,
    role: &ProjectRoleRow,
    today: NaiveDate,
) -> i32 {
    let years = experience_years(hire_date, today);
    let mut score = 50;

    if let Some(required) = role.min_experience_years {
        if years >= required {
            score += 30;
        }
    }
    if let Some(preferred) = role.preferred_experience_years {
        if years >= preferred {
            score += 20;
        }
    }

    if let (Some(own), Some(target)) = (seniority, role.seniority()) {
        if own.ordinal() >= target.ordinal() {
            score += 20;
        } else if own.ordinal() == target.ordinal() - 1 {
            score += 10;
        }
    }

    score.min(100)
}

/// Preference match: structural placeholder until per-employee preference
/// data exists. Role hints add flat bonuses so absence is never penalised.
pub fn preference_match(role: &ProjectRoleRow) -> i32 {
    let mut score = 50;
    if role.work_mode.is_some() {
        score += 20;
    }
    if role.location.is_some() {
        score += 15;
    }
    if !role.required_languages.is_empty() {
        score += 15;
    }
    score.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::test_fixtures::{employee_skill, role};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_skills_empty_required_set_is_neutral() {
        let role = role(|r| r.required_skills = vec![]);
        assert_eq!(skills_match(&role, &[]), 50);
        assert_eq!(skills_match(&role, &[employee_skill(1, false)]), 50);
    }

    #[test]
    fn test_skills_full_coverage() {
        let role = role(|r| r.required_skills = vec![1, 2]);
        let owned = vec![employee_skill(1, false), employee_skill(2, false)];
        assert_eq!(skills_match(&role, &owned), 100);
    }

    #[test]
    fn test_skills_partial_coverage() {
        let role = role(|r| r.required_skills = vec![1, 2]);
        assert_eq!(skills_match(&role, &[employee_skill(1, false)]), 50);

        let role = role_with_ten_required();
        let nine: Vec<_> = (1..=9).map(|id| employee_skill(id, false)).collect();
        assert_eq!(skills_match(&role, &nine), 90);
    }

    fn role_with_ten_required() -> crate::models::project::ProjectRoleRow {
        role(|r| r.required_skills = (1..=10).collect())
    }

    #[test]
    fn test_skills_certification_requirement_reaverages() {
        let role = role(|r| {
            r.required_skills = vec![1];
            r.required_certifications = vec!["AWS SA".to_string()];
        });
        // base 100, one certified skill → (100 + 10) / 2 = 55
        let owned = vec![employee_skill(1, true)];
        assert_eq!(skills_match(&role, &owned), 55);
        // cert bonus caps at 20: (100 + 20) / 2 = 60
        let owned: Vec<_> = vec![
            employee_skill(1, true),
            employee_skill(2, true),
            employee_skill(3, true),
        ];
        assert_eq!(skills_match(&role, &owned), 60);
    }

    #[test]
    fn test_skills_soft_bonus_capped_at_100() {
        let role = role(|r| {
            r.required_skills = vec![1];
            r.preferred_skills = vec![2, 3];
        });
        let owned = vec![
            employee_skill(1, false),
            employee_skill(2, false),
            employee_skill(3, false),
        ];
        // base 100 + min(20, 5*2) capped at 100
        assert_eq!(skills_match(&role, &owned), 100);
    }

    #[test]
    fn test_skills_soft_bonus_without_overlap_adds_nothing() {
        let role = role(|r| {
            r.required_skills = vec![1];
            r.preferred_skills = vec![9];
        });
        assert_eq!(skills_match(&role, &[employee_skill(1, false)]), 100);
        assert_eq!(skills_match(&role, &[]), 0);
    }

    #[test]
    fn test_availability_tiers() {
        assert_eq!(availability_match(100, 100), 100);
        assert_eq!(availability_match(100, 120), 100);
        assert_eq!(availability_match(100, 80), 75);
        assert_eq!(availability_match(100, 75), 75);
        assert_eq!(availability_match(100, 60), 50);
        assert_eq!(availability_match(100, 50), 50);
        assert_eq!(availability_match(100, 40), 40);
        assert_eq!(availability_match(100, 0), 0);
    }

    #[test]
    fn test_availability_tiers_scale_with_requested_allocation() {
        assert_eq!(availability_match(50, 50), 100);
        assert_eq!(availability_match(50, 40), 75);
        assert_eq!(availability_match(50, 25), 50);
        assert_eq!(availability_match(50, 20), 40);
    }

    #[test]
    fn test_experience_years_floors() {
        let hired = date(2023, 8, 29);
        assert_eq!(experience_years(hired, date(2026, 8, 28)), 2);
        assert_eq!(experience_years(hired, date(2026, 8, 30)), 3);
        assert_eq!(experience_years(hired, date(2023, 1, 1)), 0);
    }

    #[test]
    fn test_experience_floors_and_seniority_bonuses() {
        let role = role(|r| {
            r.min_experience_years = Some(2);
            r.preferred_experience_years = Some(5);
            r.seniority = Some("middle".to_string());
        });
        let today = date(2026, 8, 29);

        // 3y tenure, matching seniority: 50 + 30 + 0 + 20
        let s = experience_match(date(2023, 6, 1), Some(Seniority::Middle), &role, today);
        assert_eq!(s, 100);

        // 1y tenure, one step below target: 50 + 0 + 0 + 10
        let s = experience_match(date(2025, 6, 1), Some(Seniority::Junior), &role, today);
        assert_eq!(s, 60);

        // 6y tenure, above target: 50 + 30 + 20 + 20 → capped
        let s = experience_match(date(2020, 6, 1), Some(Seniority::Lead), &role, today);
        assert_eq!(s, 100);
    }

    #[test]
    fn test_experience_without_seniority_data_skips_ladder_bonus() {
        let role = role(|r| {
            r.min_experience_years = Some(2);
            r.seniority = Some("middle".to_string());
        });
        let s = experience_match(date(2020, 6, 1), None, &role, date(2026, 8, 29));
        assert_eq!(s, 80);
    }

    #[test]
    fn test_preference_is_floor_plus_role_hints() {
        assert_eq!(preference_match(&role(|_| {})), 50);

        let hinted = role(|r| {
            r.work_mode = Some("remote".to_string());
            r.location = Some("Berlin".to_string());
            r.required_languages = vec!["de".to_string()];
        });
        assert_eq!(preference_match(&hinted), 100);
    }
}
