//! Shared builders for matching tests.

use chrono::{NaiveDate, Utc};

use crate::models::employee::{EmployeeRow, EmployeeSkillRow};
use crate::models::project::ProjectRoleRow;

pub fn role(build: impl FnOnce(&mut ProjectRoleRow)) -> ProjectRoleRow {
    let mut row = ProjectRoleRow {
        id: 10,
        tenant_id: 1,
        project_id: 100,
        title: "Backend Engineer".to_string(),
        seniority: None,
        allocation_percentage: 100,
        required_skills: vec![],
        preferred_skills: vec![],
        required_certifications: vec![],
        required_languages: vec![],
        min_experience_years: None,
        preferred_experience_years: None,
        work_mode: None,
        location: None,
        is_critical: false,
        is_urgent: false,
        status: "OPEN".to_string(),
        created_at: Utc::now(),
    };
    build(&mut row);
    row
}

pub fn employee(id: i64, hire_date: NaiveDate, seniority: Option<&str>) -> EmployeeRow {
    EmployeeRow {
        id,
        tenant_id: 1,
        hire_date,
        department_id: None,
        seniority: seniority.map(String::from),
        is_active: true,
        full_name: format!("Employee {id}"),
        created_at: Utc::now(),
    }
}

pub fn employee_skill(skill_id: i64, certified: bool) -> EmployeeSkillRow {
    EmployeeSkillRow {
        id: skill_id,
        tenant_id: 1,
        employee_id: 1,
        skill_id,
        proficiency: 0.8,
        is_certified: certified,
        source: "manual".to_string(),
        created_at: Utc::now(),
    }
}
