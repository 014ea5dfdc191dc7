//! Match Scorer — composes the four sub-scores into a full, explainable
//! match: weighted total, reasoning, risk flags, growth assessment, and a
//! suggested allocation. Deterministic and side-effect free, so retries and
//! parallel fan-out are safe.

use chrono::NaiveDate;
use serde::Serialize;

use crate::matching::subscores::{
    availability_match, experience_match, preference_match, skills_match,
};
use crate::models::employee::{EmployeeRow, EmployeeSkillRow};
use crate::models::matching::{Growth, Reasoning, Risk, RiskLevel, RiskType};
use crate::models::project::ProjectRoleRow;

/// Fixed composition weights. Skills dominate; preference is a tiebreaker.
#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub skills: f64,
    pub availability: f64,
    pub experience: f64,
    pub preference: f64,
}

pub const MATCH_WEIGHTS: Weights = Weights {
    skills: 0.4,
    availability: 0.3,
    experience: 0.2,
    preference: 0.1,
};

impl Weights {
    pub fn sum(&self) -> f64 {
        self.skills + self.availability + self.experience + self.preference
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubScores {
    pub skills: i32,
    pub availability: i32,
    pub experience: i32,
    pub preference: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredMatch {
    pub employee_id: i64,
    pub total: i32,
    pub sub: SubScores,
    pub reasoning: Reasoning,
    pub risks: Vec<Risk>,
    pub growth: Growth,
    pub suggested_allocation: i32,
}

pub fn compose_total(sub: &SubScores) -> i32 {
    let w = MATCH_WEIGHTS;
    (w.skills * sub.skills as f64
        + w.availability * sub.availability as f64
        + w.experience * sub.experience as f64
        + w.preference * sub.preference as f64)
        .round() as i32
}

/// Scores one candidate against a role. `available` is the employee's free
/// capacity over the role's project interval; `today` is injected so the
/// tenure calculation stays deterministic under test.
pub fn score_candidate(
    employee: &EmployeeRow,
    employee_skills: &[EmployeeSkillRow],
    role: &ProjectRoleRow,
    available: i32,
    today: NaiveDate,
) -> ScoredMatch {
    let sub = SubScores {
        skills: skills_match(role, employee_skills),
        availability: availability_match(role.allocation_percentage, available),
        experience: experience_match(employee.hire_date, employee.seniority(), role, today),
        preference: preference_match(role),
    };

    ScoredMatch {
        employee_id: employee.id,
        total: compose_total(&sub),
        reasoning: build_reasoning(&sub),
        risks: assess_risks(&sub, role),
        growth: assess_growth(&sub, employee, role),
        suggested_allocation: suggest_allocation(&sub, role.allocation_percentage, available),
        sub,
    }
}

fn build_reasoning(sub: &SubScores) -> Reasoning {
    let mut strengths = Vec::new();
    if sub.skills >= 80 {
        strengths.push(format!("Strong coverage of the required skills ({}/100)", sub.skills));
    }
    if sub.availability >= 80 {
        strengths.push(format!(
            "Free capacity fits the requested allocation ({}/100)",
            sub.availability
        ));
    }
    if sub.experience >= 80 {
        strengths.push(format!(
            "Tenure and seniority meet the role target ({}/100)",
            sub.experience
        ));
    }
    if sub.preference >= 80 {
        strengths.push(format!("Role conditions align well ({}/100)", sub.preference));
    }

    let mut weaknesses = Vec::new();
    if sub.skills < 50 {
        weaknesses.push(format!(
            "Covers less than half of the required skills ({}/100)",
            sub.skills
        ));
    }
    if sub.availability < 50 {
        weaknesses.push(format!(
            "Limited free capacity for this allocation ({}/100)",
            sub.availability
        ));
    }

    let average = (sub.skills + sub.availability + sub.experience + sub.preference) as f64 / 4.0;
    let overall = if average >= 80.0 {
        "excellent"
    } else if average >= 60.0 {
        "good"
    } else if average >= 40.0 {
        "partial"
    } else {
        "limited"
    };

    Reasoning {
        strengths,
        weaknesses,
        overall: overall.to_string(),
    }
}

fn assess_risks(sub: &SubScores, role: &ProjectRoleRow) -> Vec<Risk> {
    let mut risks = Vec::new();

    if sub.availability < 100 {
        risks.push(Risk {
            risk_type: RiskType::Availability,
            level: if sub.availability < 50 {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            },
            description: "Existing assignments reduce free capacity below the requested allocation"
                .to_string(),
        });
    }

    if sub.skills < 70 {
        risks.push(Risk {
            risk_type: RiskType::Skills,
            level: if sub.skills < 40 {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            },
            description: "Required skill coverage is incomplete; ramp-up time expected".to_string(),
        });
    }

    if role.is_critical && sub.experience < 60 {
        risks.push(Risk {
            risk_type: RiskType::Experience,
            level: RiskLevel::High,
            description: "Experience below target for a critical role".to_string(),
        });
    }

    risks
}

fn assess_growth(sub: &SubScores, employee: &EmployeeRow, role: &ProjectRoleRow) -> Growth {
    let skill_development = (60..90).contains(&sub.skills);

    let career_advancement = match (employee.seniority(), role.seniority()) {
        (Some(own), Some(target)) => target.ordinal() == own.ordinal() + 1,
        _ => false,
    };

    let mut score = 0;
    if skill_development {
        score += 30;
    }
    if career_advancement {
        score += 40;
    }

    Growth {
        skill_development,
        career_advancement,
        score,
    }
}

/// Full allocation when capacity allows; otherwise everything the candidate
/// has free for strong fits, and a reduced 75%-of-ask ceiling for the rest.
fn suggest_allocation(sub: &SubScores, requested: i32, available: i32) -> i32 {
    if available >= requested {
        requested
    } else if sub.skills >= 80 && sub.experience >= 70 {
        available.min(requested)
    } else {
        available.min((0.75 * requested as f64).round() as i32)
    }
}
