//! Skill Resolver — maps an externally supplied (id?, name) pair to a
//! canonical skill id, deterministically.
//!
//! A provided id is only trusted when its row's names corroborate the
//! supplied name; otherwise the id is discarded and name-based fallback
//! takes over. The resolver never creates skills and never errors on a
//! clean miss — unresolved skills are the caller's decision to drop or
//! queue for review.
//!
//! Resolution runs against an in-memory tenant skill snapshot (the skill
//! master is small reference data), which keeps the cascade pure and the
//! fallback order byte-for-byte testable.

use serde::Serialize;

use crate::models::skill::SkillRow;

/// Which step of the cascade produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPath {
    ValidatedId,
    ExactName,
    ExactKnownName,
    NameContains,
    KnownNameContains,
    Synonym,
}

/// Name-based fallback levels in cascade order, for miss reporting.
pub const NAME_FALLBACK_LEVELS: [&str; 5] = [
    "exact_name",
    "exact_known_name",
    "name_contains",
    "known_name_contains",
    "synonym",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Match { skill_id: i64, via: ResolutionPath },
    Miss,
}

/// Acceptance counters surfaced to callers for observability.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ResolutionCounters {
    pub validated_id: u32,
    pub fallback: u32,
    pub id_discarded: u32,
    pub not_found: u32,
}

impl ResolutionCounters {
    pub fn record(&mut self, id_provided: bool, resolution: &Resolution) {
        match resolution {
            Resolution::Match {
                via: ResolutionPath::ValidatedId,
                ..
            } => self.validated_id += 1,
            Resolution::Match { .. } => {
                self.fallback += 1;
                if id_provided {
                    self.id_discarded += 1;
                }
            }
            Resolution::Miss => {
                self.not_found += 1;
                if id_provided {
                    self.id_discarded += 1;
                }
            }
        }
    }
}

/// Resolves `(candidate_id, name)` against the tenant skill snapshot.
///
/// Order: validated id, exact canonical name, exact known-name, canonical
/// name contains, known-name contains, synonym. First hit wins; `skills`
/// is expected in id order so substring ties go to the oldest row.
pub fn resolve(skills: &[SkillRow], candidate_id: Option<i64>, name: &str) -> Resolution {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return Resolution::Miss;
    }

    // 1. Validate a provided id against its own row's names. A mismatch
    //    means the id is untrustworthy; fall through to name lookup.
    if let Some(id) = candidate_id {
        if let Some(row) = skills.iter().find(|s| s.id == id) {
            if names_corroborate(row, &needle) {
                return Resolution::Match {
                    skill_id: row.id,
                    via: ResolutionPath::ValidatedId,
                };
            }
        }
    }

    // 2. Exact canonical name.
    if let Some(row) = skills.iter().find(|s| s.name.to_lowercase() == needle) {
        return Resolution::Match {
            skill_id: row.id,
            via: ResolutionPath::ExactName,
        };
    }

    // 3. Exact known-name alias.
    if let Some(row) = skills
        .iter()
        .find(|s| matches_exact(s.known_name.as_deref(), &needle))
    {
        return Resolution::Match {
            skill_id: row.id,
            via: ResolutionPath::ExactKnownName,
        };
    }

    // 4. Canonical name contains the supplied name.
    if let Some(row) = skills
        .iter()
        .find(|s| s.name.to_lowercase().contains(&needle))
    {
        return Resolution::Match {
            skill_id: row.id,
            via: ResolutionPath::NameContains,
        };
    }

    // 5. Known-name alias contains the supplied name.
    if let Some(row) = skills
        .iter()
        .find(|s| matches_contains(s.known_name.as_deref(), &needle))
    {
        return Resolution::Match {
            skill_id: row.id,
            via: ResolutionPath::KnownNameContains,
        };
    }

    // 6. Synonym set.
    if let Some(row) = skills
        .iter()
        .find(|s| s.synonyms.iter().any(|syn| syn.to_lowercase() == needle))
    {
        return Resolution::Match {
            skill_id: row.id,
            via: ResolutionPath::Synonym,
        };
    }

    Resolution::Miss
}

/// Id validation: the row's canonical name, known-name, or any synonym
/// equals the supplied name, or canonical/known-name and the supplied name
/// substring-contain each other.
fn names_corroborate(row: &SkillRow, needle: &str) -> bool {
    let canonical = row.name.to_lowercase();
    if canonical == *needle || canonical.contains(needle) || needle.contains(&canonical) {
        return true;
    }
    if let Some(known) = row.known_name.as_deref() {
        let known = known.to_lowercase();
        if known == *needle || known.contains(needle) || needle.contains(&known) {
            return true;
        }
    }
    row.synonyms.iter().any(|syn| syn.to_lowercase() == *needle)
}

fn matches_exact(value: Option<&str>, needle: &str) -> bool {
    value.map(|v| v.to_lowercase() == *needle).unwrap_or(false)
}

fn matches_contains(value: Option<&str>, needle: &str) -> bool {
    value
        .map(|v| v.to_lowercase().contains(needle))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn skill(id: i64, name: &str, known_name: Option<&str>, synonyms: &[&str]) -> SkillRow {
        SkillRow {
            id,
            tenant_id: 1,
            name: name.to_string(),
            known_name: known_name.map(String::from),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    fn catalog() -> Vec<SkillRow> {
        vec![
            skill(42, "Kafka", Some("Apache Kafka"), &["event streaming"]),
            skill(117, "Kubernetes", Some("K8s"), &["k8s", "kube"]),
            skill(200, "Rust", None, &[]),
            skill(201, "Rust for Embedded", None, &[]),
        ]
    }

    #[test]
    fn test_valid_id_matching_name_is_accepted() {
        let r = resolve(&catalog(), Some(117), "Kubernetes");
        assert_eq!(
            r,
            Resolution::Match {
                skill_id: 117,
                via: ResolutionPath::ValidatedId
            }
        );
    }

    #[test]
    fn test_valid_id_accepted_via_synonym() {
        let r = resolve(&catalog(), Some(117), "kube");
        assert_eq!(
            r,
            Resolution::Match {
                skill_id: 117,
                via: ResolutionPath::ValidatedId
            }
        );
    }

    #[test]
    fn test_wrong_id_is_discarded_and_fallback_finds_the_right_skill() {
        // Extraction reports (id=42, "Kubernetes") but 42 is Kafka.
        let r = resolve(&catalog(), Some(42), "Kubernetes");
        assert_eq!(
            r,
            Resolution::Match {
                skill_id: 117,
                via: ResolutionPath::ExactName
            }
        );
    }

    #[test]
    fn test_wrong_id_and_missing_id_resolve_identically() {
        let with_wrong_id = resolve(&catalog(), Some(42), "K8s");
        let without_id = resolve(&catalog(), None, "K8s");
        assert_eq!(with_wrong_id, without_id);
        match without_id {
            Resolution::Match { skill_id, .. } => assert_eq!(skill_id, 117),
            Resolution::Miss => panic!("expected a match"),
        }
    }

    #[test]
    fn test_exact_known_name_beats_substring() {
        let r = resolve(&catalog(), None, "apache kafka");
        assert_eq!(
            r,
            Resolution::Match {
                skill_id: 42,
                via: ResolutionPath::ExactKnownName
            }
        );
    }

    #[test]
    fn test_exact_name_beats_contains_on_longer_row() {
        // "Rust" matches row 200 exactly before 201 by substring.
        let r = resolve(&catalog(), None, "rust");
        assert_eq!(
            r,
            Resolution::Match {
                skill_id: 200,
                via: ResolutionPath::ExactName
            }
        );
    }

    #[test]
    fn test_substring_fallback_picks_first_row_in_id_order() {
        let r = resolve(&catalog(), None, "rust for emb");
        assert_eq!(
            r,
            Resolution::Match {
                skill_id: 201,
                via: ResolutionPath::NameContains
            }
        );
    }

    #[test]
    fn test_synonym_match_is_last_resort() {
        let r = resolve(&catalog(), None, "event streaming");
        assert_eq!(
            r,
            Resolution::Match {
                skill_id: 42,
                via: ResolutionPath::Synonym
            }
        );
    }

    #[test]
    fn test_unknown_name_is_a_clean_miss() {
        assert_eq!(resolve(&catalog(), None, "Fortran"), Resolution::Miss);
        assert_eq!(resolve(&catalog(), Some(999), "Fortran"), Resolution::Miss);
    }

    #[test]
    fn test_blank_name_is_a_miss() {
        assert_eq!(resolve(&catalog(), Some(42), "   "), Resolution::Miss);
    }

    #[test]
    fn test_counters_account_for_discarded_ids() {
        let skills = catalog();
        let mut counters = ResolutionCounters::default();

        let r = resolve(&skills, Some(117), "Kubernetes");
        counters.record(true, &r);
        let r = resolve(&skills, Some(42), "Kubernetes"); // wrong id, fallback hits
        counters.record(true, &r);
        let r = resolve(&skills, None, "kafka");
        counters.record(false, &r);
        let r = resolve(&skills, Some(42), "Fortran"); // wrong id, miss
        counters.record(true, &r);

        assert_eq!(counters.validated_id, 1);
        assert_eq!(counters.fallback, 2);
        assert_eq!(counters.id_discarded, 2);
        assert_eq!(counters.not_found, 1);
    }
}
