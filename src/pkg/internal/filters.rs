//! In-memory filtering of job collections.
//!
//! Callers materialize the full collection first, then narrow it here. Every
//! predicate is optional and they combine as a conjunction; the relative
//! order of the input records survives untouched.

use serde::Deserialize;

use crate::pkg::internal::adaptors::jobs::spec::JobEntry;

/// Recognized list-query options, deserialized straight from the query
/// string (`?title=&minSalary=&hasEquity=`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i64>,
    pub has_equity: Option<bool>,
}

/// Keeps the records satisfying every present predicate.
pub fn apply(filter: &JobFilter, jobs: Vec<JobEntry>) -> Vec<JobEntry> {
    jobs.into_iter().filter(|job| matches(filter, job)).collect()
}

fn matches(filter: &JobFilter, job: &JobEntry) -> bool {
    if let Some(needle) = &filter.title {
        if !job.title.to_lowercase().contains(&needle.to_lowercase()) {
            return false;
        }
    }
    if let Some(min_salary) = filter.min_salary {
        match job.salary {
            Some(salary) if salary >= min_salary => {}
            _ => return false,
        }
    }
    if filter.has_equity.unwrap_or(false) && !equity_above_zero(job.equity.as_deref()) {
        return false;
    }
    true
}

// Absent or unparseable equity compares as not-greater-than-zero rather than
// failing the whole list request.
fn equity_above_zero(equity: Option<&str>) -> bool {
    equity
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .map(|value| value > 0.0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Vec<JobEntry> {
        vec![
            JobEntry {
                id: 1,
                title: "J1".into(),
                salary: Some(100),
                equity: Some("0".into()),
                company_handle: "c1".into(),
            },
            JobEntry {
                id: 2,
                title: "J2".into(),
                salary: Some(100),
                equity: Some("0.085".into()),
                company_handle: "c2".into(),
            },
            JobEntry {
                id: 3,
                title: "J3".into(),
                salary: Some(100),
                equity: Some("0".into()),
                company_handle: "c1".into(),
            },
        ]
    }

    fn ids(jobs: &[JobEntry]) -> Vec<i32> {
        jobs.iter().map(|job| job.id).collect()
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let jobs = seed();
        let filtered = apply(&JobFilter::default(), jobs.clone());
        assert_eq!(filtered, jobs);
    }

    #[test]
    fn test_title_is_a_case_insensitive_substring_match() {
        let filter = JobFilter {
            title: Some("j".into()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&filter, seed())), vec![1, 2, 3]);

        let filter = JobFilter {
            title: Some("j2".into()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&filter, seed())), vec![2]);

        let filter = JobFilter {
            title: Some("architect".into()),
            ..Default::default()
        };
        assert!(apply(&filter, seed()).is_empty());
    }

    #[test]
    fn test_min_salary_is_an_inclusive_lower_bound() {
        let mut jobs = seed();
        jobs[0].salary = Some(250);
        jobs[1].salary = Some(200);
        jobs[2].salary = None;
        let filter = JobFilter {
            min_salary: Some(200),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&filter, jobs)), vec![1, 2]);
    }

    #[test]
    fn test_missing_salary_never_meets_a_threshold() {
        let mut jobs = seed();
        jobs[1].salary = None;
        let filter = JobFilter {
            min_salary: Some(1),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&filter, jobs)), vec![1, 3]);
    }

    #[test]
    fn test_has_equity_keeps_strictly_positive_equity_only() {
        let filter = JobFilter {
            has_equity: Some(true),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&filter, seed())), vec![2]);
    }

    #[test]
    fn test_zero_forms_and_absent_equity_do_not_count() {
        let mut jobs = seed();
        jobs[0].equity = Some("0.0".into());
        jobs[2].equity = None;
        let filter = JobFilter {
            has_equity: Some(true),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&filter, jobs)), vec![2]);
    }

    #[test]
    fn test_has_equity_false_constrains_nothing() {
        let filter = JobFilter {
            has_equity: Some(false),
            ..Default::default()
        };
        assert_eq!(apply(&filter, seed()), seed());
    }

    #[test]
    fn test_unparseable_equity_is_treated_as_no_equity() {
        let mut jobs = seed();
        jobs[1].equity = Some("lots".into());
        let filter = JobFilter {
            has_equity: Some(true),
            ..Default::default()
        };
        assert!(apply(&filter, jobs).is_empty());
    }

    #[test]
    fn test_predicates_compose_conjunctively() {
        let mut jobs = seed();
        jobs[1].title = "JJ2".into();
        jobs[2].title = "JJ3".into();
        let combined = JobFilter {
            title: Some("jj".into()),
            has_equity: Some(true),
            ..Default::default()
        };
        let by_title = JobFilter {
            title: Some("jj".into()),
            ..Default::default()
        };
        let by_equity = JobFilter {
            has_equity: Some(true),
            ..Default::default()
        };
        let combined_ids = ids(&apply(&combined, jobs.clone()));
        let title_ids = ids(&apply(&by_title, jobs.clone()));
        let equity_ids = ids(&apply(&by_equity, jobs));
        let intersection: Vec<i32> = title_ids
            .into_iter()
            .filter(|id| equity_ids.contains(id))
            .collect();
        assert_eq!(combined_ids, intersection);
        assert_eq!(combined_ids, vec![2]);
    }

    #[test]
    fn test_relative_order_is_preserved() {
        let mut jobs = seed();
        jobs.reverse();
        let filter = JobFilter {
            title: Some("j".into()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&filter, jobs)), vec![3, 2, 1]);
    }
}
