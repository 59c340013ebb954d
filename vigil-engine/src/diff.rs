use std::collections::HashMap;
use vigil_types::{CheckResult, CheckTransition, ScanSnapshot};

/// Status transitions from snapshot `a` to snapshot `b`, in `b`'s result
/// order. Checks present in only one of the two snapshots are not reported.
pub fn diff_snapshots(a: &ScanSnapshot, b: &ScanSnapshot) -> Vec<CheckTransition> {
    let old: HashMap<&str, &CheckResult> =
        a.results.iter().map(|r| (r.id.as_str(), r)).collect();

    b.results
        .iter()
        .filter_map(|new| {
            let previous = old.get(new.id.as_str())?;
            if previous.status == new.status {
                return None;
            }
            Some(CheckTransition {
                id: new.id.clone(),
                title: new.title.clone(),
                from_status: previous.status,
                to_status: new.status,
                severity: new.severity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use vigil_types::{CheckStatus, ScoreBreakdown, Severity};

    fn snapshot(id: &str, results: Vec<CheckResult>) -> ScanSnapshot {
        ScanSnapshot {
            scan_id: id.to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 15, 10, 15, 0).unwrap(),
            score: 0,
            breakdown: ScoreBreakdown::default(),
            results,
        }
    }

    fn result(id: &str, status: CheckStatus, severity: Severity) -> CheckResult {
        CheckResult {
            id: id.to_string(),
            title: format!("check {id}"),
            severity,
            status,
            domain: "Identity & Access".to_string(),
            recommendation: String::new(),
            evidence: None,
        }
    }

    #[test]
    fn identical_snapshots_diff_empty() {
        let a = snapshot(
            "sim-a",
            vec![result("iam.root_mfa", CheckStatus::Fail, Severity::Critical)],
        );
        assert!(diff_snapshots(&a, &a).is_empty());
    }

    #[test]
    fn changed_status_is_reported_with_direction() {
        let a = snapshot(
            "sim-a",
            vec![
                result("iam.root_mfa", CheckStatus::Fail, Severity::Critical),
                result("s3.default_encryption", CheckStatus::Pass, Severity::High),
            ],
        );
        let b = snapshot(
            "sim-b",
            vec![
                result("iam.root_mfa", CheckStatus::Pass, Severity::Critical),
                result("s3.default_encryption", CheckStatus::Pass, Severity::High),
            ],
        );
        let transitions = diff_snapshots(&a, &b);
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].id, "iam.root_mfa");
        assert_eq!(transitions[0].from_status, CheckStatus::Fail);
        assert_eq!(transitions[0].to_status, CheckStatus::Pass);
        assert_eq!(transitions[0].severity, Severity::Critical);
    }

    #[test]
    fn added_and_removed_checks_are_ignored() {
        let a = snapshot(
            "sim-a",
            vec![result("net.sg_open_sensitive_ports", CheckStatus::Fail, Severity::Critical)],
        );
        let b = snapshot(
            "sim-b",
            vec![result("ir.aws_config_recorder", CheckStatus::Warn, Severity::Medium)],
        );
        assert!(diff_snapshots(&a, &b).is_empty());
    }

    #[test]
    fn transitions_follow_b_order() {
        let a = snapshot(
            "sim-a",
            vec![
                result("one", CheckStatus::Pass, Severity::Low),
                result("two", CheckStatus::Pass, Severity::Low),
                result("three", CheckStatus::Pass, Severity::Low),
            ],
        );
        let b = snapshot(
            "sim-b",
            vec![
                result("three", CheckStatus::Warn, Severity::Low),
                result("one", CheckStatus::Fail, Severity::Low),
                result("two", CheckStatus::Pass, Severity::Low),
            ],
        );
        let ids: Vec<_> = diff_snapshots(&a, &b).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["three", "one"]);
    }
}
