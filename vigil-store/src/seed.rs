// ---------------------------------------------------------------------------
// Bundled simulation seed data
// ---------------------------------------------------------------------------
//
// Two canned posture scans and a baseline activity log. This is what a fresh
// (or corrupted) store heals to, so demo mode always has something to show
// without any network dependency.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use vigil_types::{
    CheckResult, CheckStatus, ScanDetail, ScanMeta, ScanSnapshot, ScoreBreakdown, Severity,
    StatusCounts, TimelineItem, TimelineLog, TimelineResource,
};

/// Prefix carried by every simulated resource name, so simulated activity is
/// never mistaken for a real resource.
pub const SIM_RESOURCE_PREFIX: &str = "vigil-sim-";

const DOMAIN_IDENTITY: &str = "Identity & Access";
const DOMAIN_LOGGING: &str = "Logging & Traceability";
const DOMAIN_NETWORK: &str = "Network Exposure";
const DOMAIN_DATA: &str = "Data Protection";
const DOMAIN_READINESS: &str = "IR Readiness";

/// The bundled scan list, newest first.
pub fn seed_scans() -> Vec<ScanMeta> {
    vec![seed_scan_new().meta, seed_scan_old().meta]
}

/// Detail map matching [`seed_scans`].
pub fn seed_scan_details() -> BTreeMap<String, ScanDetail> {
    let new = seed_scan_new();
    let old = seed_scan_old();
    BTreeMap::from([
        (new.meta.scan_id.clone(), new),
        (old.meta.scan_id.clone(), old),
    ])
}

/// The baseline activity log. Includes one event without an `eventTime`
/// (delivery lagged capture), which time filters must pass through.
pub fn seed_timeline() -> TimelineLog {
    TimelineLog {
        items: vec![
            event(
                Some(ts(2025, 1, 15, 8, 2, 11)),
                "ConsoleLogin",
                "signin.amazonaws.com",
                Some("demo-admin"),
                &[],
            ),
            event(
                Some(ts(2025, 1, 15, 8, 17, 45)),
                "CreateTrail",
                "cloudtrail.amazonaws.com",
                Some("demo-admin"),
                &[(
                    &format!("{SIM_RESOURCE_PREFIX}trail-main"),
                    "AWS::CloudTrail::Trail",
                )],
            ),
            event(
                Some(ts(2025, 1, 15, 9, 5, 30)),
                "PutBucketPolicy",
                "s3.amazonaws.com",
                Some("demo-admin"),
                &[(
                    &format!("{SIM_RESOURCE_PREFIX}bucket-logs"),
                    "AWS::S3::Bucket",
                )],
            ),
            event(
                None,
                "StopLogging",
                "cloudtrail.amazonaws.com",
                None,
                &[(
                    &format!("{SIM_RESOURCE_PREFIX}trail-main"),
                    "AWS::CloudTrail::Trail",
                )],
            ),
            event(
                Some(ts(2025, 1, 15, 11, 42, 3)),
                "UpdateAccountPasswordPolicy",
                "iam.amazonaws.com",
                Some("demo-admin"),
                &[],
            ),
        ],
    }
}

/// The newer of the two bundled scans: most findings remediated, the open
/// security group still failing.
fn seed_scan_new() -> ScanDetail {
    let results = vec![
        check(
            "iam.root_mfa",
            "Root account MFA enabled",
            Severity::Critical,
            CheckStatus::Pass,
            DOMAIN_IDENTITY,
            "Enable MFA on the root account and lock root credentials away.",
            json!({"mfa_enabled": true}),
        ),
        check(
            "iam.password_policy",
            "IAM account password policy strength",
            Severity::High,
            CheckStatus::Warn,
            DOMAIN_IDENTITY,
            "Set a strong password policy (>=12 chars, numbers+symbols, rotation where appropriate).",
            json!({"minimum_length": 10, "require_symbols": false}),
        ),
        check(
            "iam.old_access_keys",
            "Access keys older than 90 days",
            Severity::Medium,
            CheckStatus::Warn,
            DOMAIN_IDENTITY,
            "Rotate or remove old access keys; prefer short-lived credentials (SSO/STS).",
            json!({"stale_keys": 1, "threshold_days": 90}),
        ),
        check(
            "iam.admin_attachments",
            "AdministratorAccess/PowerUserAccess attachments",
            Severity::High,
            CheckStatus::Warn,
            DOMAIN_IDENTITY,
            "Minimize broad admin policies; use least privilege and scoped roles with MFA/conditions.",
            json!({"admin_attachments": 1}),
        ),
        check(
            "logging.cloudtrail_enabled",
            "CloudTrail enabled (logging)",
            Severity::Critical,
            CheckStatus::Pass,
            DOMAIN_LOGGING,
            "Enable CloudTrail and ensure it is logging to an S3 bucket (and optionally CloudWatch Logs).",
            json!({"trails_logging": 1}),
        ),
        check(
            "logging.cloudtrail_multiregion",
            "CloudTrail multi-region trail recommended",
            Severity::High,
            CheckStatus::Pass,
            DOMAIN_READINESS,
            "Use a multi-region trail to capture management events across regions.",
            json!({"multi_region_trails": 1}),
        ),
        check(
            "logging.log_group_retention",
            "CloudWatch Logs retention set (avoid infinite retention)",
            Severity::Low,
            CheckStatus::Warn,
            DOMAIN_LOGGING,
            "Set log retention to a reasonable period (e.g., 7-90 days) to control cost and exposure.",
            json!({"groups_without_retention": 2}),
        ),
        check(
            "net.sg_open_sensitive_ports",
            "Security groups open to 0.0.0.0/0 on sensitive ports",
            Severity::Critical,
            CheckStatus::Fail,
            DOMAIN_NETWORK,
            "Restrict inbound rules: remove 0.0.0.0/0 access on admin/database ports; use VPN/bastion/SSM.",
            json!({"open_rules": [{"port": 22, "cidr": "0.0.0.0/0"}]}),
        ),
        check(
            "s3.public_access_block",
            "S3 public access block enabled (sampled buckets)",
            Severity::High,
            CheckStatus::Pass,
            DOMAIN_DATA,
            "Enable S3 Public Access Block at account and bucket level; avoid public ACLs/policies.",
            json!({"buckets_sampled": 5, "buckets_missing_block": 0}),
        ),
        check(
            "s3.default_encryption",
            "S3 default encryption enabled (sampled buckets)",
            Severity::High,
            CheckStatus::Pass,
            DOMAIN_DATA,
            "Enable default encryption (SSE-S3 or SSE-KMS) for all buckets storing sensitive data.",
            json!({"buckets_sampled": 5, "buckets_unencrypted": 0}),
        ),
        check(
            "s3.access_logging",
            "S3 server access logging enabled (sampled buckets)",
            Severity::Medium,
            CheckStatus::Warn,
            DOMAIN_LOGGING,
            "Enable S3 server access logging (or CloudTrail data events) for high-value buckets.",
            json!({"buckets_sampled": 5, "buckets_without_logging": 2}),
        ),
        check(
            "ir.aws_config_recorder",
            "AWS Config presence (configuration recorder)",
            Severity::Medium,
            CheckStatus::Warn,
            DOMAIN_READINESS,
            "Enable AWS Config (at least in key regions) to support forensics and drift detection.",
            json!({"recorders": 1, "recording": false}),
        ),
    ];

    detail(
        "sim-20250115101500-862",
        ts(2025, 1, 15, 10, 15, 0),
        67,
        BTreeMap::from([
            (DOMAIN_DATA.to_string(), 100),
            (DOMAIN_READINESS.to_string(), 85),
            (DOMAIN_IDENTITY.to_string(), 85),
            (DOMAIN_LOGGING.to_string(), 85),
            (DOMAIN_NETWORK.to_string(), 60),
        ]),
        StatusCounts {
            pass: 5,
            warn: 6,
            fail: 1,
        },
        results,
    )
}

/// The older bundled scan: the posture before remediation.
fn seed_scan_old() -> ScanDetail {
    let results = vec![
        check(
            "iam.root_mfa",
            "Root account MFA enabled",
            Severity::Critical,
            CheckStatus::Fail,
            DOMAIN_IDENTITY,
            "Enable MFA on the root account and lock root credentials away.",
            json!({"mfa_enabled": false}),
        ),
        check(
            "iam.password_policy",
            "IAM account password policy strength",
            Severity::High,
            CheckStatus::Warn,
            DOMAIN_IDENTITY,
            "Set a strong password policy (>=12 chars, numbers+symbols, rotation where appropriate).",
            json!({"minimum_length": 8, "require_symbols": false}),
        ),
        check(
            "iam.old_access_keys",
            "Access keys older than 90 days",
            Severity::Medium,
            CheckStatus::Warn,
            DOMAIN_IDENTITY,
            "Rotate or remove old access keys; prefer short-lived credentials (SSO/STS).",
            json!({"stale_keys": 2, "threshold_days": 90}),
        ),
        check(
            "iam.admin_attachments",
            "AdministratorAccess/PowerUserAccess attachments",
            Severity::High,
            CheckStatus::Fail,
            DOMAIN_IDENTITY,
            "Minimize broad admin policies; use least privilege and scoped roles with MFA/conditions.",
            json!({"admin_attachments": 3}),
        ),
        check(
            "logging.cloudtrail_enabled",
            "CloudTrail enabled (logging)",
            Severity::Critical,
            CheckStatus::Pass,
            DOMAIN_LOGGING,
            "Enable CloudTrail and ensure it is logging to an S3 bucket (and optionally CloudWatch Logs).",
            json!({"trails_logging": 1}),
        ),
        check(
            "logging.cloudtrail_multiregion",
            "CloudTrail multi-region trail recommended",
            Severity::High,
            CheckStatus::Warn,
            DOMAIN_READINESS,
            "Use a multi-region trail to capture management events across regions.",
            json!({"multi_region_trails": 0}),
        ),
        check(
            "logging.log_group_retention",
            "CloudWatch Logs retention set (avoid infinite retention)",
            Severity::Low,
            CheckStatus::Warn,
            DOMAIN_LOGGING,
            "Set log retention to a reasonable period (e.g., 7-90 days) to control cost and exposure.",
            json!({"groups_without_retention": 4}),
        ),
        check(
            "net.sg_open_sensitive_ports",
            "Security groups open to 0.0.0.0/0 on sensitive ports",
            Severity::Critical,
            CheckStatus::Fail,
            DOMAIN_NETWORK,
            "Restrict inbound rules: remove 0.0.0.0/0 access on admin/database ports; use VPN/bastion/SSM.",
            json!({"open_rules": [{"port": 22, "cidr": "0.0.0.0/0"}, {"port": 3389, "cidr": "0.0.0.0/0"}]}),
        ),
        check(
            "s3.public_access_block",
            "S3 public access block enabled (sampled buckets)",
            Severity::High,
            CheckStatus::Warn,
            DOMAIN_DATA,
            "Enable S3 Public Access Block at account and bucket level; avoid public ACLs/policies.",
            json!({"buckets_sampled": 5, "buckets_missing_block": 1}),
        ),
        check(
            "s3.default_encryption",
            "S3 default encryption enabled (sampled buckets)",
            Severity::High,
            CheckStatus::Pass,
            DOMAIN_DATA,
            "Enable default encryption (SSE-S3 or SSE-KMS) for all buckets storing sensitive data.",
            json!({"buckets_sampled": 5, "buckets_unencrypted": 0}),
        ),
        check(
            "s3.access_logging",
            "S3 server access logging enabled (sampled buckets)",
            Severity::Medium,
            CheckStatus::Warn,
            DOMAIN_LOGGING,
            "Enable S3 server access logging (or CloudTrail data events) for high-value buckets.",
            json!({"buckets_sampled": 5, "buckets_without_logging": 3}),
        ),
        check(
            "ir.aws_config_recorder",
            "AWS Config presence (configuration recorder)",
            Severity::Medium,
            CheckStatus::Fail,
            DOMAIN_READINESS,
            "Enable AWS Config (at least in key regions) to support forensics and drift detection.",
            json!({"recorders": 0}),
        ),
    ];

    detail(
        "sim-20250114093012-417",
        ts(2025, 1, 14, 9, 30, 12),
        42,
        BTreeMap::from([
            (DOMAIN_DATA.to_string(), 85),
            (DOMAIN_READINESS.to_string(), 60),
            (DOMAIN_IDENTITY.to_string(), 60),
            (DOMAIN_LOGGING.to_string(), 85),
            (DOMAIN_NETWORK.to_string(), 60),
        ]),
        StatusCounts {
            pass: 2,
            warn: 6,
            fail: 4,
        },
        results,
    )
}

fn detail(
    scan_id: &str,
    created_at: DateTime<Utc>,
    score: u8,
    domain_scores: BTreeMap<String, u8>,
    status_counts: StatusCounts,
    results: Vec<CheckResult>,
) -> ScanDetail {
    let meta = ScanMeta {
        scan_id: scan_id.to_string(),
        created_at,
        score,
        domain_scores: domain_scores.clone(),
    };
    ScanDetail {
        meta,
        snapshot: Some(ScanSnapshot {
            scan_id: scan_id.to_string(),
            created_at,
            score,
            breakdown: ScoreBreakdown {
                domain_scores,
                status_counts,
            },
            results,
        }),
    }
}

#[allow(clippy::too_many_arguments)]
fn check(
    id: &str,
    title: &str,
    severity: Severity,
    status: CheckStatus,
    domain: &str,
    recommendation: &str,
    evidence: serde_json::Value,
) -> CheckResult {
    CheckResult {
        id: id.to_string(),
        title: title.to_string(),
        severity,
        status,
        domain: domain.to_string(),
        recommendation: recommendation.to_string(),
        evidence: Some(evidence),
    }
}

fn event(
    event_time: Option<DateTime<Utc>>,
    name: &str,
    source: &str,
    username: Option<&str>,
    resources: &[(&str, &str)],
) -> TimelineItem {
    TimelineItem {
        event_time,
        event_name: name.to_string(),
        event_source: source.to_string(),
        username: username.map(String::from),
        resources: resources
            .iter()
            .map(|(name, resource_type)| TimelineResource {
                name: name.to_string(),
                resource_type: resource_type.to_string(),
            })
            .collect(),
    }
}

fn ts(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_are_newest_first() {
        let scans = seed_scans();
        assert_eq!(scans.len(), 2);
        assert!(scans[0].created_at > scans[1].created_at);
    }

    #[test]
    fn details_cover_every_listed_scan() {
        let details = seed_scan_details();
        for meta in seed_scans() {
            let detail = details.get(&meta.scan_id).expect("detail for listed scan");
            assert_eq!(detail.meta, meta);
            assert!(detail.snapshot.is_some());
        }
    }

    #[test]
    fn status_counts_match_results() {
        for detail in seed_scan_details().values() {
            let snapshot = detail.snapshot.as_ref().unwrap();
            let counts = snapshot.breakdown.status_counts;
            let pass = snapshot
                .results
                .iter()
                .filter(|r| r.status == CheckStatus::Pass)
                .count() as u32;
            let warn = snapshot
                .results
                .iter()
                .filter(|r| r.status == CheckStatus::Warn)
                .count() as u32;
            let fail = snapshot
                .results
                .iter()
                .filter(|r| r.status == CheckStatus::Fail)
                .count() as u32;
            assert_eq!((counts.pass, counts.warn, counts.fail), (pass, warn, fail));
            assert_eq!(counts.total(), snapshot.results.len() as u32);
        }
    }

    #[test]
    fn check_ids_are_unique_within_a_scan() {
        for detail in seed_scan_details().values() {
            let snapshot = detail.snapshot.as_ref().unwrap();
            let mut ids: Vec<_> = snapshot.results.iter().map(|r| &r.id).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), snapshot.results.len());
        }
    }

    #[test]
    fn timeline_includes_an_event_without_a_time() {
        let log = seed_timeline();
        assert!(log.items.iter().any(|i| i.event_time.is_none()));
        assert!(log.items.len() <= 200);
    }

    #[test]
    fn simulated_resources_carry_the_prefix() {
        for item in seed_timeline().items {
            for resource in item.resources {
                assert!(resource.name.starts_with(SIM_RESOURCE_PREFIX));
            }
        }
    }
}
