use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome of a single posture check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "pass"),
            CheckStatus::Warn => write!(f, "warn"),
            CheckStatus::Fail => write!(f, "fail"),
        }
    }
}

/// How bad a failed check is, independent of its current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// One check evaluated within one scan snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub status: CheckStatus,
    pub domain: String,
    pub recommendation: String,
    /// Opaque supporting data captured at evaluation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<serde_json::Value>,
}

/// Per-status result tallies for one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pass: u32,
    pub warn: u32,
    pub fail: u32,
}

impl StatusCounts {
    pub fn total(&self) -> u32 {
        self.pass + self.warn + self.fail
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub domain_scores: BTreeMap<String, u8>,
    pub status_counts: StatusCounts,
}

/// Summary row for the scan list. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanMeta {
    pub scan_id: String,
    pub created_at: DateTime<Utc>,
    /// Overall posture score, 0-100.
    pub score: u8,
    pub domain_scores: BTreeMap<String, u8>,
}

/// Full result set of one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSnapshot {
    pub scan_id: String,
    pub created_at: DateTime<Utc>,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub results: Vec<CheckResult>,
}

/// Read model for a single scan: the meta always exists, the snapshot may
/// still be in flight when the two backing writes were interrupted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanDetail {
    pub meta: ScanMeta,
    pub snapshot: Option<ScanSnapshot>,
}

/// One check whose status changed between two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckTransition {
    pub id: String,
    pub title: String,
    #[serde(rename = "from")]
    pub from_status: CheckStatus,
    #[serde(rename = "to")]
    pub to_status: CheckStatus,
    pub severity: Severity,
}
