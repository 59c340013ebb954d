use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight of a single analyzer finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    Error,
    Warning,
    Suggestion,
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingSeverity::Error => write!(f, "error"),
            FindingSeverity::Warning => write!(f, "warning"),
            FindingSeverity::Suggestion => write!(f, "suggestion"),
        }
    }
}

/// One analyzer observation. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyFinding {
    pub severity: FindingSeverity,
    pub message: String,
    /// Why this matters, in one sentence.
    pub why: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Which engine produced the report. The offline analyzer always answers
/// `local`; `access-analyzer` only ever comes back from a remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportMode {
    Local,
    AccessAnalyzer,
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportMode::Local => write!(f, "local"),
            ReportMode::AccessAnalyzer => write!(f, "access-analyzer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyReport {
    pub mode: ReportMode,
    pub findings: Vec<PolicyFinding>,
}

/// IAM policy flavor, spelled the way the AWS APIs spell it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyType {
    #[default]
    IdentityPolicy,
    ResourcePolicy,
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyType::IdentityPolicy => write!(f, "IDENTITY_POLICY"),
            PolicyType::ResourcePolicy => write!(f, "RESOURCE_POLICY"),
        }
    }
}

/// Request body for policy validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyValidateRequest {
    pub policy_json: String,
    #[serde(default)]
    pub policy_type: PolicyType,
}
