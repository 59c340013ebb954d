// ---------------------------------------------------------------------------
// IAM policy static analysis
// ---------------------------------------------------------------------------
//
// Pure and deterministic: the same document always yields the same findings.
// Malformed input is itself a finding, never an Err.

use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;
use vigil_types::{FindingSeverity, PolicyFinding, PolicyReport, PolicyType, ReportMode};

/// Analyze a policy document and return a `local`-mode report.
pub fn validate(policy_json: &str, policy_type: PolicyType) -> PolicyReport {
    debug!(policy_type = %policy_type, "validating policy locally");

    let parsed: Value = match serde_json::from_str(policy_json) {
        Ok(value) => value,
        Err(e) => {
            return report(vec![finding(
                FindingSeverity::Error,
                "Invalid JSON.",
                "IAM policies must be valid JSON to be evaluated.",
                Some(&e.to_string()),
            )]);
        }
    };

    let mut findings = Vec::new();

    let version = parsed.get("Version").and_then(Value::as_str);
    if !matches!(version, Some("2012-10-17") | Some("2008-10-17")) {
        findings.push(finding(
            FindingSeverity::Warning,
            "Policy Version is missing or unusual.",
            "Using a standard version avoids evaluation surprises.",
            Some("Set `\"Version\": \"2012-10-17\"`."),
        ));
    }

    // A missing Statement replaces anything collected so far.
    let statements: Vec<&Value> = match parsed.get("Statement") {
        None | Some(Value::Null) => {
            return report(vec![finding(
                FindingSeverity::Error,
                "Policy has no Statement.",
                "Policies must contain at least one statement.",
                Some("Add a `\"Statement\": [...]` array."),
            )]);
        }
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
    };

    for statement in statements {
        check_statement(statement, &mut findings);
    }

    if findings.is_empty() {
        findings.push(finding(
            FindingSeverity::Suggestion,
            "No issues detected in the demo validator.",
            "The policy looks syntactically correct and reasonably scoped.",
            Some("Still review for least privilege and add conditions."),
        ));
    }

    report(dedup(findings))
}

fn check_statement(statement: &Value, findings: &mut Vec<PolicyFinding>) {
    let effect = statement.get("Effect").and_then(Value::as_str);
    if !matches!(effect, Some("Allow") | Some("Deny")) {
        findings.push(finding(
            FindingSeverity::Error,
            "Statement Effect must be Allow or Deny.",
            "Invalid effects can make policies fail validation or be ignored.",
            Some("Use Effect: Allow or Deny."),
        ));
    }

    if is_star(statement.get("Action")) {
        findings.push(finding(
            FindingSeverity::Warning,
            "Statement uses Action '*'.",
            "Wildcard actions often grant unintended permissions across services.",
            Some("Replace '*' with specific actions and add conditions where possible."),
        ));
    }

    if is_star(statement.get("Resource")) {
        findings.push(finding(
            FindingSeverity::Warning,
            "Statement uses Resource '*'.",
            "Resource wildcards can unintentionally expand access beyond intended targets.",
            Some("Scope Resource to specific ARNs, and add conditions."),
        ));
    }

    let is_allow = effect == Some("Allow");

    if is_allow && statement.get("Principal").and_then(Value::as_str) == Some("*") {
        findings.push(finding(
            FindingSeverity::Warning,
            "Resource policy allows Principal '*'.",
            "Public access is a common cause of data exposure.",
            Some("Scope Principal to specific AWS accounts/roles, or require auth via conditions."),
        ));
    }

    let has_condition = matches!(statement.get("Condition"), Some(v) if !v.is_null());
    if is_allow && !has_condition {
        findings.push(finding(
            FindingSeverity::Suggestion,
            "Consider adding conditions (MFA, source IP, tags).",
            "Conditions reduce blast radius even if identities are compromised.",
            Some("Add Condition with aws:MultiFactorAuthPresent, aws:SourceIp, aws:RequestTag, etc."),
        ));
    }
}

/// "*" itself, or a list containing it.
fn is_star(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => s == "*",
        Some(Value::Array(items)) => items.iter().any(|v| v.as_str() == Some("*")),
        _ => false,
    }
}

/// Drop repeats of (severity, message), keeping first-seen order. Multi-
/// statement policies otherwise repeat the same advice per statement.
fn dedup(findings: Vec<PolicyFinding>) -> Vec<PolicyFinding> {
    let mut seen = HashSet::new();
    findings
        .into_iter()
        .filter(|f| seen.insert((f.severity, f.message.clone())))
        .collect()
}

fn finding(
    severity: FindingSeverity,
    message: &str,
    why: &str,
    hint: Option<&str>,
) -> PolicyFinding {
    PolicyFinding {
        severity,
        message: message.to_string(),
        why: why.to_string(),
        hint: hint.map(String::from),
    }
}

fn report(findings: Vec<PolicyFinding>) -> PolicyReport {
    PolicyReport {
        mode: ReportMode::Local,
        findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(report: &PolicyReport) -> Vec<&str> {
        report.findings.iter().map(|f| f.message.as_str()).collect()
    }

    #[test]
    fn wildcard_allow_yields_exactly_three_findings() {
        let report = validate(
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Action":"*","Resource":"*"}]}"#,
            PolicyType::IdentityPolicy,
        );
        assert_eq!(report.mode, ReportMode::Local);
        assert_eq!(
            messages(&report),
            vec![
                "Statement uses Action '*'.",
                "Statement uses Resource '*'.",
                "Consider adding conditions (MFA, source IP, tags).",
            ]
        );
        assert_eq!(report.findings[0].severity, FindingSeverity::Warning);
        assert_eq!(report.findings[1].severity, FindingSeverity::Warning);
        assert_eq!(report.findings[2].severity, FindingSeverity::Suggestion);
        assert!(
            report
                .findings
                .iter()
                .all(|f| f.severity != FindingSeverity::Error)
        );
    }

    #[test]
    fn unparseable_input_is_a_single_error_finding() {
        let report = validate("not json", PolicyType::IdentityPolicy);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].severity, FindingSeverity::Error);
        assert_eq!(report.findings[0].message, "Invalid JSON.");
        assert!(report.findings[0].hint.is_some(), "parser message as hint");
    }

    #[test]
    fn missing_statement_discards_the_version_warning() {
        let report = validate(r#"{"Version":"draft"}"#, PolicyType::IdentityPolicy);
        assert_eq!(messages(&report), vec!["Policy has no Statement."]);
        assert_eq!(report.findings[0].severity, FindingSeverity::Error);
    }

    #[test]
    fn null_statement_is_missing() {
        let report = validate(
            r#"{"Version":"2012-10-17","Statement":null}"#,
            PolicyType::IdentityPolicy,
        );
        assert_eq!(messages(&report), vec!["Policy has no Statement."]);
    }

    #[test]
    fn empty_statement_array_is_not_missing() {
        let report = validate(
            r#"{"Version":"2012-10-17","Statement":[]}"#,
            PolicyType::IdentityPolicy,
        );
        assert_eq!(
            messages(&report),
            vec!["No issues detected in the demo validator."]
        );
    }

    #[test]
    fn unusual_version_warns() {
        let report = validate(
            r#"{"Version":"2024-01-01","Statement":[{"Effect":"Deny","Action":"s3:*","Resource":"arn:aws:s3:::x"}]}"#,
            PolicyType::IdentityPolicy,
        );
        assert_eq!(messages(&report), vec!["Policy Version is missing or unusual."]);
    }

    #[test]
    fn both_standard_versions_are_accepted() {
        for version in ["2012-10-17", "2008-10-17"] {
            let policy = format!(
                r#"{{"Version":"{version}","Statement":[{{"Effect":"Deny","Action":"s3:GetObject","Resource":"arn:aws:s3:::x/*"}}]}}"#
            );
            let report = validate(&policy, PolicyType::IdentityPolicy);
            assert_eq!(
                messages(&report),
                vec!["No issues detected in the demo validator."],
                "version {version}"
            );
        }
    }

    #[test]
    fn single_statement_object_is_normalized() {
        let report = validate(
            r#"{"Version":"2012-10-17","Statement":{"Effect":"Allow","Action":"*","Resource":"arn:aws:s3:::x"}}"#,
            PolicyType::IdentityPolicy,
        );
        assert!(
            messages(&report).contains(&"Statement uses Action '*'."),
            "wrapped single statement is analyzed"
        );
    }

    #[test]
    fn invalid_effect_is_an_error() {
        let report = validate(
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Permit","Action":"s3:GetObject","Resource":"arn:aws:s3:::x"}]}"#,
            PolicyType::IdentityPolicy,
        );
        assert_eq!(
            messages(&report),
            vec!["Statement Effect must be Allow or Deny."]
        );
    }

    #[test]
    fn wildcard_inside_a_list_is_flagged() {
        let report = validate(
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Deny","Action":["s3:GetObject","*"],"Resource":"arn:aws:s3:::x"}]}"#,
            PolicyType::IdentityPolicy,
        );
        assert_eq!(messages(&report), vec!["Statement uses Action '*'."]);
    }

    #[test]
    fn public_principal_on_allow_warns() {
        let report = validate(
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Principal":"*","Action":"s3:GetObject","Resource":"arn:aws:s3:::x/*","Condition":{"Bool":{"aws:SecureTransport":"true"}}}]}"#,
            PolicyType::ResourcePolicy,
        );
        assert_eq!(
            messages(&report),
            vec!["Resource policy allows Principal '*'."]
        );
    }

    #[test]
    fn public_principal_on_deny_is_fine() {
        let report = validate(
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Deny","Principal":"*","Action":"s3:GetObject","Resource":"arn:aws:s3:::x/*"}]}"#,
            PolicyType::ResourcePolicy,
        );
        assert_eq!(
            messages(&report),
            vec!["No issues detected in the demo validator."]
        );
    }

    #[test]
    fn condition_suppresses_the_suggestion() {
        let report = validate(
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Action":"s3:GetObject","Resource":"arn:aws:s3:::x/*","Condition":{"Bool":{"aws:MultiFactorAuthPresent":"true"}}}]}"#,
            PolicyType::IdentityPolicy,
        );
        assert_eq!(
            messages(&report),
            vec!["No issues detected in the demo validator."]
        );
    }

    #[test]
    fn repeated_statements_dedup_by_severity_and_message() {
        let statement = r#"{"Effect":"Allow","Action":"*","Resource":"*"}"#;
        let policy = format!(
            r#"{{"Version":"2012-10-17","Statement":[{statement},{statement},{statement}]}}"#
        );
        let report = validate(&policy, PolicyType::IdentityPolicy);
        assert_eq!(
            messages(&report),
            vec![
                "Statement uses Action '*'.",
                "Statement uses Resource '*'.",
                "Consider adding conditions (MFA, source IP, tags).",
            ]
        );
    }

    #[test]
    fn validation_is_deterministic() {
        let policy = r#"{"Statement":[{"Effect":"Allow","Action":["iam:*","*"],"Resource":"*"}]}"#;
        let first = validate(policy, PolicyType::IdentityPolicy);
        let second = validate(policy, PolicyType::IdentityPolicy);
        assert_eq!(first, second);
    }
}
