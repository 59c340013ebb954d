// ---------------------------------------------------------------------------
// Terminal rendering
// ---------------------------------------------------------------------------

use anyhow::Result;
use serde::Serialize;
use vigil_policy::PolicyExample;
use vigil_types::{
    CheckTransition, LatestScore, ModeState, PolicyReport, ScanDetail, ScanMeta, TimelineLog,
};

/// Pretty-printed JSON for `--json` output.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn latest_score(latest: &LatestScore) {
    match (latest.score, &latest.scan_id) {
        (Some(score), Some(scan_id)) => {
            println!("Posture score: {score}/100  (scan {scan_id})");
            if let Some(domains) = &latest.domain_scores {
                for (domain, score) in domains {
                    println!("  {domain:<28} {score:>3}");
                }
            }
        }
        _ => println!("No scans yet. Run `vigil scans run` first."),
    }
}

pub fn scan_list(scans: &[ScanMeta]) {
    if scans.is_empty() {
        println!("No scans recorded.");
        return;
    }
    println!("{:<28} {:<20} SCORE", "SCAN ID", "CREATED (UTC)");
    for scan in scans {
        println!(
            "{:<28} {:<20} {:>3}",
            scan.scan_id,
            scan.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            scan.score
        );
    }
}

pub fn scan_detail(detail: &ScanDetail) {
    println!(
        "Scan {}  score {}/100  created {}",
        detail.meta.scan_id,
        detail.meta.score,
        detail.meta.created_at.format("%Y-%m-%d %H:%M:%S")
    );

    let Some(snapshot) = &detail.snapshot else {
        println!("Snapshot not yet available.");
        return;
    };

    println!(
        "Checks: {} pass, {} warn, {} fail",
        snapshot.breakdown.status_counts.pass,
        snapshot.breakdown.status_counts.warn,
        snapshot.breakdown.status_counts.fail
    );

    println!("\nDomains:");
    for (domain, score) in &snapshot.breakdown.domain_scores {
        println!("  {domain:<28} {score:>3}");
    }

    println!("\n{:<34} {:<6} {:<9} TITLE", "CHECK", "STATUS", "SEVERITY");
    for result in &snapshot.results {
        println!(
            "{:<34} {:<6} {:<9} {}",
            result.id,
            result.status.to_string(),
            result.severity.to_string(),
            result.title
        );
    }
}

pub fn transitions(old_id: &str, new_id: &str, transitions: &[CheckTransition]) {
    if transitions.is_empty() {
        println!("No status changes between {old_id} and {new_id}.");
        return;
    }
    println!("--- Scan Diff ({old_id} vs {new_id}) ---");
    for t in transitions {
        println!(
            "  ~ {}: {} -> {}  ({})",
            t.id, t.from_status, t.to_status, t.title
        );
    }
}

pub fn policy_report(report: &PolicyReport) {
    println!("Validator: {}", report.mode);
    for finding in &report.findings {
        println!("\n[{}] {}", finding.severity, finding.message);
        println!("    {}", finding.why);
        if let Some(hint) = &finding.hint {
            println!("    Hint: {hint}");
        }
    }
}

pub fn policy_examples(examples: &[PolicyExample]) {
    for example in examples {
        println!("--- {} ---", example.name);
        println!("{}", example.description);
        println!("{}\n", example.body);
    }
}

pub fn timeline(log: &TimelineLog) {
    if log.items.is_empty() {
        println!("No activity recorded.");
        return;
    }
    println!("{:<20} {:<28} {:<26} USER", "TIME (UTC)", "EVENT", "SOURCE");
    for item in &log.items {
        let time = item
            .event_time
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "(pending)".to_string());
        println!(
            "{:<20} {:<28} {:<26} {}",
            time,
            item.event_name,
            item.event_source,
            item.username.as_deref().unwrap_or("-")
        );
        for resource in &item.resources {
            println!("{:<20}   {} ({})", "", resource.name, resource.resource_type);
        }
    }
}

pub fn mode_state(state: &ModeState) {
    println!("Mode:         {}", state.mode);
    println!("API base URL: {}", state.api_base_url);
}
