// ---------------------------------------------------------------------------
// Scan mutation and scoring
// ---------------------------------------------------------------------------
//
// Each simulated scan derives from the newest stored snapshot by a fixed
// perturbation, is rescored, and lands at the head of the capped scan list.

use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::info;
use vigil_store::SimStore;
use vigil_types::{
    CheckResult, CheckStatus, LatestScore, ScanDetail, ScanMeta, ScanSnapshot, ScoreBreakdown,
    StatusCounts,
};

use crate::error::EngineError;

/// Scans kept in the list; the oldest is evicted beyond this.
pub const SCAN_LIST_CAP: usize = 25;

const DEFAULT_SCAN_LIMIT: usize = 25;
const MAX_SCAN_LIMIT: usize = 100;

/// Run one simulated scan and return its id.
///
/// The new result set is derived from the newest snapshot (empty when no
/// baseline exists), rescored, then persisted as two independent writes:
/// the list first, the detail map second.
pub fn run_scan(store: &mut SimStore) -> String {
    let mut scans = store.scans();
    let mut details = store.scan_details();

    let results = scans
        .first()
        .and_then(|meta| details.get(&meta.scan_id))
        .and_then(|detail| detail.snapshot.as_ref())
        .map(|snapshot| mutate_results(&snapshot.results))
        .unwrap_or_default();

    let created_at = Utc::now();
    // Same-second runs can draw the same suffix; regenerate until unique.
    let mut scan_id = new_scan_id(created_at);
    while details.contains_key(&scan_id) || scans.iter().any(|m| m.scan_id == scan_id) {
        scan_id = new_scan_id(created_at);
    }
    let status_counts = count_statuses(&results);
    let score = compute_score(status_counts);
    let domain_scores = compute_domain_scores(&results);

    let meta = ScanMeta {
        scan_id: scan_id.clone(),
        created_at,
        score,
        domain_scores: domain_scores.clone(),
    };
    let snapshot = ScanSnapshot {
        scan_id: scan_id.clone(),
        created_at,
        score,
        breakdown: ScoreBreakdown {
            domain_scores,
            status_counts,
        },
        results,
    };

    scans.insert(0, meta.clone());
    scans.truncate(SCAN_LIST_CAP);
    store.set_scans(&scans);

    details.insert(
        scan_id.clone(),
        ScanDetail {
            meta,
            snapshot: Some(snapshot),
        },
    );
    store.set_scan_details(&details);

    info!(scan_id = %scan_id, score, "simulated scan recorded");
    scan_id
}

/// Headline numbers for the newest scan, or explicit nulls when the list is
/// empty.
pub fn latest_score(store: &mut SimStore) -> LatestScore {
    match store.scans().into_iter().next() {
        Some(meta) => LatestScore {
            score: Some(meta.score),
            scan_id: Some(meta.scan_id),
            created_at: Some(meta.created_at),
            domain_scores: Some(meta.domain_scores),
        },
        None => LatestScore::default(),
    }
}

/// Scan list page, newest first. `limit` clamps to 1..=100 and defaults
/// to 25.
pub fn list_scans(store: &mut SimStore, limit: Option<usize>) -> Vec<ScanMeta> {
    let limit = limit.unwrap_or(DEFAULT_SCAN_LIMIT).clamp(1, MAX_SCAN_LIMIT);
    let mut scans = store.scans();
    scans.truncate(limit);
    scans
}

/// Detail lookup by scan id.
pub fn get_scan(store: &mut SimStore, scan_id: &str) -> Result<ScanDetail, EngineError> {
    store
        .scan_details()
        .remove(scan_id)
        .ok_or_else(|| EngineError::ScanNotFound(scan_id.to_string()))
}

/// One step along the fixed perturbation cycle.
fn flip_status(status: CheckStatus) -> CheckStatus {
    match status {
        CheckStatus::Fail => CheckStatus::Warn,
        CheckStatus::Warn => CheckStatus::Pass,
        CheckStatus::Pass => CheckStatus::Warn,
    }
}

/// Every 4th result (0, 4, 8, ...) moves one step; the rest are unchanged.
fn mutate_results(results: &[CheckResult]) -> Vec<CheckResult> {
    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            if idx % 4 == 0 {
                let mut flipped = result.clone();
                flipped.status = flip_status(result.status);
                flipped
            } else {
                result.clone()
            }
        })
        .collect()
}

fn count_statuses(results: &[CheckResult]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for result in results {
        match result.status {
            CheckStatus::Pass => counts.pass += 1,
            CheckStatus::Warn => counts.warn += 1,
            CheckStatus::Fail => counts.fail += 1,
        }
    }
    counts
}

/// score = round(100 * (pass + 0.5*warn) / total), clamped to 0-100. Zero
/// checks score zero.
fn compute_score(counts: StatusCounts) -> u8 {
    let total = f64::from(counts.total().max(1));
    let raw = (f64::from(counts.pass) + 0.5 * f64::from(counts.warn)) / total * 100.0;
    raw.round().clamp(0.0, 100.0) as u8
}

/// Per-domain ceiling: starts at 100, capped to 60 by any fail in the
/// domain, else to 85 by any warn. Every domain in the result set gets an
/// entry, so an all-pass domain records an explicit 100.
fn compute_domain_scores(results: &[CheckResult]) -> BTreeMap<String, u8> {
    let mut scores = BTreeMap::new();
    for result in results {
        let domain = if result.domain.is_empty() {
            "Other"
        } else {
            result.domain.as_str()
        };
        let entry = scores.entry(domain.to_string()).or_insert(100u8);
        match result.status {
            CheckStatus::Fail => *entry = (*entry).min(60),
            CheckStatus::Warn => *entry = (*entry).min(85),
            CheckStatus::Pass => {}
        }
    }
    scores
}

/// "sim-" + compact UTC timestamp + 3-digit random suffix.
fn new_scan_id(created_at: DateTime<Utc>) -> String {
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format!("sim-{}-{suffix:03}", created_at.format("%Y%m%d%H%M%S"))
}
