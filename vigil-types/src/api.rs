use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Latest-score response. `score` and `scan_id` are explicit nulls when no
/// scan exists yet; the enrichment fields are omitted entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestScore {
    pub score: Option<u8>,
    pub scan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_scores: Option<BTreeMap<String, u8>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunScanResponse {
    pub scan_id: String,
}

/// Response of scenario runs and cleanup. Remote APIs may attach extra
/// fields (scenario name, start time); they are ignored on deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub operation_id: String,
}

/// Liveness probe payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub ok: bool,
}
