//! HTTP client for a remote Vigil backend.
//!
//! Paths are fixed; the base URL comes from the mode manager. Unknown
//! response fields are ignored so richer server payloads deserialize
//! cleanly.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use vigil_types::{
    Health, LatestScore, PolicyReport, PolicyValidateRequest, RunScanResponse, ScanDetail,
    ScanMeta, SimulateResponse, TimelineLog,
};

use crate::error::ClientError;

pub struct RemoteApi {
    client: reqwest::Client,
}

impl Default for RemoteApi {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteApi {
    /// Create a client with a 10-second timeout.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    pub async fn latest_score(&self, base_url: &str) -> Result<LatestScore, ClientError> {
        self.get(base_url, "/api/score/latest", &[]).await
    }

    pub async fn list_scans(
        &self,
        base_url: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ScanMeta>, ClientError> {
        let query: Vec<(&str, String)> = match limit {
            Some(n) => vec![("limit", n.to_string())],
            None => vec![],
        };
        self.get(base_url, "/api/scans", &query).await
    }

    pub async fn scan(&self, base_url: &str, scan_id: &str) -> Result<ScanDetail, ClientError> {
        self.get(base_url, &format!("/api/scans/{scan_id}"), &[])
            .await
    }

    pub async fn run_scan(&self, base_url: &str) -> Result<RunScanResponse, ClientError> {
        self.post(base_url, "/api/scan").await
    }

    pub async fn validate_policy(
        &self,
        base_url: &str,
        request: &PolicyValidateRequest,
    ) -> Result<PolicyReport, ClientError> {
        let url = format!("{base_url}/api/policy/validate");
        debug!(url = %url, "POST");
        let resp = self.client.post(&url).json(request).send().await?;
        read_json(resp).await
    }

    pub async fn simulate(
        &self,
        base_url: &str,
        scenario: &str,
    ) -> Result<SimulateResponse, ClientError> {
        self.post(base_url, &format!("/api/simulate/{scenario}"))
            .await
    }

    pub async fn cleanup(&self, base_url: &str) -> Result<SimulateResponse, ClientError> {
        self.post(base_url, "/api/simulate/cleanup").await
    }

    pub async fn timeline(
        &self,
        base_url: &str,
        since: Option<&str>,
    ) -> Result<TimelineLog, ClientError> {
        let query: Vec<(&str, String)> = match since {
            Some(t) => vec![("since", t.to_string())],
            None => vec![],
        };
        self.get(base_url, "/api/timeline", &query).await
    }

    pub async fn health(&self, base_url: &str) -> Result<Health, ClientError> {
        self.get(base_url, "/healthz", &[]).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        base_url: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = format!("{base_url}{path}");
        debug!(url = %url, "GET");
        let mut req = self.client.get(&url);
        if !query.is_empty() {
            req = req.query(query);
        }
        let resp = req.send().await?;
        read_json(resp).await
    }

    async fn post<T: DeserializeOwned>(&self, base_url: &str, path: &str) -> Result<T, ClientError> {
        let url = format!("{base_url}{path}");
        debug!(url = %url, "POST");
        let resp = self.client.post(&url).send().await?;
        read_json(resp).await
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            status,
            url: resp.url().to_string(),
        });
    }
    Ok(resp.json::<T>().await?)
}
