// ---------------------------------------------------------------------------
// Gateway: one facade over two backends
// ---------------------------------------------------------------------------
//
// Every operation snapshots the effective mode once at entry and dispatches
// either to the offline engine (demo) or to the remote API (local/custom).
// A mode change mid-flight never redirects a call already dispatched.

use tokio::sync::{Mutex, broadcast, watch};
use tracing::warn;
use vigil_store::SimStore;
use vigil_types::{
    AppMode, CheckTransition, Health, LatestScore, ModeState, PolicyReport, PolicyType,
    PolicyValidateRequest, RunScanResponse, ScanDetail, ScanMeta, SimulateResponse, TimelineLog,
};

use crate::error::ClientError;
use crate::mode::ModeManager;
use crate::notice::Notice;
use crate::remote::RemoteApi;

const NOTICE_CAPACITY: usize = 16;

/// Backend resolved for a single operation.
enum Backend {
    Offline,
    Remote(String),
}

/// Mode-aware facade over the offline simulation and the remote API.
pub struct Gateway {
    store: Mutex<SimStore>,
    modes: Mutex<ModeManager>,
    remote: RemoteApi,
    notices: broadcast::Sender<Notice>,
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new()
    }
}

impl Gateway {
    /// Open the default store and preferences. A store that cannot be
    /// opened on disk falls back to memory; the session loses persistence
    /// but nothing else.
    pub fn new() -> Self {
        let store = SimStore::open_default().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to an in-memory store");
            SimStore::open_in_memory().expect("failed to open in-memory store")
        });
        Self::with_parts(store, ModeManager::load_default())
    }

    /// Assemble a gateway from explicit parts (tests use this to control
    /// the store and preference location).
    pub fn with_parts(store: SimStore, modes: ModeManager) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Self {
            store: Mutex::new(store),
            modes: Mutex::new(modes),
            remote: RemoteApi::new(),
            notices,
        }
    }

    /// Subscribe to advisory notices (remote unreachable and friends).
    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    // -- mode ---------------------------------------------------------------

    pub async fn mode(&self) -> ModeState {
        self.modes.lock().await.current()
    }

    pub async fn subscribe_mode(&self) -> watch::Receiver<ModeState> {
        self.modes.lock().await.subscribe()
    }

    pub async fn set_mode(&self, mode: AppMode) -> Result<ModeState, ClientError> {
        self.modes.lock().await.set_mode(mode)
    }

    pub async fn set_api_base_url(&self, url: &str) -> Result<ModeState, ClientError> {
        self.modes.lock().await.set_api_base_url(url)
    }

    // -- operations ---------------------------------------------------------

    pub async fn latest_score(&self) -> Result<LatestScore, ClientError> {
        match self.backend().await {
            Backend::Offline => Ok(vigil_engine::latest_score(&mut *self.store.lock().await)),
            Backend::Remote(base) => {
                let result = self.remote.latest_score(&base).await;
                self.observe(&base, result)
            }
        }
    }

    pub async fn list_scans(&self, limit: Option<usize>) -> Result<Vec<ScanMeta>, ClientError> {
        match self.backend().await {
            Backend::Offline => Ok(vigil_engine::list_scans(
                &mut *self.store.lock().await,
                limit,
            )),
            Backend::Remote(base) => {
                let result = self.remote.list_scans(&base, limit).await;
                self.observe(&base, result)
            }
        }
    }

    pub async fn scan(&self, scan_id: &str) -> Result<ScanDetail, ClientError> {
        match self.backend().await {
            Backend::Offline => {
                Ok(vigil_engine::get_scan(&mut *self.store.lock().await, scan_id)?)
            }
            Backend::Remote(base) => {
                let result = self.remote.scan(&base, scan_id).await;
                self.observe(&base, result)
            }
        }
    }

    pub async fn run_scan(&self) -> Result<RunScanResponse, ClientError> {
        match self.backend().await {
            Backend::Offline => {
                let scan_id = vigil_engine::run_scan(&mut *self.store.lock().await);
                Ok(RunScanResponse { scan_id })
            }
            Backend::Remote(base) => {
                let result = self.remote.run_scan(&base).await;
                self.observe(&base, result)
            }
        }
    }

    pub async fn validate_policy(
        &self,
        policy_json: &str,
        policy_type: PolicyType,
    ) -> Result<PolicyReport, ClientError> {
        match self.backend().await {
            Backend::Offline => Ok(vigil_policy::validate(policy_json, policy_type)),
            Backend::Remote(base) => {
                let request = PolicyValidateRequest {
                    policy_json: policy_json.to_string(),
                    policy_type,
                };
                let result = self.remote.validate_policy(&base, &request).await;
                self.observe(&base, result)
            }
        }
    }

    pub async fn simulate(&self, scenario: &str) -> Result<SimulateResponse, ClientError> {
        match self.backend().await {
            Backend::Offline => {
                let operation_id =
                    vigil_engine::run_scenario(&mut *self.store.lock().await, scenario);
                Ok(SimulateResponse { operation_id })
            }
            Backend::Remote(base) => {
                let result = self.remote.simulate(&base, scenario).await;
                self.observe(&base, result)
            }
        }
    }

    pub async fn cleanup(&self) -> Result<SimulateResponse, ClientError> {
        match self.backend().await {
            Backend::Offline => {
                let operation_id = vigil_engine::cleanup(&mut *self.store.lock().await);
                Ok(SimulateResponse { operation_id })
            }
            Backend::Remote(base) => {
                let result = self.remote.cleanup(&base).await;
                self.observe(&base, result)
            }
        }
    }

    pub async fn timeline(&self, since: Option<&str>) -> Result<TimelineLog, ClientError> {
        match self.backend().await {
            Backend::Offline => Ok(vigil_engine::timeline(
                &mut *self.store.lock().await,
                since,
            )),
            Backend::Remote(base) => {
                let result = self.remote.timeline(&base, since).await;
                self.observe(&base, result)
            }
        }
    }

    /// Fetch two scan details and report status transitions between them.
    /// A scan whose snapshot has not been written yet diffs as empty.
    pub async fn diff(&self, a: &str, b: &str) -> Result<Vec<CheckTransition>, ClientError> {
        let a = self.scan(a).await?;
        let b = self.scan(b).await?;
        Ok(match (a.snapshot, b.snapshot) {
            (Some(a), Some(b)) => vigil_engine::diff_snapshots(&a, &b),
            _ => Vec::new(),
        })
    }

    /// Liveness of the active backend. Demo mode is always alive.
    pub async fn health(&self) -> Result<Health, ClientError> {
        match self.backend().await {
            Backend::Offline => Ok(Health { ok: true }),
            Backend::Remote(base) => {
                let result = self.remote.health(&base).await;
                self.observe(&base, result)
            }
        }
    }

    // -- dispatch -----------------------------------------------------------

    async fn backend(&self) -> Backend {
        let state = self.modes.lock().await.current();
        if state.mode.is_offline() {
            Backend::Offline
        } else {
            Backend::Remote(state.api_base_url)
        }
    }

    /// Broadcast an `ApiUnreachable` notice for a failed remote call, then
    /// hand the error back unchanged. Never retries.
    fn observe<T>(&self, base_url: &str, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(e) = &result {
            warn!(base_url = %base_url, error = %e, "remote API call failed");
            let _ = self.notices.send(Notice::ApiUnreachable {
                base_url: base_url.to_string(),
                detail: e.to_string(),
            });
        }
        result
    }
}
