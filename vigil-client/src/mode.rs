use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};
use vigil_store::data_dir;
use vigil_types::{AppMode, ModeState};

use crate::error::ClientError;

/// Port the locally-run backend listens on by default.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

const PREFS_FILE: &str = "prefs.toml";

/// On-disk preference file. Absent fields mean "never chosen".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Prefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mode: Option<AppMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_base_url: Option<String>,
}

/// Owns the persisted mode preference and broadcasts the resolved state.
///
/// `mode` and `api_base_url` persist independently; the effective mode is
/// derived on every change and pushed to watch subscribers.
pub struct ModeManager {
    path: PathBuf,
    prefs: Prefs,
    tx: watch::Sender<ModeState>,
}

impl ModeManager {
    /// Load preferences from the default data directory.
    pub fn load_default() -> Self {
        Self::load_from(&data_dir().join(PREFS_FILE))
    }

    /// Load preferences from an explicit path. A missing or malformed file
    /// yields the defaults; a bad preference never blocks startup.
    pub fn load_from(path: &Path) -> Self {
        let prefs = match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Prefs>(&content) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring malformed preferences");
                    Prefs::default()
                }
            },
            Err(_) => Prefs::default(),
        };
        let (tx, _) = watch::channel(resolve(&prefs));
        Self {
            path: path.to_path_buf(),
            prefs,
            tx,
        }
    }

    /// The currently resolved state.
    pub fn current(&self) -> ModeState {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<ModeState> {
        self.tx.subscribe()
    }

    /// Persist an explicit mode choice and broadcast the new state.
    pub fn set_mode(&mut self, mode: AppMode) -> Result<ModeState, ClientError> {
        self.prefs.mode = Some(mode);
        self.persist()?;
        let state = resolve(&self.prefs);
        info!(mode = %state.mode, "mode changed");
        self.tx.send_replace(state.clone());
        Ok(state)
    }

    /// Persist an API base URL and broadcast the new state. Trailing
    /// slashes are stripped so path joins stay predictable.
    pub fn set_api_base_url(&mut self, url: &str) -> Result<ModeState, ClientError> {
        let trimmed = url.trim_end_matches('/');
        reqwest::Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl {
            url: trimmed.to_string(),
            detail: e.to_string(),
        })?;
        self.prefs.api_base_url = Some(trimmed.to_string());
        self.persist()?;
        let state = resolve(&self.prefs);
        info!(api_base_url = %state.api_base_url, "API base URL changed");
        self.tx.send_replace(state.clone());
        Ok(state)
    }

    fn persist(&self) -> Result<(), ClientError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(&self.prefs)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Effective mode: an explicit choice always wins; otherwise `local` when
/// the user pointed the client at a loopback URL, else `demo`.
fn resolve(prefs: &Prefs) -> ModeState {
    let api_base_url = prefs
        .api_base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let mode = match prefs.mode {
        Some(mode) => mode,
        None if prefs.api_base_url.is_some() && is_loopback_url(&api_base_url) => AppMode::Local,
        None => AppMode::Demo,
    };
    ModeState { mode, api_base_url }
}

fn is_loopback_url(url: &str) -> bool {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return false;
    };
    matches!(
        parsed.host_str(),
        Some("127.0.0.1" | "localhost" | "[::1]")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_in(dir: &tempfile::TempDir) -> ModeManager {
        ModeManager::load_from(&dir.path().join("prefs.toml"))
    }

    #[test]
    fn fresh_install_defaults_to_demo() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(&dir);
        let state = manager.current();
        assert_eq!(state.mode, AppMode::Demo);
        assert_eq!(state.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn explicit_mode_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        manager.set_mode(AppMode::Custom).unwrap();

        let reloaded = manager_in(&dir);
        assert_eq!(reloaded.current().mode, AppMode::Custom);
    }

    #[test]
    fn loopback_url_without_explicit_mode_resolves_local() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        let state = manager.set_api_base_url("http://localhost:9000").unwrap();
        assert_eq!(state.mode, AppMode::Local);
        assert_eq!(state.api_base_url, "http://localhost:9000");
    }

    #[test]
    fn public_url_without_explicit_mode_stays_demo() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        let state = manager
            .set_api_base_url("https://api.example.com")
            .unwrap();
        assert_eq!(state.mode, AppMode::Demo);
    }

    #[test]
    fn explicit_mode_beats_url_heuristic() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        manager.set_api_base_url("http://127.0.0.1:8000").unwrap();
        let state = manager.set_mode(AppMode::Demo).unwrap();
        assert_eq!(state.mode, AppMode::Demo);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        let state = manager
            .set_api_base_url("https://vigil.example.com/")
            .unwrap();
        assert_eq!(state.api_base_url, "https://vigil.example.com");
    }

    #[test]
    fn invalid_url_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        let err = manager.set_api_base_url("not a url").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
        // Nothing persisted, nothing broadcast.
        assert_eq!(manager.current().api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn malformed_prefs_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "mode = 42\nnot even toml {{{").unwrap();

        let manager = ModeManager::load_from(&path);
        assert_eq!(manager.current().mode, AppMode::Demo);
    }

    #[test]
    fn subscribers_see_every_change() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        let mut rx = manager.subscribe();
        assert!(!rx.has_changed().unwrap());

        manager.set_mode(AppMode::Local).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().mode, AppMode::Local);

        manager.set_api_base_url("http://127.0.0.1:9000").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().api_base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn ipv6_loopback_counts_as_local() {
        assert!(is_loopback_url("http://[::1]:8000"));
        assert!(is_loopback_url("http://127.0.0.1:8000"));
        assert!(!is_loopback_url("http://10.0.0.5:8000"));
        assert!(!is_loopback_url("::1"));
    }
}
