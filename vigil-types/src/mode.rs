use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which backend the gateway talks to.
///
/// `Demo` runs entirely offline against the simulation store. `Local` and
/// `Custom` forward to a remote API; they differ only in how their base URL
/// was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    Demo,
    Local,
    Custom,
}

impl AppMode {
    /// True when operations resolve against the offline simulation.
    pub fn is_offline(&self) -> bool {
        matches!(self, AppMode::Demo)
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppMode::Demo => write!(f, "demo"),
            AppMode::Local => write!(f, "local"),
            AppMode::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for AppMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "demo" => Ok(AppMode::Demo),
            "local" => Ok(AppMode::Local),
            "custom" => Ok(AppMode::Custom),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown mode: {0} (expected demo, local, or custom)")]
pub struct ParseModeError(String);

/// The resolved mode plus the API base URL it would use, broadcast to
/// subscribers whenever either changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeState {
    pub mode: AppMode,
    pub api_base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_from_str() {
        assert_eq!("demo".parse::<AppMode>().unwrap(), AppMode::Demo);
        assert_eq!("local".parse::<AppMode>().unwrap(), AppMode::Local);
        assert_eq!("custom".parse::<AppMode>().unwrap(), AppMode::Custom);
        assert!("prod".parse::<AppMode>().is_err());
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AppMode::Demo).unwrap(), "\"demo\"");
    }

    #[test]
    fn only_demo_is_offline() {
        assert!(AppMode::Demo.is_offline());
        assert!(!AppMode::Local.is_offline());
        assert!(!AppMode::Custom.is_offline());
    }
}
