mod diff;
mod error;
mod scan;
mod scenario;
mod timeline;

pub use diff::diff_snapshots;
pub use error::EngineError;
pub use scan::{SCAN_LIST_CAP, get_scan, latest_score, list_scans, run_scan};
pub use scenario::{TIMELINE_CAP, cleanup, run_scenario};
pub use timeline::timeline;
