pub mod api;
pub mod mode;
pub mod policy;
pub mod scan;
pub mod timeline;

pub use api::{Health, LatestScore, RunScanResponse, SimulateResponse};
pub use mode::{AppMode, ModeState, ParseModeError};
pub use policy::{
    FindingSeverity, PolicyFinding, PolicyReport, PolicyType, PolicyValidateRequest, ReportMode,
};
pub use scan::{
    CheckResult, CheckStatus, CheckTransition, ScanDetail, ScanMeta, ScanSnapshot, ScoreBreakdown,
    Severity, StatusCounts,
};
pub use timeline::{TimelineItem, TimelineLog, TimelineResource};
