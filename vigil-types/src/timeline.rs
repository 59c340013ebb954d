use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resource touched by a timeline event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineResource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// One CloudTrail-style activity event. Field names are camelCase on the
/// wire to match the event-log contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    /// Absent for events whose delivery lagged their capture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<DateTime<Utc>>,
    pub event_name: String,
    pub event_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<TimelineResource>,
}

/// The stored and wire shape of the activity log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineLog {
    pub items: Vec<TimelineItem>,
}
