use chrono::{DateTime, Utc};
use vigil_store::SimStore;
use vigil_types::TimelineLog;

/// Activity log, optionally filtered to events at or after `since`.
///
/// Insertion order is preserved. An item without an eventTime always
/// passes, and a `since` that does not parse as RFC 3339 disables the
/// filter entirely rather than failing the call.
pub fn timeline(store: &mut SimStore, since: Option<&str>) -> TimelineLog {
    let log = store.timeline();
    let Some(since) = since else {
        return log;
    };
    let Some(cutoff) = parse_since(since) else {
        return log;
    };
    TimelineLog {
        items: log
            .items
            .into_iter()
            .filter(|item| match item.event_time {
                Some(t) => t >= cutoff,
                None => true,
            })
            .collect(),
    }
}

fn parse_since(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_since_accepts_rfc3339() {
        let parsed = parse_since("2025-01-15T09:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap());
    }

    #[test]
    fn parse_since_handles_offsets() {
        let parsed = parse_since("2025-01-15T10:00:00+01:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap());
    }

    #[test]
    fn parse_since_rejects_garbage() {
        assert!(parse_since("yesterday").is_none());
        assert!(parse_since("").is_none());
    }
}
