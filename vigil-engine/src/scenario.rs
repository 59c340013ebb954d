// ---------------------------------------------------------------------------
// Attack-scenario simulator
// ---------------------------------------------------------------------------
//
// A fixed catalog of short CloudTrail-style event sequences. Running a
// scenario instantiates its template at absolute timestamps and appends the
// events to the capped activity log.

use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;
use vigil_store::{SIM_RESOURCE_PREFIX, SimStore};
use vigil_types::{TimelineItem, TimelineResource};

/// Events kept in the activity log; the oldest are evicted beyond this.
pub const TIMELINE_CAP: usize = 200;

const SIM_USERNAME: &str = "demo-user";

/// Append the named scenario's events to the activity log and return a
/// fresh operation id. Unknown names replay a single marker event.
pub fn run_scenario(store: &mut SimStore, scenario: &str) -> String {
    let events = scenario_events(scenario, Utc::now());
    let appended = events.len();

    let mut log = store.timeline();
    log.items.extend(events);
    if log.items.len() > TIMELINE_CAP {
        let excess = log.items.len() - TIMELINE_CAP;
        log.items.drain(..excess);
    }
    store.set_timeline(&log);

    let operation_id = new_operation_id();
    info!(scenario, appended, operation_id = %operation_id, "scenario events appended");
    operation_id
}

/// Reset the activity log to the bundled baseline. The only reset
/// primitive; scan state is untouched.
pub fn cleanup(store: &mut SimStore) -> String {
    store.set_timeline(&vigil_store::seed_timeline());
    let operation_id = new_operation_id();
    info!(operation_id = %operation_id, "activity log reset to baseline");
    operation_id
}

fn new_operation_id() -> String {
    format!("sim-op-{}", Uuid::new_v4())
}

fn scenario_events(scenario: &str, now: DateTime<Utc>) -> Vec<TimelineItem> {
    let at = |ms: i64| Some(now + Duration::milliseconds(ms));
    match scenario {
        "iam-user" => vec![
            event(at(0), "CreateUser", "iam.amazonaws.com", vec![user_resource()]),
            event(
                at(800),
                "PutUserPolicy",
                "iam.amazonaws.com",
                vec![user_resource()],
            ),
        ],
        "s3-public-acl" => vec![
            event(
                at(0),
                "CreateBucket",
                "s3.amazonaws.com",
                vec![bucket_resource()],
            ),
            event(
                at(1200),
                "PutBucketAcl",
                "s3.amazonaws.com",
                vec![bucket_resource()],
            ),
        ],
        "admin-attach-attempt" => vec![event(
            at(0),
            "AttachUserPolicy",
            "iam.amazonaws.com",
            vec![user_resource()],
        )],
        _ => vec![event(at(0), "Replay", "vigil.local", vec![])],
    }
}

fn event(
    event_time: Option<DateTime<Utc>>,
    name: &str,
    source: &str,
    resources: Vec<TimelineResource>,
) -> TimelineItem {
    TimelineItem {
        event_time,
        event_name: name.to_string(),
        event_source: source.to_string(),
        username: Some(SIM_USERNAME.to_string()),
        resources,
    }
}

fn user_resource() -> TimelineResource {
    TimelineResource {
        name: format!("{SIM_RESOURCE_PREFIX}user-demo"),
        resource_type: "AWS::IAM::User".to_string(),
    }
}

fn bucket_resource() -> TimelineResource {
    TimelineResource {
        name: format!("{SIM_RESOURCE_PREFIX}bucket-demo"),
        resource_type: "AWS::S3::Bucket".to_string(),
    }
}
