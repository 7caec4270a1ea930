//! Property-based tests for the wire types.
//!
//! Uses proptest to verify:
//! 1. Task status labels parse back from any casing and separator style.
//! 2. Tasks survive a JSON round-trip with the backend's status labels.
//! 3. Partial updates serialize only the fields that are set.
//! 4. Arbitrary strings never panic the status parser.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{TimeZone, Utc};
use pipetrack_proto::task::{Task, TaskStatus, UpdateTaskInput};
use proptest::prelude::*;
use serde_json::Value;

fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(TaskStatus::ALL.to_vec())
}

/// Rewrites a label with random casing and separator.
fn restyle(label: &str, upper: bool, sep: char) -> String {
    let spaced = label.replace(' ', &sep.to_string());
    if upper {
        spaced.to_uppercase()
    } else {
        spaced.to_lowercase()
    }
}

fn arb_task() -> impl Strategy<Value = Task> {
    (
        1..u64::from(u32::MAX),
        "[^\\x00]{1,40}",
        "[^\\x00]{0,80}",
        arb_status(),
        1..10_000_u64,
        prop::option::of("2024-0[1-9]-[12][0-9]"),
        any::<bool>(),
        0..2_000_000_000_i64,
    )
        .prop_map(
            |(id, title, description, status, creator_id, due_date, archived, secs)| {
                let at = Utc.timestamp_opt(secs, 0).unwrap();
                Task {
                    id,
                    title,
                    description,
                    status,
                    creator_id,
                    creator_name: None,
                    due_date,
                    archived,
                    created_at: at,
                    updated_at: at,
                }
            },
        )
}

proptest! {
    #[test]
    fn status_parses_from_any_style(
        status in arb_status(),
        upper in any::<bool>(),
        sep in prop_oneof![Just(' '), Just('-'), Just('_')],
    ) {
        let styled = restyle(status.as_str(), upper, sep);
        prop_assert_eq!(styled.parse::<TaskStatus>().unwrap(), status);
    }

    #[test]
    fn status_parser_never_panics(s in "\\PC{0,20}") {
        let _ = s.parse::<TaskStatus>();
    }

    #[test]
    fn task_json_round_trip(task in arb_task()) {
        let json = serde_json::to_value(&task).unwrap();
        prop_assert_eq!(&json["status"], &Value::from(task.status.as_str()));
        let back: Task = serde_json::from_value(json).unwrap();
        prop_assert_eq!(back, task);
    }

    #[test]
    fn partial_update_serializes_set_fields_only(
        title in prop::option::of("[a-z]{1,10}"),
        status in prop::option::of(arb_status()),
    ) {
        let input = UpdateTaskInput { title: title.clone(), status, ..Default::default() };
        let json = serde_json::to_value(&input).unwrap();
        let object = json.as_object().unwrap();

        prop_assert_eq!(object.len(), usize::from(title.is_some()) + usize::from(status.is_some()));
        prop_assert!(!object.contains_key("description"));
        prop_assert_eq!(input.is_empty(), object.is_empty());
    }
}
