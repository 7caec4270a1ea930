//! Property-based tests for request construction and error normalization.
//!
//! Uses proptest to verify:
//! 1. Absent query parameters never appear in a built URL.
//! 2. Present parameters come back, in order, with their exact values.
//! 3. A JSON `error` field always wins, then `message`.
//! 4. Text error bodies, empty or not, are reported verbatim.
//! 5. Successful JSON bodies decode to the same value.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pipetrack::api::{ApiClient, ResponseBody};
use pipetrack::session::SessionStore;
use pipetrack_proto::query::{PaginationParams, QueryParam, SortOrder};
use proptest::prelude::*;
use serde_json::{Value, json};

fn client() -> ApiClient {
    ApiClient::new("http://localhost:8080", SessionStore::in_memory()).unwrap()
}

/// Strategy for a parameter list with unique names and random presence.
fn arb_params() -> impl Strategy<Value = Vec<QueryParam>> {
    prop::collection::vec(
        ("[a-z]{1,6}", prop::option::of("[ -~]{0,12}")),
        0..8,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (name, value))| (format!("{name}{i}"), value))
            .collect()
    })
}

fn arb_pagination() -> impl Strategy<Value = PaginationParams> {
    (
        prop::option::of(1..1000_u32),
        prop::option::of(1..200_u32),
        prop::option::of("[a-zA-Z ]{1,10}"),
        prop::option::of("[a-z_]{1,10}"),
        prop::option::of(prop_oneof![Just(SortOrder::Asc), Just(SortOrder::Desc)]),
    )
        .prop_map(|(page, limit, search, sort_by, order)| PaginationParams {
            page,
            limit,
            search,
            sort_by,
            order,
        })
}

proptest! {
    #[test]
    fn absent_params_are_omitted(params in arb_params()) {
        let url = client().build_url("/api/tasks", &params).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let expected: Vec<(String, String)> = params
            .iter()
            .filter_map(|(k, v)| v.clone().map(|v| (k.clone(), v)))
            .collect();

        prop_assert_eq!(&pairs, &expected);
        if expected.is_empty() {
            prop_assert_eq!(url.query(), None);
        }
        prop_assert_eq!(url.path(), "/api/tasks");
    }

    #[test]
    fn pagination_query_matches_present_fields(params in arb_pagination()) {
        let url = client().build_url("/api/tasks", &params.to_query()).unwrap();
        let names: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();

        let present = [
            ("page", params.page.is_some()),
            ("limit", params.limit.is_some()),
            ("search", params.search.is_some()),
            ("sort_by", params.sort_by.is_some()),
            ("order", params.order.is_some()),
        ];
        let expected: Vec<String> = present
            .iter()
            .filter(|(_, p)| *p)
            .map(|(n, _)| (*n).to_string())
            .collect();
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn error_field_wins(error in "[^\\x00]{1,40}", message in "[^\\x00]{0,40}", status in 400..600_u16) {
        let body = ResponseBody::Json(json!({ "error": error, "message": message }));
        prop_assert_eq!(body.error_message(status), error);
    }

    #[test]
    fn message_field_used_without_error(message in "[^\\x00]{1,40}", status in 400..600_u16) {
        let body = ResponseBody::Json(json!({ "message": message, "code": 17 }));
        prop_assert_eq!(body.error_message(status), message);
    }

    #[test]
    fn json_without_fields_falls_back_to_status(status in 400..600_u16, n in any::<i64>()) {
        let body = ResponseBody::Json(json!({ "code": n }));
        prop_assert_eq!(body.error_message(status), format!("HTTP Error: {status}"));
    }

    #[test]
    fn text_error_is_verbatim(text in "[^\\x00]{0,80}", status in 400..600_u16) {
        let body = ResponseBody::parse(Some("text/html"), text.clone());
        prop_assert_eq!(body.error_message(status), text);
    }

    #[test]
    fn json_success_body_is_unchanged(
        a in any::<i64>(),
        b in "[^\\x00]{0,20}",
        c in prop::collection::vec(any::<bool>(), 0..5),
    ) {
        let value = json!({ "a": a, "b": b, "c": c, "d": null });
        let parsed = ResponseBody::parse(Some("application/json"), value.to_string());
        prop_assert_eq!(parsed.clone(), ResponseBody::Json(value.clone()));
        let typed: Value = parsed.into_typed().unwrap();
        prop_assert_eq!(typed, value);
    }
}
