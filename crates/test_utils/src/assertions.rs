//! Custom Test Assertions
//!
//! Provides assertion helpers for policy records that give more meaningful
//! failure messages than comparing whole structs.

use domain_policy::{Policy, PolicyDraft, SortBy};
use serde_json::Value;

/// Asserts that a stored record carries every field of a candidate
///
/// Ids and timestamps are not compared.
pub fn assert_matches_draft(policy: &Policy, draft: &PolicyDraft) {
    assert_eq!(policy.policy_number, draft.policy_number, "policy number differs");
    assert_eq!(policy.holder_name, draft.holder_name, "holder name differs");
    assert_eq!(policy.policy_type, draft.policy_type, "policy type differs");
    assert_eq!(policy.start_date, draft.start_date, "start date differs");
    assert_eq!(policy.end_date, draft.end_date, "end date differs");
    assert_eq!(policy.premium, draft.premium, "premium differs");
}

/// Asserts that a listing is in the order a sort key promises
///
/// Only the sort key itself is checked, so ties may appear in any order.
pub fn assert_sorted_by(policies: &[Policy], sort_by: SortBy) {
    for pair in policies.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let in_order = match sort_by {
            SortBy::StartDateDesc => a.start_date >= b.start_date,
            SortBy::PremiumDesc => a.premium >= b.premium,
            SortBy::HolderNameAsc => a.holder_name <= b.holder_name,
            SortBy::CreatedAtDesc => a.created_at >= b.created_at,
        };
        assert!(
            in_order,
            "records {} and {} are out of {:?} order",
            a.id, b.id, sort_by
        );
    }
}

/// Returns the `id` fields of a JSON array of records
///
/// # Panics
///
/// Panics if the value is not an array of objects with numeric ids
pub fn json_ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|item| item["id"].as_i64().expect("expected a numeric id"))
        .collect()
}

/// Asserts that an error body carries the expected `message`
pub fn assert_error_message(body: &Value, expected: &str) {
    assert_eq!(
        body["message"].as_str(),
        Some(expected),
        "unexpected error body: {body}"
    );
}
