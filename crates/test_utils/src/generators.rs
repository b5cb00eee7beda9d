//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random policy data, both
//! data that satisfies the validation rules and data that breaks exactly
//! one of them.

use chrono::{DateTime, Duration, Utc};
use domain_policy::{PolicyDraft, PolicyType};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating any policy type
pub fn policy_type_strategy() -> impl Strategy<Value = PolicyType> {
    prop_oneof![
        Just(PolicyType::Life),
        Just(PolicyType::Health),
        Just(PolicyType::Vehicle),
        Just(PolicyType::Property),
    ]
}

/// Strategy for policy numbers that pass the format rule (8 to 20 uppercase
/// letters and digits)
pub fn valid_policy_number_strategy() -> impl Strategy<Value = String> {
    "[A-Z0-9]{8,20}"
}

/// Strategy for policy numbers that are too short
pub fn short_policy_number_strategy() -> impl Strategy<Value = String> {
    "[A-Z0-9]{0,7}"
}

/// Strategy for policy numbers with at least one character outside `A-Z0-9`
pub fn malformed_policy_number_strategy() -> impl Strategy<Value = String> {
    ("[A-Z0-9]{4,8}", "[a-z\\-_ .#]", "[A-Z0-9]{4,8}")
        .prop_map(|(head, bad, tail)| format!("{head}{bad}{tail}"))
}

/// Strategy for holder names within the 100 character limit
pub fn holder_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z .'-]{0,60}"
}

/// Strategy for premiums greater than zero, up to four decimal places
pub fn positive_premium_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64, 0u32..4u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Strategy for premiums that are zero or negative
pub fn non_positive_premium_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64, 0u32..4u32).prop_map(|(m, s)| -Decimal::new(m, s))
}

/// Strategy for timestamps between 2000 and roughly 2060, whole seconds
pub fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..2_840_000_000i64)
        .prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap_or_default())
}

/// Strategy for a coverage period whose end is strictly after its start
pub fn valid_period_strategy() -> impl Strategy<Value = (DateTime<Utc>, DateTime<Utc>)> {
    (timestamp_strategy(), 1i64..3_650i64)
        .prop_map(|(start, days)| (start, start + Duration::days(days)))
}

/// Strategy for a period whose end is on or before its start
pub fn inverted_period_strategy() -> impl Strategy<Value = (DateTime<Utc>, DateTime<Utc>)> {
    (timestamp_strategy(), 0i64..3_650i64)
        .prop_map(|(start, days)| (start, start - Duration::days(days)))
}

/// Strategy for candidates that pass every creation rule
pub fn valid_draft_strategy() -> impl Strategy<Value = PolicyDraft> {
    (
        valid_policy_number_strategy(),
        holder_name_strategy(),
        policy_type_strategy(),
        valid_period_strategy(),
        positive_premium_strategy(),
    )
        .prop_map(|(policy_number, holder_name, policy_type, (start_date, end_date), premium)| {
            PolicyDraft {
                policy_number,
                holder_name,
                policy_type,
                start_date,
                end_date,
                premium,
            }
        })
}

