//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for policy records. These fixtures are
//! designed to be consistent and predictable for unit and API tests.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::PolicyId;
use domain_policy::{NewPolicy, Policy, PolicyDraft, PolicyType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Midnight UTC on the given day
///
/// # Panics
///
/// Panics on an impossible calendar date
pub fn utc_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid calendar date")
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard policy start date (Jan 1, 2024)
    pub fn policy_start() -> DateTime<Utc> {
        utc_date(2024, 1, 1)
    }

    /// Standard policy end date (Dec 31, 2024)
    pub fn policy_end() -> DateTime<Utc> {
        utc_date(2024, 12, 31)
    }

    /// Creation time used for pre-stored records
    pub fn created_at() -> DateTime<Utc> {
        utc_date(2024, 1, 1)
    }
}

/// Fixture for policy records
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// The reference candidate: AB123456, Jane Doe, Health, 2024, 500.00
    pub fn jane_doe() -> PolicyDraft {
        PolicyDraft {
            policy_number: "AB123456".to_string(),
            holder_name: "Jane Doe".to_string(),
            policy_type: PolicyType::Health,
            start_date: TemporalFixtures::policy_start(),
            end_date: TemporalFixtures::policy_end(),
            premium: dec!(500.00),
        }
    }

    /// A standard premium amount
    pub fn premium() -> Decimal {
        dec!(500.00)
    }

    /// Four stored records with distinct numbers, names, types, start dates,
    /// premiums and creation times
    ///
    /// | id | number   | holder      | type    | premium | start      | created    |
    /// |----|----------|-------------|---------|---------|------------|------------|
    /// | 1  | ABC00001 | Mary Major  | Life    | 100     | 2024-03-01 | 2024-01-01 |
    /// | 2  | XYZ00002 | Zed Abcott  | Health  | 900     | 2024-01-01 | 2024-01-03 |
    /// | 3  | QRS00003 | Alice Brown | Vehicle | 450     | 2024-06-01 | 2024-01-02 |
    /// | 4  | LMN00004 | Bob Stone   | Health  | 450     | 2023-06-01 | 2024-01-04 |
    pub fn listing_set() -> Vec<Policy> {
        Self::listing_rows()
            .into_iter()
            .enumerate()
            .map(|(i, new)| new.into_policy(PolicyId::new(i as i64 + 1)))
            .collect()
    }

    /// The records of [`listing_set`](Self::listing_set) before ids are assigned,
    /// in id order
    pub fn listing_rows() -> Vec<NewPolicy> {
        vec![
            listing_row("ABC00001", "Mary Major", PolicyType::Life, dec!(100), utc_date(2024, 3, 1), utc_date(2024, 1, 1)),
            listing_row("XYZ00002", "Zed Abcott", PolicyType::Health, dec!(900), utc_date(2024, 1, 1), utc_date(2024, 1, 3)),
            listing_row("QRS00003", "Alice Brown", PolicyType::Vehicle, dec!(450), utc_date(2024, 6, 1), utc_date(2024, 1, 2)),
            listing_row("LMN00004", "Bob Stone", PolicyType::Health, dec!(450), utc_date(2023, 6, 1), utc_date(2024, 1, 4)),
        ]
    }
}

fn listing_row(
    policy_number: &str,
    holder_name: &str,
    policy_type: PolicyType,
    premium: Decimal,
    start_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
) -> NewPolicy {
    NewPolicy {
        policy_number: policy_number.to_string(),
        holder_name: holder_name.to_string(),
        policy_type,
        start_date,
        end_date: utc_date(2030, 1, 1),
        premium,
        created_at,
        updated_at: created_at,
    }
}
