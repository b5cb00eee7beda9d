//! Policy record and candidate types
//!
//! `Policy` is the persisted record. `PolicyDraft` is the candidate a caller
//! submits for create or update; it carries no identifier or timestamps,
//! since those are assigned by the store and the service.
//!
//! # Invariants
//!
//! - `id`, `policy_number` and `created_at` never change after creation
//! - `end_date > start_date` and `premium > 0` for every stored record
//! - `updated_at` strictly advances on every successful update

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::PolicyId;

/// Line of business a policy belongs to
///
/// Persisted and serialized by name (`"Life"`, `"Health"`, ...), never by
/// ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    Life,
    Health,
    Vehicle,
    Property,
}

impl PolicyType {
    /// All policy types in declaration order
    pub const ALL: [PolicyType; 4] = [
        PolicyType::Life,
        PolicyType::Health,
        PolicyType::Vehicle,
        PolicyType::Property,
    ];

    /// Returns the canonical name used for storage and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Life => "Life",
            PolicyType::Health => "Health",
            PolicyType::Vehicle => "Vehicle",
            PolicyType::Property => "Property",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not the name of a policy type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown policy type: {0}")]
pub struct ParsePolicyTypeError(pub String);

impl FromStr for PolicyType {
    type Err = ParsePolicyTypeError;

    /// Parses a policy type name, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePolicyTypeError(s.to_string()))
    }
}

/// A caller-supplied policy record that has not been validated or stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDraft {
    pub policy_number: String,
    pub holder_name: String,
    pub policy_type: PolicyType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub premium: Decimal,
}

/// A stored policy record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub policy_number: String,
    pub holder_name: String,
    pub policy_type: PolicyType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub premium: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Policy {
    /// Overwrites the mutable fields from a candidate record
    ///
    /// `id`, `policy_number` and `created_at` are left untouched; the
    /// candidate's policy number is ignored. `updated_at` moves to `now`, or
    /// one microsecond past its previous value if the clock has not advanced
    /// at storage precision.
    pub fn apply_update(&mut self, draft: PolicyDraft, now: DateTime<Utc>) {
        self.holder_name = draft.holder_name;
        self.policy_type = draft.policy_type;
        self.start_date = draft.start_date;
        self.end_date = draft.end_date;
        self.premium = draft.premium;
        self.updated_at = now.max(self.updated_at + Duration::microseconds(1));
    }

    /// Returns the candidate view of this record
    pub fn to_draft(&self) -> PolicyDraft {
        PolicyDraft {
            policy_number: self.policy_number.clone(),
            holder_name: self.holder_name.clone(),
            policy_type: self.policy_type,
            start_date: self.start_date,
            end_date: self.end_date,
            premium: self.premium,
        }
    }
}

/// Current time truncated to the store's microsecond precision
///
/// Timestamps handed to the store compare equal to the ones read back.
pub fn storage_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
