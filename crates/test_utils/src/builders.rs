//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use core_kernel::PolicyId;
use domain_policy::{NewPolicy, Policy, PolicyDraft, PolicyType};
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::fixtures::{PolicyFixtures, TemporalFixtures};

static NEXT_NUMBER: AtomicU32 = AtomicU32::new(1);

/// Returns a valid policy number not handed out before in this process
pub fn unique_policy_number() -> String {
    format!("TST{:05}", NEXT_NUMBER.fetch_add(1, Ordering::Relaxed))
}

/// Builder for constructing test policy data
///
/// Defaults: a fresh valid policy number, a generated holder name, `Life`,
/// the 2024 calendar year and the standard premium.
#[derive(Debug, Clone)]
pub struct TestPolicyBuilder {
    id: i64,
    policy_number: String,
    holder_name: String,
    policy_type: PolicyType,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    premium: Decimal,
    created_at: DateTime<Utc>,
}

impl Default for TestPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPolicyBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: 1,
            policy_number: unique_policy_number(),
            holder_name: Name().fake(),
            policy_type: PolicyType::Life,
            start_date: TemporalFixtures::policy_start(),
            end_date: TemporalFixtures::policy_end(),
            premium: PolicyFixtures::premium(),
            created_at: TemporalFixtures::created_at(),
        }
    }

    /// Starts from the reference candidate
    pub fn from_draft(draft: PolicyDraft) -> Self {
        Self {
            policy_number: draft.policy_number,
            holder_name: draft.holder_name,
            policy_type: draft.policy_type,
            start_date: draft.start_date,
            end_date: draft.end_date,
            premium: draft.premium,
            ..Self::new()
        }
    }

    /// Sets the id used by [`build_stored`](Self::build_stored)
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_policy_number(mut self, number: impl Into<String>) -> Self {
        self.policy_number = number.into();
        self
    }

    pub fn with_holder_name(mut self, name: impl Into<String>) -> Self {
        self.holder_name = name.into();
        self
    }

    pub fn with_policy_type(mut self, policy_type: PolicyType) -> Self {
        self.policy_type = policy_type;
        self
    }

    pub fn with_start_date(mut self, date: DateTime<Utc>) -> Self {
        self.start_date = date;
        self
    }

    pub fn with_end_date(mut self, date: DateTime<Utc>) -> Self {
        self.end_date = date;
        self
    }

    pub fn with_premium(mut self, premium: Decimal) -> Self {
        self.premium = premium;
        self
    }

    /// Sets the creation (and last update) time of stored records
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    /// Builds a candidate record
    pub fn build_draft(self) -> PolicyDraft {
        PolicyDraft {
            policy_number: self.policy_number,
            holder_name: self.holder_name,
            policy_type: self.policy_type,
            start_date: self.start_date,
            end_date: self.end_date,
            premium: self.premium,
        }
    }

    /// Builds a record ready for a store insert
    pub fn build_new(self) -> NewPolicy {
        let created_at = self.created_at;
        let mut new = NewPolicy::from_draft(self.build_draft(), created_at);
        new.updated_at = created_at;
        new
    }

    /// Builds an already stored record
    pub fn build_stored(self) -> Policy {
        let id = PolicyId::new(self.id);
        self.build_new().into_policy(id)
    }

    /// Builds the camelCase JSON body the HTTP API accepts
    ///
    /// The premium travels as a decimal string so no digits are lost.
    pub fn build_json(self) -> Value {
        json!({
            "policyNumber": self.policy_number,
            "holderName": self.holder_name,
            "type": self.policy_type.as_str(),
            "startDate": self.start_date.to_rfc3339(),
            "endDate": self.end_date.to_rfc3339(),
            "premium": self.premium.to_string(),
        })
    }
}
