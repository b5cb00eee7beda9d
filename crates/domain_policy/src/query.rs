//! Listing queries
//!
//! `PolicyQuery` is built from the raw listing parameters (`search`, `type`,
//! `sortBy`) and normalised once, so every store applies the same rules:
//!
//! - a blank search is no search; otherwise it is matched case-insensitively
//!   as a substring of the policy number or the holder name
//! - a type that is not a policy type name is ignored rather than rejected
//! - unknown sort keys fall back to newest-created first
//!
//! Stores either push the query down (the Postgres adapter renders it to SQL)
//! or evaluate it in memory with [`PolicyQuery::apply`].

use std::cmp::Ordering;

use crate::policy::{Policy, PolicyType};

/// Sort order for policy listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// `sortBy=date`: start date, newest first
    StartDateDesc,
    /// `sortBy=premium`: premium, highest first
    PremiumDesc,
    /// `sortBy=name`: holder name, A to Z
    HolderNameAsc,
    /// Anything else: creation time, newest first
    #[default]
    CreatedAtDesc,
}

impl SortBy {
    /// Maps a `sortBy` parameter to an order, ignoring case
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::to_lowercase).as_deref() {
            Some("date") => SortBy::StartDateDesc,
            Some("premium") => SortBy::PremiumDesc,
            Some("name") => SortBy::HolderNameAsc,
            _ => SortBy::CreatedAtDesc,
        }
    }

    /// Compares two records in this order
    pub fn compare(&self, a: &Policy, b: &Policy) -> Ordering {
        match self {
            SortBy::StartDateDesc => b.start_date.cmp(&a.start_date),
            SortBy::PremiumDesc => b.premium.cmp(&a.premium),
            SortBy::HolderNameAsc => a.holder_name.cmp(&b.holder_name),
            SortBy::CreatedAtDesc => b.created_at.cmp(&a.created_at),
        }
    }
}

/// A normalised listing request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyQuery {
    /// Lowercased search text; never blank
    search: Option<String>,
    /// Type filter
    policy_type: Option<PolicyType>,
    /// Result order
    sort_by: SortBy,
}

impl PolicyQuery {
    /// Builds a query from raw listing parameters
    pub fn from_params(search: Option<&str>, policy_type: Option<&str>, sort_by: Option<&str>) -> Self {
        Self {
            search: search
                .filter(|s| !s.trim().is_empty())
                .map(str::to_lowercase),
            policy_type: policy_type.and_then(|t| t.parse().ok()),
            sort_by: SortBy::from_param(sort_by),
        }
    }

    /// Restricts the query to one policy type
    pub fn with_type(mut self, policy_type: PolicyType) -> Self {
        self.policy_type = Some(policy_type);
        self
    }

    /// Sets the result order
    pub fn sorted_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn policy_type(&self) -> Option<PolicyType> {
        self.policy_type
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    /// Returns true if the record passes the search and type filters
    pub fn matches(&self, policy: &Policy) -> bool {
        if let Some(ref needle) = self.search {
            let hit = policy.policy_number.to_lowercase().contains(needle.as_str())
                || policy.holder_name.to_lowercase().contains(needle.as_str());
            if !hit {
                return false;
            }
        }
        if let Some(policy_type) = self.policy_type {
            if policy.policy_type != policy_type {
                return false;
            }
        }
        true
    }

    /// Filters and orders records in memory
    ///
    /// Ties are broken by descending id so the output is deterministic.
    pub fn apply(&self, policies: impl IntoIterator<Item = Policy>) -> Vec<Policy> {
        let mut results: Vec<Policy> = policies.into_iter().filter(|p| self.matches(p)).collect();
        results.sort_by(|a, b| self.sort_by.compare(a, b).then_with(|| b.id.cmp(&a.id)));
        results
    }
}
