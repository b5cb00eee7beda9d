//! Strongly-typed identifiers for domain entities
//!
//! Record identifiers are assigned by the record store as integers. Wrapping
//! them in a newtype keeps them from being mixed up with counts, offsets or
//! other plain integers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a stored policy record
///
/// Assigned by the store on insert and never reused or mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(i64);

impl PolicyId {
    /// Creates an identifier from a raw store value
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw store value
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PolicyId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<PolicyId> for i64 {
    fn from(id: PolicyId) -> i64 {
        id.0
    }
}
