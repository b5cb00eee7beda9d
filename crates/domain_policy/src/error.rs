//! Policy domain errors
//!
//! Absence of a record is not an error here: lookups, updates and deletes
//! report it as `None` or `false`.

use thiserror::Error;

use core_kernel::PortError;

/// Message reported when a policy number is already taken
pub const DUPLICATE_POLICY_NUMBER: &str = "Policy number already exists";

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The candidate record breaks a business rule; the caller can fix it
    #[error("{0}")]
    Validation(String),

    /// The candidate conflicts with a stored record
    #[error("{0}")]
    Duplicate(String),

    /// Unexpected persistence failure
    #[error("Storage error: {0}")]
    Storage(#[source] PortError),
}

impl PolicyError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PolicyError::Validation(message.into())
    }

    /// Creates the duplicate policy number error
    pub fn duplicate_policy_number() -> Self {
        PolicyError::Duplicate(DUPLICATE_POLICY_NUMBER.to_string())
    }

    /// Returns true if the caller caused the error by submitting bad input
    pub fn is_client_error(&self) -> bool {
        matches!(self, PolicyError::Validation(_) | PolicyError::Duplicate(_))
    }
}

/// Unique-constraint conflicts from the store are duplicate policy numbers;
/// the existence check before insert can race with a concurrent create.
impl From<PortError> for PolicyError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::Conflict { .. } => PolicyError::duplicate_policy_number(),
            other => PolicyError::Storage(other),
        }
    }
}
