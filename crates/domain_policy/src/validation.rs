//! Policy validation rules
//!
//! Pure, stateless checks applied to a candidate record before any write.
//!
//! # Validation Rules
//!
//! - Policy number: uppercase ASCII letters and digits only, at least 8
//!   characters (create only; the number is immutable afterwards)
//! - End date strictly after start date (create and update)
//! - Premium strictly positive (create and update)
//!
//! Checks run in that order and the first failure is reported.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::PolicyError;
use crate::policy::PolicyDraft;

pub const POLICY_NUMBER_FORMAT: &str =
    "Policy number must be at least 8 characters and contain only uppercase letters and numbers";
pub const END_DATE_NOT_AFTER_START: &str = "End date must be after start date";
pub const PREMIUM_NOT_POSITIVE: &str = "Premium must be greater than 0";

static POLICY_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{8,}$").unwrap());

/// Validator for candidate policy records
pub struct PolicyValidator;

impl PolicyValidator {
    /// Runs every check required before a create
    pub fn validate_for_create(draft: &PolicyDraft) -> Result<(), PolicyError> {
        Self::check_policy_number(&draft.policy_number)?;
        Self::validate_for_update(draft)
    }

    /// Runs the checks required before an update
    ///
    /// The policy number is not re-checked; it cannot change after creation.
    pub fn validate_for_update(draft: &PolicyDraft) -> Result<(), PolicyError> {
        Self::check_period(draft.start_date, draft.end_date)?;
        Self::check_premium(draft.premium)
    }

    pub fn check_policy_number(policy_number: &str) -> Result<(), PolicyError> {
        if POLICY_NUMBER_RE.is_match(policy_number) {
            Ok(())
        } else {
            Err(PolicyError::validation(POLICY_NUMBER_FORMAT))
        }
    }

    pub fn check_period(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), PolicyError> {
        if end > start {
            Ok(())
        } else {
            Err(PolicyError::validation(END_DATE_NOT_AFTER_START))
        }
    }

    pub fn check_premium(premium: Decimal) -> Result<(), PolicyError> {
        if premium > Decimal::ZERO {
            Ok(())
        } else {
            Err(PolicyError::validation(PREMIUM_NOT_POSITIVE))
        }
    }
}
