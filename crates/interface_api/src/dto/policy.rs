//! Policy DTOs
//!
//! Bodies and query strings use camelCase names; the policy type travels as
//! its name under `type`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use domain_policy::{Policy, PolicyDraft, PolicyType};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::error::ApiError;

/// Body of create and update requests
///
/// `policyNumber` is required on update too, but the stored number is
/// never changed by an update.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRequest {
    /// Only read on update, where it must match the path id when present
    #[serde(default)]
    pub id: Option<i64>,

    #[validate(length(
        min = 1,
        max = 20,
        message = "policyNumber is required and must be at most 20 characters"
    ))]
    pub policy_number: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "holderName is required and must be at most 100 characters"
    ))]
    pub holder_name: String,

    #[serde(rename = "type")]
    #[validate(custom(function = "validate_policy_type"))]
    pub policy_type: String,

    #[serde(deserialize_with = "flexible_datetime")]
    pub start_date: DateTime<Utc>,

    #[serde(deserialize_with = "flexible_datetime")]
    pub end_date: DateTime<Utc>,

    pub premium: Decimal,
}

impl PolicyRequest {
    /// Converts the request into a candidate record
    pub fn into_draft(self) -> Result<PolicyDraft, ApiError> {
        let policy_type: PolicyType = self
            .policy_type
            .parse()
            .map_err(|_| ApiError::validation_failed(vec![policy_type_message()]))?;

        Ok(PolicyDraft {
            policy_number: self.policy_number,
            holder_name: self.holder_name,
            policy_type,
            start_date: self.start_date,
            end_date: self.end_date,
            premium: self.premium,
        })
    }
}

fn policy_type_message() -> String {
    let names: Vec<&str> = PolicyType::ALL.iter().map(PolicyType::as_str).collect();
    format!("type must be one of {}", names.join(", "))
}

fn validate_policy_type(value: &str) -> Result<(), ValidationError> {
    value.parse::<PolicyType>().map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("policy_type");
        error.message = Some(policy_type_message().into());
        error
    })
}

/// Accepts RFC 3339 timestamps, and timestamps or dates without an offset,
/// which are read as UTC
fn flexible_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_datetime(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid date or timestamp: {raw:?}"))
    })
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

/// Query string of the listing route
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPoliciesParams {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub policy_type: Option<String>,
    pub sort_by: Option<String>,
}

/// A stored record as returned by every policy route
///
/// The premium is written as a decimal string, exactly as stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResponse {
    pub id: i64,
    pub policy_number: String,
    pub holder_name: String,
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub premium: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Policy> for PolicyResponse {
    fn from(policy: Policy) -> Self {
        Self {
            id: policy.id.value(),
            policy_number: policy.policy_number,
            holder_name: policy.holder_name,
            policy_type: policy.policy_type,
            start_date: policy.start_date,
            end_date: policy.end_date,
            premium: policy.premium,
            created_at: policy.created_at,
            updated_at: policy.updated_at,
        }
    }
}
