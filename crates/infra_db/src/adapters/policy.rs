//! PostgreSQL Policy Adapter
//!
//! This module provides the database adapter for the policy domain,
//! implementing the `PolicyStore` trait using PostgreSQL via the
//! `PolicyRepository`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresPolicyAdapter;
//! use domain_policy::{PolicyService, PolicyStore};
//! use std::sync::Arc;
//!
//! let adapter = PostgresPolicyAdapter::new(pool);
//! let store: Arc<dyn PolicyStore> = Arc::new(adapter);
//! let service = PolicyService::new(store);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PolicyId, PortError};
use domain_policy::{NewPolicy, Policy, PolicyQuery, PolicyStore, PolicyType};

use crate::error::DatabaseError;
use crate::repositories::policy::{NewPolicyRow, PolicyRepository, PolicyRow};

const ADAPTER_ID: &str = "postgres-policy-adapter";

/// PostgreSQL-backed implementation of the PolicyStore trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::DuplicateEntry` -> `PortError::Conflict`
/// - connection failures and pool exhaustion -> `PortError::Connection`
/// - Other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresPolicyAdapter {
    repository: PolicyRepository,
    pool: PgPool,
}

impl PostgresPolicyAdapter {
    /// Creates a new PostgreSQL policy adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PolicyRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresPolicyAdapter {}

#[async_trait]
impl HealthCheckable for PostgresPolicyAdapter {
    /// Checks database connectivity with `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl PolicyStore for PostgresPolicyAdapter {
    #[instrument(skip(self))]
    async fn list(&self, query: &PolicyQuery) -> Result<Vec<Policy>, PortError> {
        debug!("Listing policies");

        let rows = self.repository.list(query).await.map_err(db_to_port_error)?;
        rows.into_iter().map(row_to_policy).collect()
    }

    #[instrument(skip(self), fields(policy_id = %id))]
    async fn get(&self, id: PolicyId) -> Result<Option<Policy>, PortError> {
        debug!("Fetching policy by ID");

        self.repository
            .get(id.value())
            .await
            .map_err(db_to_port_error)?
            .map(row_to_policy)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_policy_number(&self, policy_number: &str) -> Result<Option<Policy>, PortError> {
        debug!("Fetching policy by number");

        self.repository
            .find_by_policy_number(policy_number)
            .await
            .map_err(db_to_port_error)?
            .map(row_to_policy)
            .transpose()
    }

    #[instrument(skip(self, policy), fields(policy_number = %policy.policy_number))]
    async fn insert(&self, policy: NewPolicy) -> Result<Policy, PortError> {
        debug!("Inserting policy");

        let row = self
            .repository
            .insert(new_policy_to_row(policy))
            .await
            .map_err(db_to_port_error)?;

        row_to_policy(row)
    }

    #[instrument(skip(self, policy), fields(policy_id = %policy.id))]
    async fn update(&self, policy: &Policy) -> Result<Option<Policy>, PortError> {
        debug!("Updating policy");

        self.repository
            .update(&policy_to_row(policy))
            .await
            .map_err(db_to_port_error)?
            .map(row_to_policy)
            .transpose()
    }

    #[instrument(skip(self), fields(policy_id = %id))]
    async fn delete(&self, id: PolicyId) -> Result<bool, PortError> {
        debug!("Deleting policy");

        self.repository.delete(id.value()).await.map_err(db_to_port_error)
    }
}

// =============================================================================
// Conversion Helpers
// =============================================================================

/// Converts a database error to a port error
fn db_to_port_error(e: DatabaseError) -> PortError {
    match e {
        DatabaseError::DuplicateEntry(msg) => PortError::conflict(msg),
        DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted => {
            PortError::connection(e.to_string())
        }
        _ => PortError::internal(e.to_string()),
    }
}

/// Converts a database row to a domain Policy
///
/// A stored type name that no longer parses is a transformation failure,
/// not a silent default.
fn row_to_policy(row: PolicyRow) -> Result<Policy, PortError> {
    let policy_type: PolicyType = row.policy_type.parse().map_err(|e| {
        PortError::transformation(format!("policy {}: {}", row.id, e))
    })?;

    Ok(Policy {
        id: PolicyId::new(row.id),
        policy_number: row.policy_number,
        holder_name: row.holder_name,
        policy_type,
        start_date: row.start_date,
        end_date: row.end_date,
        premium: row.premium,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn new_policy_to_row(policy: NewPolicy) -> NewPolicyRow {
    NewPolicyRow {
        policy_number: policy.policy_number,
        holder_name: policy.holder_name,
        policy_type: policy.policy_type.as_str().to_string(),
        start_date: policy.start_date,
        end_date: policy.end_date,
        premium: policy.premium,
        created_at: policy.created_at,
        updated_at: policy.updated_at,
    }
}

fn policy_to_row(policy: &Policy) -> PolicyRow {
    PolicyRow {
        id: policy.id.value(),
        policy_number: policy.policy_number.clone(),
        holder_name: policy.holder_name.clone(),
        policy_type: policy.policy_type.as_str().to_string(),
        start_date: policy.start_date,
        end_date: policy.end_date,
        premium: policy.premium,
        created_at: policy.created_at,
        updated_at: policy.updated_at,
    }
}
