//! Policy Domain Ports
//!
//! This module defines the record store port for the policy domain. The
//! service only talks to the store through `PolicyStore`, so the same rules
//! run against PostgreSQL in production and against the in-memory mock in
//! tests.
//!
//! # Store Contract
//!
//! - `insert` assigns the identifier; it never reuses one
//! - a second record with an existing policy number is rejected with
//!   `PortError::Conflict` (the unique index in the real store)
//! - lookups, updates and deletes of missing records return `None`/`false`
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_policy::{PolicyService, PolicyStore};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn PolicyStore> = Arc::new(PostgresPolicyAdapter::new(pool));
//! let service = PolicyService::new(store);
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use core_kernel::{DomainPort, HealthCheckable, PolicyId, PortError};

use crate::policy::{Policy, PolicyDraft, PolicyType};
use crate::query::PolicyQuery;

/// A validated record ready for insertion; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPolicy {
    pub policy_number: String,
    pub holder_name: String,
    pub policy_type: PolicyType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub premium: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPolicy {
    /// Stamps a candidate with its creation time
    pub fn from_draft(draft: PolicyDraft, now: DateTime<Utc>) -> Self {
        Self {
            policy_number: draft.policy_number,
            holder_name: draft.holder_name,
            policy_type: draft.policy_type,
            start_date: draft.start_date,
            end_date: draft.end_date,
            premium: draft.premium,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds the stored record once the store has assigned an id
    pub fn into_policy(self, id: PolicyId) -> Policy {
        Policy {
            id,
            policy_number: self.policy_number,
            holder_name: self.holder_name,
            policy_type: self.policy_type,
            start_date: self.start_date,
            end_date: self.end_date,
            premium: self.premium,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// The record store port for policies
///
/// All methods are async and return `Result<T, PortError>` for consistent
/// error handling across adapter implementations.
#[async_trait]
pub trait PolicyStore: DomainPort + HealthCheckable {
    /// Returns the records matching the query, in the query's order
    async fn list(&self, query: &PolicyQuery) -> Result<Vec<Policy>, PortError>;

    /// Retrieves a record by id
    async fn get(&self, id: PolicyId) -> Result<Option<Policy>, PortError>;

    /// Retrieves the record holding a policy number, compared exactly
    async fn find_by_policy_number(&self, policy_number: &str) -> Result<Option<Policy>, PortError>;

    /// Persists a new record and returns it with its assigned id
    async fn insert(&self, policy: NewPolicy) -> Result<Policy, PortError>;

    /// Writes the mutable fields of an existing record
    ///
    /// Returns `None` if the record no longer exists.
    async fn update(&self, policy: &Policy) -> Result<Option<Policy>, PortError>;

    /// Removes a record, returning whether one was removed
    async fn delete(&self, id: PolicyId) -> Result<bool, PortError>;
}

/// Mock implementation for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    #[derive(Debug, Default)]
    struct Inner {
        policies: BTreeMap<PolicyId, Policy>,
        last_id: i64,
    }

    /// In-memory implementation of PolicyStore
    ///
    /// Enforces the same unique policy number rule as the database index.
    #[derive(Debug, Clone, Default)]
    pub struct MockPolicyStore {
        inner: Arc<RwLock<Inner>>,
    }

    impl MockPolicyStore {
        /// Creates a new, empty mock store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with stored records for testing
        ///
        /// Ids continue after the largest pre-populated id.
        pub async fn with_policies(policies: Vec<Policy>) -> Self {
            let store = Self::new();
            {
                let mut inner = store.inner.write().await;
                for policy in policies {
                    inner.last_id = inner.last_id.max(policy.id.value());
                    inner.policies.insert(policy.id, policy);
                }
            }
            store
        }

        /// Returns the number of stored records
        pub async fn len(&self) -> usize {
            self.inner.read().await.policies.len()
        }

        /// Returns true if nothing is stored
        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }
    }

    impl DomainPort for MockPolicyStore {}

    #[async_trait]
    impl HealthCheckable for MockPolicyStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-policy-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl PolicyStore for MockPolicyStore {
        async fn list(&self, query: &PolicyQuery) -> Result<Vec<Policy>, PortError> {
            let inner = self.inner.read().await;
            Ok(query.apply(inner.policies.values().cloned()))
        }

        async fn get(&self, id: PolicyId) -> Result<Option<Policy>, PortError> {
            Ok(self.inner.read().await.policies.get(&id).cloned())
        }

        async fn find_by_policy_number(&self, policy_number: &str) -> Result<Option<Policy>, PortError> {
            Ok(self
                .inner
                .read()
                .await
                .policies
                .values()
                .find(|p| p.policy_number == policy_number)
                .cloned())
        }

        async fn insert(&self, policy: NewPolicy) -> Result<Policy, PortError> {
            let mut inner = self.inner.write().await;
            if inner.policies.values().any(|p| p.policy_number == policy.policy_number) {
                return Err(PortError::conflict(format!(
                    "duplicate key value violates unique constraint on policy_number '{}'",
                    policy.policy_number
                )));
            }

            inner.last_id += 1;
            let stored = policy.into_policy(PolicyId::new(inner.last_id));
            inner.policies.insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn update(&self, policy: &Policy) -> Result<Option<Policy>, PortError> {
            let mut inner = self.inner.write().await;
            match inner.policies.get_mut(&policy.id) {
                Some(existing) => {
                    existing.holder_name = policy.holder_name.clone();
                    existing.policy_type = policy.policy_type;
                    existing.start_date = policy.start_date;
                    existing.end_date = policy.end_date;
                    existing.premium = policy.premium;
                    existing.updated_at = policy.updated_at;
                    Ok(Some(existing.clone()))
                }
                None => Ok(None),
            }
        }

        async fn delete(&self, id: PolicyId) -> Result<bool, PortError> {
            Ok(self.inner.write().await.policies.remove(&id).is_some())
        }
    }
}
