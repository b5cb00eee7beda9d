//! Policy service
//!
//! Orchestrates the CRUD operations over an injected `PolicyStore`: it runs
//! the validator, performs the duplicate policy number check, assigns
//! timestamps and turns store failures into `PolicyError`s. It holds no
//! mutable state of its own; every call is one independent unit of work
//! against the store.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use core_kernel::PolicyId;

use crate::error::PolicyError;
use crate::policy::{storage_now, Policy, PolicyDraft};
use crate::ports::{NewPolicy, PolicyStore};
use crate::query::PolicyQuery;
use crate::validation::PolicyValidator;

/// Service for policy record operations
#[derive(Clone)]
pub struct PolicyService {
    store: Arc<dyn PolicyStore>,
}

impl PolicyService {
    /// Creates a service over the given store
    pub fn new(store: Arc<dyn PolicyStore>) -> Self {
        Self { store }
    }

    /// Returns the underlying store, e.g. for health checks
    pub fn store(&self) -> &Arc<dyn PolicyStore> {
        &self.store
    }

    /// Lists records matching the query, in the query's order
    #[instrument(skip(self))]
    pub async fn list_policies(&self, query: &PolicyQuery) -> Result<Vec<Policy>, PolicyError> {
        let policies = self.store.list(query).await?;
        debug!(count = policies.len(), "Listed policies");
        Ok(policies)
    }

    /// Retrieves a record by id; `None` if it does not exist
    #[instrument(skip(self), fields(policy_id = %id))]
    pub async fn get_policy(&self, id: PolicyId) -> Result<Option<Policy>, PolicyError> {
        Ok(self.store.get(id).await?)
    }

    /// Validates and stores a new record
    ///
    /// # Errors
    ///
    /// - `PolicyError::Validation` if the candidate breaks a rule
    /// - `PolicyError::Duplicate` if the policy number is taken, whether
    ///   found by the lookup or rejected by the store's unique index
    /// - `PolicyError::Storage` for any other store failure
    #[instrument(skip(self, draft), fields(policy_number = %draft.policy_number))]
    pub async fn create_policy(&self, draft: PolicyDraft) -> Result<Policy, PolicyError> {
        if let Err(e) = PolicyValidator::validate_for_create(&draft) {
            warn!(error = %e, "Rejected policy candidate");
            return Err(e);
        }

        if self.store.find_by_policy_number(&draft.policy_number).await?.is_some() {
            warn!("Policy number already in use");
            return Err(PolicyError::duplicate_policy_number());
        }

        let policy = self
            .store
            .insert(NewPolicy::from_draft(draft, storage_now()))
            .await?;

        info!(policy_id = %policy.id, "Policy created");
        Ok(policy)
    }

    /// Validates and applies an update to an existing record
    ///
    /// Returns `Ok(None)` if no record has the id. The candidate's policy
    /// number is ignored; `id`, `policy_number` and `created_at` never change.
    #[instrument(skip(self, draft), fields(policy_id = %id))]
    pub async fn update_policy(
        &self,
        id: PolicyId,
        draft: PolicyDraft,
    ) -> Result<Option<Policy>, PolicyError> {
        let Some(mut policy) = self.store.get(id).await? else {
            debug!("Policy not found");
            return Ok(None);
        };

        if let Err(e) = PolicyValidator::validate_for_update(&draft) {
            warn!(error = %e, "Rejected policy update");
            return Err(e);
        }

        policy.apply_update(draft, storage_now());
        let updated = self.store.update(&policy).await?;

        if updated.is_some() {
            info!("Policy updated");
        }
        Ok(updated)
    }

    /// Deletes a record; `false` if no record has the id
    #[instrument(skip(self), fields(policy_id = %id))]
    pub async fn delete_policy(&self, id: PolicyId) -> Result<bool, PolicyError> {
        if self.store.get(id).await?.is_none() {
            debug!("Policy not found");
            return Ok(false);
        }

        let removed = self.store.delete(id).await?;
        if removed {
            info!("Policy deleted");
        }
        Ok(removed)
    }
}
