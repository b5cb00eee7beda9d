//! Policy Records Domain
//!
//! This crate implements the business rules for insurance policy records,
//! following the hexagonal layout used across the workspace.
//!
//! # Architecture
//!
//! The domain layer is infrastructure-agnostic:
//! - **Entity**: `Policy`, the only persisted record, and `PolicyDraft`, the
//!   caller-supplied candidate that has not been validated or stored yet
//! - **Validator**: `PolicyValidator`, pure checks applied before any write
//! - **Query**: `PolicyQuery`, the search/filter/sort request for listings
//! - **Port**: `PolicyStore`, implemented by the Postgres adapter in `infra_db`
//!   and by the in-memory `MockPolicyStore`
//! - **Service**: `PolicyService`, the CRUD orchestration over a store
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{PolicyService, PolicyDraft, PolicyQuery};
//!
//! let service = PolicyService::new(store);
//! let created = service.create_policy(draft).await?;
//! let matches = service.list_policies(&PolicyQuery::from_params(Some("jane"), None, Some("premium"))).await?;
//! ```

pub mod policy;
pub mod validation;
pub mod query;
pub mod ports;
pub mod services;
pub mod error;

pub use policy::{storage_now, Policy, PolicyDraft, PolicyType, ParsePolicyTypeError};
pub use validation::PolicyValidator;
pub use query::{PolicyQuery, SortBy};
pub use ports::{NewPolicy, PolicyStore};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockPolicyStore;
pub use services::PolicyService;
pub use error::PolicyError;
