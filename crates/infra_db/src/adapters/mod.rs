//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresPolicyAdapter;
//! use domain_policy::PolicyStore;
//!
//! let adapter = PostgresPolicyAdapter::new(pool);
//! let policy = adapter.get(policy_id).await?;
//! ```

pub mod policy;

pub use policy::PostgresPolicyAdapter;
