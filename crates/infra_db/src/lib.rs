//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL record store for policy records using
//! SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern:
//! - **Repositories** hold the SQL and map rows to plain row structs
//! - **Adapters** implement the domain's `PolicyStore` port on top of a
//!   repository, converting rows to domain types and database errors to
//!   port errors
//!
//! # Schema
//!
//! One `policies` table: `id` primary key, a unique index on
//! `policy_number`, and `policy_type` stored as the type's name. Migrations
//! are embedded in the binary and applied with [`run_migrations`].
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresPolicyAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/policies")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresPolicyAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::PolicyRepository;
pub use adapters::PostgresPolicyAdapter;
