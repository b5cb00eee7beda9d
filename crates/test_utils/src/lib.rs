//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! policy records test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data (dates, premiums, a seeded listing set)
//! - `builders`: Builders for drafts, stored records and JSON request bodies
//! - `database`: PostgreSQL test container management
//! - `assertions`: Assertion helpers for policy records
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
