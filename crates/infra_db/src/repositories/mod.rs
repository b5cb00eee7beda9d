//! Repository implementations
//!
//! Repositories encapsulate the SQL for a table and map between database
//! rows and plain row structs. They know nothing about port errors; the
//! adapters translate.

pub mod policy;

pub use policy::{NewPolicyRow, PolicyRepository, PolicyRow};
