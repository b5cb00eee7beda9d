//! Request and response data transfer objects

pub mod policy;

pub use policy::{ListPoliciesParams, PolicyRequest, PolicyResponse};
