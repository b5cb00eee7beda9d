//! Core Kernel - Foundational types for the policy records service
//!
//! This crate provides the building blocks shared by the domain, persistence
//! and HTTP layers:
//! - Strongly-typed identifiers
//! - Port infrastructure (errors, health checks) for the hexagonal layout

pub mod identifiers;
pub mod ports;

pub use identifiers::PolicyId;
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
