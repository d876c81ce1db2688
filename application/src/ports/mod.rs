//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod profile_store;
pub mod progress;
pub mod screening_gateway;
