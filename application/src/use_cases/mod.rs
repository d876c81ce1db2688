//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod counselor_directory;
pub mod profile_service;
pub mod screening_flow;
