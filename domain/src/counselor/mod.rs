//! Counselor directory domain.
//!
//! - [`entities::Counselor`]: a directory listing with career and reviews
//! - [`entities::Inquiry`]: a request sent to a counselor
//! - [`catalog::builtin_counselors`]: the listings shipped with the client

pub mod catalog;
pub mod entities;

/// Specialty filter value that keeps every counselor
pub const ALL_SPECIALTIES: &str = "전체";
