//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level validation errors
//! - [`string::truncate`]: UTF-8 safe truncation for list previews

pub mod error;
pub mod string;
