//! Consent domain.
//!
//! - [`value_objects::ConsentInput`]: demographic fields collected before a session
//! - [`value_objects::Choice`]: closed option sets (gender, age group, occupation)

pub mod value_objects;

pub use value_objects::{AgeGroup, Choice, ConsentField, ConsentInput, Gender, Occupation};
