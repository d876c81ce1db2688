//! Domain error types

use crate::consent::ConsentField;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Required consent field is missing: {0}")]
    MissingConsentField(ConsentField),

    #[error("Invalid value for {field}: {value}")]
    InvalidChoice { field: ConsentField, value: String },

    #[error("Consent is locked once a session has started")]
    ConsentLocked,

    #[error("Message cannot be empty")]
    EmptyMessage,
}
