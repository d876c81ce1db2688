//! Domain layer for rapport
//!
//! This crate contains the core entities and value objects of the
//! pre-screening client. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Screening
//!
//! A screening is a short, bounded conversation with the backend:
//!
//! - **Consent**: demographic fields the user fills in before starting
//! - **Chat**: an append-only transcript of user and bot turns
//! - **Report**: scores, a risk level and highlights produced once at the end
//!
//! The active [`Screen`] is derived from whether consent was given and
//! whether a report exists.
//!
//! ## Profile and counselors
//!
//! The [`UserProfile`] and the [`Counselor`] directory are independent of
//! the screening flow.

pub mod config;
pub mod consent;
pub mod core;
pub mod counselor;
pub mod profile;
pub mod report;
pub mod screening;

// Re-export commonly used types
pub use config::OutputFormat;
pub use consent::{AgeGroup, Choice, ConsentField, ConsentInput, Gender, Occupation};
pub use core::{error::DomainError, string::truncate};
pub use counselor::{
    ALL_SPECIALTIES,
    catalog::builtin_counselors,
    entities::{Counselor, Inquiry, Testimonial},
};
pub use profile::{NotificationSettings, PreferredContact, UserProfile};
pub use report::{
    REPORT_FOOTNOTE,
    entities::{Metric, Report, ReportDetails, ReportSummary, Risk, Scores},
    risk::RiskBand,
};
pub use screening::{
    BOT_GREETING, CRISIS_NOTICE,
    entities::{Message, Role, Session, SessionId},
    progress::{Progress, TARGET_MESSAGES},
    screen::Screen,
};
