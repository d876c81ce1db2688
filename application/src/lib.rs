//! Application layer for rapport
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    profile_store::ProfileStore,
    progress::{FlowProgress, NoProgress, RequestKind},
    screening_gateway::{GatewayError, ScreeningGateway},
};
pub use use_cases::counselor_directory::{CounselorDirectory, InquiryError};
pub use use_cases::profile_service::{
    GOALS, LoginOutcome, MIN_PASSWORD_LEN, ProfileError, ProfileService, SignUpForm,
};
pub use use_cases::screening_flow::{
    BlockReason, FlowError, FlowState, PendingFinalize, PendingStart, PendingTurn, ScreeningFlow,
};
