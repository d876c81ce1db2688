//! Screening gateway port
//!
//! Defines the interface for talking to the screening backend.

use async_trait::async_trait;
use rapport_domain::{ConsentInput, Report, SessionId};
use thiserror::Error;

/// Errors that can occur during screening gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request could not be sent or the response could not be received
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status
    #[error("Server error: {status} {message}")]
    Server { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Server {
            status,
            message: message.into(),
        }
    }

    /// HTTP status for server errors
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Gateway for the screening backend
///
/// This port defines the three requests the screening flow issues.
/// Implementations (adapters) live in the infrastructure layer. None of them
/// retry: each failure is reported once to the caller.
#[async_trait]
pub trait ScreeningGateway: Send + Sync {
    /// Open a session for the given consent fields
    async fn create_session(&self, consent: &ConsentInput) -> Result<SessionId, GatewayError>;

    /// Send one user turn and return the assistant's reply
    async fn send_turn(&self, session_id: &SessionId, text: &str) -> Result<String, GatewayError>;

    /// Close the session and return its report
    async fn finalize(&self, session_id: &SessionId) -> Result<Report, GatewayError>;
}
