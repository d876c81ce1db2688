//! Wire types of the screening backend
//!
//! Request bodies borrow from the caller; response bodies are decoded
//! leniently and ignore unknown fields.

use rapport_domain::{AgeGroup, ConsentInput, Gender, Occupation, Report, SessionId};
use serde::{Deserialize, Serialize};

/// `POST /session` body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest<'a> {
    pub consent: bool,
    pub region: &'a str,
    pub occupation: Option<Occupation>,
    pub gender: Option<Gender>,
    pub age_group: Option<AgeGroup>,
}

impl<'a> From<&'a ConsentInput> for CreateSessionRequest<'a> {
    fn from(input: &'a ConsentInput) -> Self {
        Self {
            consent: true,
            region: &input.region,
            occupation: input.occupation,
            gender: input.gender,
            age_group: input.age_group,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: SessionId,
}

/// `POST /chat` body
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub session_id: &'a SessionId,
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub assistant: String,
}

/// `POST /finalize` body
#[derive(Debug, Serialize)]
pub struct FinalizeRequest<'a> {
    pub session_id: &'a SessionId,
}

#[derive(Debug, Deserialize)]
pub struct FinalizeResponse {
    pub report: Report,
}

/// FastAPI-style error body, `{"detail": "..."}`
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Human-readable message from an error response body
    pub fn message_from(body: &str) -> String {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                detail: serde_json::Value::String(s),
            }) => s,
            Ok(ErrorBody { detail }) => detail.to_string(),
            Err(_) => body.trim().to_string(),
        }
    }
}
