//! HTTP adapter for the screening backend
//!
//! - `POST {base}/session` → `{ "session_id" }`
//! - `POST {base}/chat` → `{ "assistant" }`
//! - `POST {base}/finalize` → `{ "report" }`

mod gateway;
pub mod protocol;

pub use gateway::HttpScreeningGateway;
