//! Screening session domain.
//!
//! - [`entities::Session`]: one screening conversation with the backend
//! - [`entities::Message`]: a single transcript turn
//! - [`progress::Progress`]: completion estimate from the message count
//! - [`screen::Screen`]: which of the three wizard screens is active

pub mod entities;
pub mod progress;
pub mod screen;

/// Greeting shown while the transcript is still empty
pub const BOT_GREETING: &str =
    "안녕하세요! 라포와 함께 현재 기분이나 상태에 대해 편안하게 이야기해보세요. 요즘 어떤 점이 가장 힘드셨나요?";

/// Crisis line notice shown under the chat input
pub const CRISIS_NOTICE: &str =
    "응급상황시 ☎️ 1393 (자살예방상담전화) 또는 112에 연락하세요.";
