//! Active screen of the screening flow

use serde::{Deserialize, Serialize};

/// The three screens of the screening wizard.
///
/// Exactly one is active at a time and it is fully determined by whether
/// consent was given and whether a report exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Consent,
    Chat,
    Report,
}

impl Screen {
    pub fn of(consented: bool, has_report: bool) -> Self {
        match (consented, has_report) {
            (_, true) => Screen::Report,
            (true, false) => Screen::Chat,
            (false, false) => Screen::Consent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Consent => "consent",
            Screen::Chat => "chat",
            Screen::Report => "report",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
