//! Risk band value object

use serde::{Deserialize, Serialize};

/// Risk level at which the warning banner appears
pub const CAUTION_THRESHOLD: f64 = 60.0;
/// Risk level at which the banner escalates to "high risk"
pub const HIGH_THRESHOLD: f64 = 80.0;

/// Bucketed risk level of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Normal,
    Caution,
    High,
}

impl RiskBand {
    pub fn from_level(level: f64) -> Self {
        if level >= HIGH_THRESHOLD {
            RiskBand::High
        } else if level >= CAUTION_THRESHOLD {
            RiskBand::Caution
        } else {
            RiskBand::Normal
        }
    }

    pub fn is_elevated(&self) -> bool {
        *self != RiskBand::Normal
    }

    /// Banner lead sentence; `None` when no banner is shown
    pub fn headline(&self) -> Option<&'static str> {
        match self {
            RiskBand::Normal => None,
            RiskBand::Caution => Some("주의가 필요한 신호가 감지되었습니다."),
            RiskBand::High => Some("고위험 신호가 감지되었습니다."),
        }
    }
}
