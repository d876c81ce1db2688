//! Screening report entities
//!
//! Field names follow the backend's JSON (snake_case). Unknown fields the
//! backend adds (theme counts, emotion counts, risk hits) are ignored.

use super::risk::RiskBand;
use serde::{Deserialize, Serialize};

/// The three mood indices a report scores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Depression,
    Anxiety,
    Stress,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Depression, Metric::Anxiety, Metric::Stress];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Depression => "우울 지수",
            Metric::Anxiety => "불안 지수",
            Metric::Stress => "스트레스 지수",
        }
    }
}

/// Scores in `[0, 100]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub depression: f64,
    pub anxiety: f64,
    pub stress: f64,
}

impl Scores {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Depression => self.depression,
            Metric::Anxiety => self.anxiety,
            Metric::Stress => self.stress,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    /// Risk level in `[0, 100]`
    pub level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_issues: Option<Vec<String>>,
    pub scores: Scores,
    pub risk: Risk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    pub disclaimer: String,
}

/// Result of finalizing a screening session (Entity)
///
/// Produced once per session and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub summary: ReportSummary,
    pub details: ReportDetails,
    pub safety_notice: String,
}

impl Report {
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_level(self.summary.risk.level)
    }

    /// Whether the warning banner is shown
    pub fn needs_warning(&self) -> bool {
        self.risk_band().is_elevated()
    }

    /// Highlights, empty when the backend sent none
    pub fn highlights(&self) -> &[String] {
        self.details.highlights.as_deref().unwrap_or_default()
    }

    pub fn top_issues(&self) -> &[String] {
        self.summary.top_issues.as_deref().unwrap_or_default()
    }

    /// Conversation summary, `None` when missing or blank
    pub fn conversation_summary(&self) -> Option<&str> {
        self.summary
            .conversation_summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}
