//! Output formatter trait

use rapport_application::LoginOutcome;
use rapport_domain::{Counselor, Inquiry, OutputFormat, Report, UserProfile};

/// Formats command results for stdout
pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> String;

    fn format_counselor_list(&self, counselors: &[&Counselor]) -> String;

    fn format_counselor(&self, counselor: &Counselor) -> String;

    fn format_inquiry(&self, counselor: &Counselor, inquiry: &Inquiry) -> String;

    fn format_profile(&self, profile: &UserProfile) -> String;

    fn format_login(&self, profile: &UserProfile, outcome: LoginOutcome) -> String;
}

/// Formatter for the configured output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(super::console::ConsoleFormatter),
        OutputFormat::Json => Box::new(super::json::JsonFormatter),
    }
}
