//! JSON output formatter

use crate::output::formatter::OutputFormatter;
use rapport_application::LoginOutcome;
use rapport_domain::{Counselor, Inquiry, Report, UserProfile};
use serde::Serialize;
use serde_json::json;

/// Formats results as pretty-printed JSON
///
/// Stored passwords are never written out.
pub struct JsonFormatter;

impl JsonFormatter {
    fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn redacted(profile: &UserProfile) -> UserProfile {
        UserProfile {
            password: None,
            ..profile.clone()
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> String {
        Self::pretty(&json!({
            "report": report,
            "risk_band": report.risk_band(),
        }))
    }

    fn format_counselor_list(&self, counselors: &[&Counselor]) -> String {
        Self::pretty(counselors)
    }

    fn format_counselor(&self, counselor: &Counselor) -> String {
        Self::pretty(&json!({
            "counselor": counselor,
            "average_rating": counselor.average_rating(),
        }))
    }

    fn format_inquiry(&self, _counselor: &Counselor, inquiry: &Inquiry) -> String {
        Self::pretty(inquiry)
    }

    fn format_profile(&self, profile: &UserProfile) -> String {
        Self::pretty(&Self::redacted(profile))
    }

    fn format_login(&self, profile: &UserProfile, outcome: LoginOutcome) -> String {
        let outcome = match outcome {
            LoginOutcome::Matched => "matched",
            LoginOutcome::Created => "created",
        };
        Self::pretty(&json!({
            "outcome": outcome,
            "profile": Self::redacted(profile),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapport_domain::builtin_counselors;
    use serde_json::Value;

    #[test]
    fn test_profile_json_omits_password() {
        let mut profile = UserProfile::guest();
        profile.password = Some("supersecret".to_string());

        let out = JsonFormatter.format_profile(&profile);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["name"], "라포 체험자");
        assert_eq!(value["preferredContact"], "none");
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_counselor_list_is_array() {
        let counselors = builtin_counselors();
        let refs: Vec<&Counselor> = counselors.iter().take(2).collect();
        let value: Value =
            serde_json::from_str(&JsonFormatter.format_counselor_list(&refs)).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["id"], counselors[0].id.as_str());
        assert!(value[0].get("responseTime").is_some());
    }

    #[test]
    fn test_login_outcome() {
        let out = JsonFormatter.format_login(&UserProfile::guest(), LoginOutcome::Created);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["outcome"], "created");
    }
}
