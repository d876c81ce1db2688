//! User profile entities
//!
//! Serialized as camelCase JSON so a stored profile keeps the same shape
//! across versions of the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the user prefers to be contacted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredContact {
    Email,
    Sms,
    #[default]
    None,
}

impl PreferredContact {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferredContact::Email => "email",
            PreferredContact::Sms => "sms",
            PreferredContact::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PreferredContact::Email => "이메일",
            PreferredContact::Sms => "문자",
            PreferredContact::None => "받지 않음",
        }
    }
}

impl std::str::FromStr for PreferredContact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(PreferredContact::Email),
            "sms" => Ok(PreferredContact::Sms),
            "none" => Ok(PreferredContact::None),
            other => Err(format!("unknown contact preference: {other}")),
        }
    }
}

/// Notification toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub session_summary: bool,
    pub weekly_tips: bool,
    pub emergency_alerts: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            session_summary: true,
            weekly_tips: false,
            emergency_alerts: true,
        }
    }
}

/// Locally stored account profile (Entity)
///
/// Independent of screening sessions; overwritten wholesale on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub preferred_contact: PreferredContact,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: None,
            phone: None,
            goal: None,
            memo: None,
            last_login: None,
            preferred_contact: PreferredContact::None,
            notifications: NotificationSettings::default(),
        }
    }

    /// Guest profile shown before anything has been saved
    pub fn guest() -> Self {
        Self {
            goal: Some("정기 자가점검".to_string()),
            phone: Some("010-0000-0000".to_string()),
            memo: Some("나중에 상담 전 사전 점검을 활용해보기".to_string()),
            ..Self::new("라포 체험자", "guest@rapport.app")
        }
    }

    /// Copy of the profile with `last_login` set to `at`
    pub fn touched(&self, at: DateTime<Utc>) -> Self {
        Self {
            last_login: Some(at),
            ..self.clone()
        }
    }
}
