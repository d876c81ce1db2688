//! Local account use case
//!
//! Sign-up, log-in and profile edits against the single-key
//! [`ProfileStore`]. Nothing here talks to a server; the "account" only
//! exists on this machine.

use crate::ports::profile_store::ProfileStore;
use chrono::{DateTime, Utc};
use rapport_domain::{NotificationSettings, PreferredContact, UserProfile};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Goals offered on sign-up, the first one is the default
pub const GOALS: [&str; 4] = [
    "정기 자가점검",
    "상담 준비",
    "불안·우울 관리",
    "스트레스 관리",
];

/// Minimum password length after trimming
pub const MIN_PASSWORD_LEN: usize = 8;

const DEFAULT_USER_NAME: &str = "라포 사용자";
const DEFAULT_LOGIN_GOAL: &str = "마음 상태 점검";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Name is required")]
    EmptyName,

    #[error("Email is required")]
    EmptyEmail,

    #[error("Phone number is required")]
    EmptyPhone,

    #[error("Password is required")]
    EmptyPassword,

    #[error("Password must be at least {min} characters")]
    ShortPassword { min: usize },

    #[error("The terms of service must be accepted")]
    TermsNotAccepted,

    #[error("Unknown goal: {0}")]
    UnknownGoal(String),
}

/// Input of the sign-up form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub goal: String,
    pub preferred_contact: PreferredContact,
    pub accept_terms: bool,
    pub accept_marketing: bool,
}

impl Default for SignUpForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            phone: String::new(),
            goal: GOALS[0].to_string(),
            preferred_contact: PreferredContact::Email,
            accept_terms: true,
            accept_marketing: false,
        }
    }
}

impl SignUpForm {
    /// First failing check, in form order
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if self.email.trim().is_empty() {
            return Err(ProfileError::EmptyEmail);
        }
        if self.password.trim().chars().count() < MIN_PASSWORD_LEN {
            return Err(ProfileError::ShortPassword {
                min: MIN_PASSWORD_LEN,
            });
        }
        if self.phone.trim().is_empty() {
            return Err(ProfileError::EmptyPhone);
        }
        if !self.accept_terms {
            return Err(ProfileError::TermsNotAccepted);
        }
        if !GOALS.contains(&self.goal.as_str()) {
            return Err(ProfileError::UnknownGoal(self.goal.clone()));
        }
        Ok(())
    }
}

/// How a log-in was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The stored profile matched the credentials
    Matched,
    /// No match, a fresh local profile was created
    Created,
}

impl LoginOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            LoginOutcome::Matched => "저장된 계정으로 로그인했어요.",
            LoginOutcome::Created => "로컬에 임시 계정을 만들고 로그인했습니다.",
        }
    }
}

pub struct ProfileService<S: ProfileStore + 'static> {
    store: Arc<S>,
}

impl<S: ProfileStore + 'static> ProfileService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Whether anything is stored at all
    pub fn has_saved(&self) -> bool {
        self.store.load().is_some()
    }

    /// The stored profile with unset optional fields filled from the guest
    /// profile, or the guest profile itself
    pub fn current(&self) -> UserProfile {
        let guest = UserProfile::guest();
        match self.store.load() {
            Some(saved) => UserProfile {
                phone: saved.phone.or(guest.phone),
                goal: saved.goal.or(guest.goal),
                memo: saved.memo.or(guest.memo),
                ..saved
            },
            None => guest,
        }
    }

    /// Apply `edit` to the current profile and save the result
    pub fn update(&self, edit: impl FnOnce(&mut UserProfile)) -> UserProfile {
        let mut profile = self.current();
        edit(&mut profile);
        self.store.save(&profile);
        debug!("Profile updated");
        profile
    }

    /// Record a log-in at `at` and save
    pub fn touch_login(&self, profile: &UserProfile, at: DateTime<Utc>) -> UserProfile {
        let next = profile.touched(at);
        self.store.save(&next);
        next
    }

    /// Remove the stored profile and return the guest profile
    pub fn reset(&self) -> UserProfile {
        self.store.clear();
        info!("Local profile cleared");
        UserProfile::guest()
    }

    pub fn sign_up(&self, form: &SignUpForm) -> Result<UserProfile, ProfileError> {
        form.validate()?;

        let profile = UserProfile {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: Some(form.password.trim().to_string()),
            phone: Some(form.phone.trim().to_string()),
            goal: Some(form.goal.clone()),
            memo: None,
            last_login: Some(Utc::now()),
            preferred_contact: form.preferred_contact,
            notifications: NotificationSettings {
                session_summary: true,
                weekly_tips: form.accept_marketing,
                emergency_alerts: true,
            },
        };
        self.store.save(&profile);
        info!("Signed up local account");
        Ok(profile)
    }

    /// Log in against the stored profile, creating a local one on mismatch
    pub fn log_in(
        &self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<(UserProfile, LoginOutcome), ProfileError> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() {
            return Err(ProfileError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(ProfileError::EmptyPassword);
        }

        let stored = self.store.load();
        let now = Utc::now();

        if let Some(saved) = stored.as_ref().filter(|p| credentials_match(p, email, password)) {
            let profile = UserProfile {
                password: if remember {
                    Some(password.to_string())
                } else {
                    saved.password.clone()
                },
                ..saved.clone()
            };
            debug!("Login matched stored profile");
            return Ok((self.touch_login(&profile, now), LoginOutcome::Matched));
        }

        let profile = UserProfile {
            name: stored
                .as_ref()
                .map(|p| p.name.clone())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            password: remember.then(|| password.to_string()),
            goal: Some(
                stored
                    .as_ref()
                    .and_then(|p| p.goal.clone())
                    .filter(|g| !g.is_empty())
                    .unwrap_or_else(|| DEFAULT_LOGIN_GOAL.to_string()),
            ),
            preferred_contact: stored
                .as_ref()
                .map(|p| p.preferred_contact)
                .unwrap_or(PreferredContact::Email),
            notifications: stored
                .as_ref()
                .map(|p| p.notifications)
                .unwrap_or_default(),
            ..UserProfile::new(DEFAULT_USER_NAME, email)
        };
        debug!("Login created a new local profile");
        Ok((self.touch_login(&profile, now), LoginOutcome::Created))
    }
}

fn credentials_match(stored: &UserProfile, email: &str, password: &str) -> bool {
    stored.email == email
        && stored
            .password
            .as_deref()
            .is_none_or(|p| p.is_empty() || p == password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        slot: Mutex<Option<UserProfile>>,
    }

    impl MemoryStore {
        fn with(profile: UserProfile) -> Self {
            Self {
                slot: Mutex::new(Some(profile)),
            }
        }
    }

    impl ProfileStore for MemoryStore {
        fn load(&self) -> Option<UserProfile> {
            self.slot.lock().unwrap().clone()
        }

        fn save(&self, profile: &UserProfile) {
            *self.slot.lock().unwrap() = Some(profile.clone());
        }

        fn clear(&self) {
            *self.slot.lock().unwrap() = None;
        }
    }

    fn form() -> SignUpForm {
        SignUpForm {
            name: " 김라포 ".to_string(),
            email: "rapport@example.com ".to_string(),
            password: "  supersecret ".to_string(),
            phone: "010-1234-5678".to_string(),
            ..SignUpForm::default()
        }
    }

    #[test]
    fn test_current_falls_back_to_guest() {
        let service = ProfileService::new(Arc::new(MemoryStore::default()));
        assert!(!service.has_saved());
        assert_eq!(service.current(), UserProfile::guest());
    }

    #[test]
    fn test_current_fills_unset_fields_from_guest() {
        let store = Arc::new(MemoryStore::with(UserProfile::new("민지", "minji@example.com")));
        let service = ProfileService::new(store);

        let current = service.current();
        assert_eq!(current.name, "민지");
        assert_eq!(current.email, "minji@example.com");
        assert_eq!(current.phone.as_deref(), Some("010-0000-0000"));
        assert_eq!(current.goal.as_deref(), Some("정기 자가점검"));
    }

    #[test]
    fn test_update_saves_wholesale() {
        let store = Arc::new(MemoryStore::default());
        let service = ProfileService::new(Arc::clone(&store));

        let updated = service.update(|p| {
            p.memo = Some("다음 주 상담".to_string());
            p.notifications.weekly_tips = true;
        });
        assert_eq!(store.load(), Some(updated.clone()));
        assert!(updated.notifications.weekly_tips);
        assert_eq!(updated.name, "라포 체험자");
    }

    #[test]
    fn test_reset_clears_store() {
        let store = Arc::new(MemoryStore::with(UserProfile::new("a", "b")));
        let service = ProfileService::new(Arc::clone(&store));

        assert_eq!(service.reset(), UserProfile::guest());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_sign_up_trims_and_saves() {
        let store = Arc::new(MemoryStore::default());
        let service = ProfileService::new(Arc::clone(&store));

        let profile = service
            .sign_up(&SignUpForm {
                accept_marketing: true,
                ..form()
            })
            .unwrap();
        assert_eq!(profile.name, "김라포");
        assert_eq!(profile.email, "rapport@example.com");
        assert_eq!(profile.password.as_deref(), Some("supersecret"));
        assert_eq!(profile.preferred_contact, PreferredContact::Email);
        assert!(profile.notifications.weekly_tips);
        assert!(profile.last_login.is_some());
        assert_eq!(store.load(), Some(profile));
    }

    #[test]
    fn test_sign_up_validation() {
        let service = ProfileService::new(Arc::new(MemoryStore::default()));
        let cases = [
            (SignUpForm { name: "  ".into(), ..form() }, ProfileError::EmptyName),
            (SignUpForm { email: "".into(), ..form() }, ProfileError::EmptyEmail),
            (
                SignUpForm { password: " 1234567 ".into(), ..form() },
                ProfileError::ShortPassword { min: 8 },
            ),
            (SignUpForm { phone: " ".into(), ..form() }, ProfileError::EmptyPhone),
            (
                SignUpForm { accept_terms: false, ..form() },
                ProfileError::TermsNotAccepted,
            ),
            (
                SignUpForm { goal: "다이어트".into(), ..form() },
                ProfileError::UnknownGoal("다이어트".into()),
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(service.sign_up(&input).unwrap_err(), expected);
        }
        assert!(!service.has_saved());
    }

    #[test]
    fn test_log_in_matches_stored_profile() {
        let store = Arc::new(MemoryStore::default());
        let service = ProfileService::new(Arc::clone(&store));
        service.sign_up(&form()).unwrap();

        let (profile, outcome) = service
            .log_in(" rapport@example.com", "supersecret", false)
            .unwrap();
        assert_eq!(outcome, LoginOutcome::Matched);
        assert_eq!(profile.name, "김라포");
        assert_eq!(profile.phone.as_deref(), Some("010-1234-5678"));
        assert_eq!(profile.password.as_deref(), Some("supersecret"));
    }

    #[test]
    fn test_log_in_without_stored_password_matches_on_email() {
        let store = Arc::new(MemoryStore::with(UserProfile::new("민지", "minji@example.com")));
        let service = ProfileService::new(Arc::clone(&store));

        let (profile, outcome) = service.log_in("minji@example.com", "anything", true).unwrap();
        assert_eq!(outcome, LoginOutcome::Matched);
        assert_eq!(profile.password.as_deref(), Some("anything"));
        assert!(profile.last_login.is_some());
        assert_eq!(store.load(), Some(profile));
    }

    #[test]
    fn test_log_in_mismatch_creates_profile() {
        let store = Arc::new(MemoryStore::default());
        let service = ProfileService::new(Arc::clone(&store));
        service.sign_up(&form()).unwrap();

        let (profile, outcome) = service
            .log_in("other@example.com", "password", false)
            .unwrap();
        assert_eq!(outcome, LoginOutcome::Created);
        assert_eq!(profile.email, "other@example.com");
        assert_eq!(profile.name, "김라포");
        assert_eq!(profile.goal.as_deref(), Some("정기 자가점검"));
        assert!(profile.password.is_none());
        assert!(profile.phone.is_none());
    }

    #[test]
    fn test_log_in_on_empty_store_uses_defaults() {
        let service = ProfileService::new(Arc::new(MemoryStore::default()));

        let (profile, outcome) = service.log_in("new@example.com", "pw", true).unwrap();
        assert_eq!(outcome, LoginOutcome::Created);
        assert_eq!(profile.name, "라포 사용자");
        assert_eq!(profile.goal.as_deref(), Some("마음 상태 점검"));
        assert_eq!(profile.preferred_contact, PreferredContact::Email);
        assert_eq!(profile.notifications, NotificationSettings::default());
        assert_eq!(profile.password.as_deref(), Some("pw"));
    }

    #[test]
    fn test_log_in_requires_credentials() {
        let service = ProfileService::new(Arc::new(MemoryStore::default()));
        assert_eq!(
            service.log_in(" ", "pw", true).unwrap_err(),
            ProfileError::EmptyEmail
        );
        assert_eq!(
            service.log_in("a@b.c", "  ", true).unwrap_err(),
            ProfileError::EmptyPassword
        );
        assert!(!service.has_saved());
    }

    #[test]
    fn test_touch_login_sets_timestamp() {
        let store = Arc::new(MemoryStore::default());
        let service = ProfileService::new(Arc::clone(&store));
        let at = DateTime::parse_from_rfc3339("2024-05-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let next = service.touch_login(&UserProfile::guest(), at);
        assert_eq!(next.last_login, Some(at));
        assert_eq!(store.load().unwrap().last_login, Some(at));
    }
}
