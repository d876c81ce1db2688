//! User profile domain.
//!
//! - [`entities::UserProfile`]: account details kept on this machine only
//! - [`entities::NotificationSettings`]: notification toggles

pub mod entities;

pub use entities::{NotificationSettings, PreferredContact, UserProfile};
