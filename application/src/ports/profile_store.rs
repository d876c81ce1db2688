//! Profile store port
//!
//! A single-key local store for the [`UserProfile`]. Operations are
//! synchronous and best-effort: implementations log failures instead of
//! returning them, so the UI never has to handle a storage error.

use rapport_domain::UserProfile;

pub trait ProfileStore: Send + Sync {
    /// Read the stored profile, `None` when absent or unreadable
    fn load(&self) -> Option<UserProfile>;

    /// Overwrite the stored profile
    fn save(&self, profile: &UserProfile);

    /// Remove the stored profile
    fn clear(&self);
}
