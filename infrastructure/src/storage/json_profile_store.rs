//! JSON file backed profile store.
//!
//! The whole [`UserProfile`] lives in a single file that is rewritten on
//! every save. All failures are logged and swallowed.

use rapport_application::ProfileStore;
use rapport_domain::UserProfile;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

const APP_DIR: &str = "rapport";
const FILE_NAME: &str = "profile.json";

pub struct JsonFileProfileStore {
    path: PathBuf,
}

impl JsonFileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `path`, or at the platform default when `None`
    ///
    /// Returns `None` when no data directory can be determined.
    pub fn at_or_default(path: Option<&Path>) -> Option<Self> {
        path.map(Path::to_path_buf)
            .or_else(Self::default_path)
            .map(Self::new)
    }

    /// `$DATA_DIR/rapport/profile.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join(APP_DIR).join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for JsonFileProfileStore {
    fn load(&self) -> Option<UserProfile> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Could not read profile {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                error!("Failed to parse stored profile {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, profile: &UserProfile) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create profile directory {}: {}",
                parent.display(),
                e
            );
            return;
        }

        let json = match serde_json::to_string_pretty(profile) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize profile: {}", e);
                return;
            }
        };

        match std::fs::write(&self.path, json) {
            Ok(()) => debug!("Profile saved to {}", self.path.display()),
            Err(e) => error!("Failed to store profile {}: {}", self.path.display(), e),
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Profile removed from {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove profile {}: {}", self.path.display(), e),
        }
    }
}
