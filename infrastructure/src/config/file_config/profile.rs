//! Local profile configuration from TOML (`[profile]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw profile store configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProfileConfig {
    /// Path of the profile JSON file, platform data dir when unset
    pub path: Option<PathBuf>,
}
