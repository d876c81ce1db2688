//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod api;
mod output;
mod profile;
mod repl;

pub use api::{DEFAULT_API_BASE, FileApiConfig};
pub use output::{FileOutputConfig, FileOutputFormat};
pub use profile::FileProfileConfig;
pub use repl::FileReplConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("api.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("api.base_url must start with http:// or https:// (got '{0}')")]
    UnsupportedScheme(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Screening backend settings
    pub api: FileApiConfig,
    /// Local profile store settings
    pub profile: FileProfileConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let base = self.api.normalized_base_url();
        if base.is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigValidationError::UnsupportedScheme(base.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapport_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[api]
base_url = "https://screening.example.com/"

[profile]
path = "/tmp/rapport/profile.json"

[output]
format = "json"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/rapport/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.normalized_base_url(), "https://screening.example.com");
        assert_eq!(
            config.profile.path.as_deref(),
            Some(std::path::Path::new("/tmp/rapport/profile.json"))
        );
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[output]
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert!(config.profile.path.is_none());
        assert!(!config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_validate() {
        assert!(FileConfig::default().validate().is_ok());

        let mut config = FileConfig::default();
        config.api.base_url = " / ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyBaseUrl));

        config.api.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnsupportedScheme(_))
        ));
    }
}
