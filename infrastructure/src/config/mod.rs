//! Configuration file loading for rapport
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment (`RAPPORT_API_BASE`, `RAPPORT_<SECTION>__<KEY>`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./rapport.toml` or `./.rapport.toml`
//! 4. Global: `$CONFIG_DIR/rapport/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_BASE, FileApiConfig, FileConfig, FileOutputConfig,
    FileOutputFormat, FileProfileConfig, FileReplConfig,
};
pub use loader::{API_BASE_ENV, ConfigLoader, ENV_PREFIX};
