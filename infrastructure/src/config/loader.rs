//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

const PROJECT_FILES: [&str; 2] = ["rapport.toml", ".rapport.toml"];

/// Environment variable that overrides `api.base_url`
pub const API_BASE_ENV: &str = "RAPPORT_API_BASE";

/// Prefix for environment overrides of any key (`__` separates sections)
pub const ENV_PREFIX: &str = "RAPPORT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `RAPPORT_API_BASE`, then `RAPPORT_<SECTION>__<KEY>` variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./rapport.toml` or `./.rapport.toml`
    /// 4. Global: `$CONFIG_DIR/rapport/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                debug!("Loading global config {}", global_path.display());
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            debug!("Loading project config {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            debug!("Loading explicit config {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Load default configuration (for --no-config)
    ///
    /// Files are skipped; the environment still applies.
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Self::with_env(Figment::new().merge(Serialized::defaults(FileConfig::default())))
            .extract()
            .map_err(Box::new)
    }

    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[API_BASE_ENV])
                    .map(|_| "api.base_url".into()),
            )
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("rapport").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        if std::env::var_os(API_BASE_ENV).is_some() {
            println!("  [SET  ] Env:     {}", API_BASE_ENV);
        } else {
            println!("  [     ] Env:     {}", API_BASE_ENV);
        }

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./rapport.toml or ./.rapport.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_API_BASE;
    use figment::Jail;
    use rapport_domain::OutputFormat;

    fn isolate(jail: &mut Jail) {
        let dir = jail.directory().to_path_buf();
        jail.set_env("XDG_CONFIG_HOME", dir.join("xdg").display());
        jail.set_env("HOME", dir.display());
    }

    #[test]
    fn test_load_defaults() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;
            assert_eq!(config.api.base_url, DEFAULT_API_BASE);
            assert!(config.output.color);
            Ok(())
        });
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().ends_with("rapport/config.toml"));
    }

    #[test]
    fn test_project_file_overrides_global() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_dir("xdg/rapport")?;
            jail.create_file(
                "xdg/rapport/config.toml",
                r#"
[api]
base_url = "http://global:8000"

[output]
color = false
"#,
            )?;
            jail.create_file(
                ".rapport.toml",
                r#"
[api]
base_url = "http://project:8000"
"#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.api.base_url, "http://project:8000");
            assert!(!config.output.color);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_overrides_project() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("rapport.toml", "[output]\nformat = \"text\"\n")?;
            jail.create_file("custom.toml", "[output]\nformat = \"json\"\n")?;

            let config = ConfigLoader::load(Some(Path::new("custom.toml"))).map_err(|e| *e)?;
            assert_eq!(config.output.format, Some(OutputFormat::Json));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("rapport.toml", "[api]\nbase_url = \"http://file:8000\"\n")?;
            jail.set_env("RAPPORT_API_BASE", "https://env.example.com");
            jail.set_env("RAPPORT_REPL__SHOW_PROGRESS", "false");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.api.base_url, "https://env.example.com");
            assert!(!config.repl.show_progress);
            Ok(())
        });
    }

    #[test]
    fn test_env_applies_without_config_files() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("rapport.toml", "[output]\ncolor = false\n")?;
            jail.set_env("RAPPORT_API_BASE", "http://10.0.0.2:9000/");

            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;
            assert_eq!(config.api.normalized_base_url(), "http://10.0.0.2:9000");
            assert!(config.output.color);
            Ok(())
        });
    }
}
