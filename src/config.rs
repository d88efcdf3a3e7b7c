//! Configuration for bookshelf.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (see [`crate::cli::Cli`])
//! 2. Environment variables (BOOKSHELF_HOST, BOOKSHELF_PORT)
//! 3. Config file (.bookshelf/config.yaml)
//! 4. Defaults (127.0.0.1:55555, seeding on)
//!
//! Config file discovery:
//! - Searches current directory and parents for .bookshelf/config.yaml
//! - Falls back to ~/.bookshelf/config.yaml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default listener host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listener port
pub const DEFAULT_PORT: u16 = 55555;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifierConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Load the starter collection at startup
    pub seed: Option<bool>,
}

/// Where the notification listener lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierSettings {
    pub host: String,
    pub port: u16,
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Values that override file and defaults (flags or environment)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config_file: Option<PathBuf>,
    pub no_seed: bool,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub notifier: NotifierSettings,
    /// Whether to load the starter collection
    pub seed: bool,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents, then home
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(".bookshelf").join("config.yaml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let home_config = dirs::home_dir()?.join(".bookshelf").join("config.yaml");
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge overrides, an optional config file and defaults
fn resolve(overrides: Overrides, file: Option<ConfigFile>, config_file: Option<PathBuf>) -> ResolvedConfig {
    let (file_notifier, file_catalog) = match file {
        Some(file) => (file.notifier, file.catalog),
        None => (NotifierConfig::default(), CatalogConfig::default()),
    };

    let notifier = NotifierSettings {
        host: overrides
            .host
            .or(file_notifier.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: overrides.port.or(file_notifier.port).unwrap_or(DEFAULT_PORT),
    };

    let seed = !overrides.no_seed && file_catalog.seed.unwrap_or(true);

    ResolvedConfig {
        notifier,
        seed,
        config_file,
    }
}

/// Load configuration from all sources.
///
/// Flag values in `overrides` already include their environment fallbacks.
pub fn load_config(overrides: Overrides) -> Result<ResolvedConfig> {
    let config_file = match overrides.config_file.clone() {
        Some(path) => Some(path),
        None => find_config_file(),
    };

    let file = config_file
        .as_deref()
        .map(load_config_file)
        .transpose()?;

    Ok(resolve(overrides, file, config_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let config_dir = dir.path().join(".bookshelf");
        std::fs::create_dir_all(&config_dir).unwrap();

        let config_path = config_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "{}", body).unwrap();
        config_path
    }

    #[test]
    fn test_defaults_without_file() {
        let config = resolve(Overrides::default(), None, None);

        assert_eq!(config.notifier, NotifierSettings::default());
        assert!(config.seed);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
version: "1.0"
notifier:
  host: listener.local
  port: 6000
catalog:
  seed: false
"#,
        );

        let config = load_config(Overrides {
            config_file: Some(path.clone()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.notifier.host, "listener.local");
        assert_eq!(config.notifier.port, 6000);
        assert!(!config.seed);
        assert_eq!(config.config_file, Some(path));
    }

    #[test]
    fn test_overrides_beat_file() {
        let file: ConfigFile = serde_yaml::from_str(
            r#"
version: "1.0"
notifier:
  host: from-file
  port: 6000
"#,
        )
        .unwrap();

        let config = resolve(
            Overrides {
                port: Some(7000),
                no_seed: true,
                ..Default::default()
            },
            Some(file),
            None,
        );

        assert_eq!(config.notifier.host, "from-file");
        assert_eq!(config.notifier.port, 7000);
        assert!(!config.seed);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "notifier: [not, a, map");

        let result = load_config(Overrides {
            config_file: Some(path),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
