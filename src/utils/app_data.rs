use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "feather-docs";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "feather-docs.log";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Search index to use instead of the built-in one
    #[serde(default)]
    pub index_path: Option<PathBuf>,

    /// Milliseconds to wait before scrolling to the first highlight when a
    /// result's anchor is not on the page
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Log filter directives, e.g. `feather_docs=debug`
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_settle_ms() -> u64 {
    200
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            index_path: None,
            settle_ms: default_settle_ms(),
            log_filter: None,
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Load config from `path`, or return default if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// The index file to load: the command line wins over the config
    pub fn effective_index_path<'a>(&'a self, cli: Option<&'a Path>) -> Option<&'a Path> {
        cli.or(self.index_path.as_deref())
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the path of the log file written while the TUI owns the terminal
pub fn get_log_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(LOG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)
        .with_context(|| format!("Failed to create {}", app_dir.display()))?;
    Ok(app_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.index_path, None);
        assert_eq!(config.settle_ms, 200);
        assert_eq!(config.settle_delay(), Duration::from_millis(200));
        assert_eq!(config.log_filter, None);
    }

    #[test]
    fn test_app_config_partial_json() {
        // Should use defaults for missing fields
        let json = r#"{"log_filter": "feather_docs=debug"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.log_filter.as_deref(), Some("feather_docs=debug"));
        assert_eq!(config.settle_ms, 200);
    }

    #[test]
    fn test_app_config_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = AppConfig {
            index_path: Some(PathBuf::from("/tmp/index.json")),
            settle_ms: 50,
            log_filter: None,
        };

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_cli_index_overrides_config() {
        let config = AppConfig {
            index_path: Some(PathBuf::from("from-config.json")),
            ..AppConfig::default()
        };
        assert_eq!(
            config.effective_index_path(Some(Path::new("from-cli.json"))),
            Some(Path::new("from-cli.json"))
        );
        assert_eq!(
            config.effective_index_path(None),
            Some(Path::new("from-config.json"))
        );
        assert_eq!(AppConfig::default().effective_index_path(None), None);
    }
}
