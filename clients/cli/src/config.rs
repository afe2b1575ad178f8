//! Application configuration.

use crate::consts::cli_consts::http::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use std::{fs, path::Path};

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_background_color() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Overrides the environment's API base URL when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default = "default_background_color")]
    pub with_background_color: bool,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            with_background_color: default_background_color(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the config file if one exists, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the config file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Zero falls back to the default.
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_secs {
            0 => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Resolve the API environment: explicit flag, then config file, then the
    /// environment-variable default.
    pub fn resolve_environment(&self, flag: Option<String>, default: Environment) -> Environment {
        match flag.or_else(|| self.api_url.clone()) {
            Some(api_url) => Environment::Custom { api_url },
            None => default,
        }
    }
}

/// Location of the config file, `~/.kpi-dash/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    Ok(home_path.join(".kpi-dash").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn custom_config() -> Config {
        Config {
            api_url: Some("http://localhost:4000".to_string()),
            with_background_color: false,
            request_timeout_secs: 3,
        }
    }

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = custom_config();
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let result = Config::default().save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Missing keys fall back to defaults.
    fn test_empty_object_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, Config::default());
        assert_eq!(loaded.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    // A zero timeout from the file is treated as unset.
    fn test_zero_request_timeout_uses_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"request_timeout_secs": 0}"#).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(
            loaded.request_timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(custom_config().request_timeout(), Duration::from_secs(3));
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = Config::load_from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_clear_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(Config::clear(&path).is_ok());

        Config::default().save(&path).unwrap();
        Config::clear(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_flag_overrides_config_url() {
        let config = custom_config();
        assert_eq!(
            config.resolve_environment(Some("http://flag".to_string()), Environment::Local),
            Environment::Custom {
                api_url: "http://flag".to_string()
            }
        );
        assert_eq!(
            config.resolve_environment(None, Environment::Local),
            Environment::Custom {
                api_url: "http://localhost:4000".to_string()
            }
        );
        assert_eq!(
            Config::default().resolve_environment(None, Environment::Local),
            Environment::Local
        );
    }
}
