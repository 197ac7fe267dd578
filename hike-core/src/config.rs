use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Endpoint used when nothing has been configured; matches the default
/// local dev address of the forecast backend.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/get_hike_forecast";

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Forecast endpoint override, e.g. "https://hike.example.org/get_hike_forecast".
    pub endpoint: Option<String>,
}

impl Config {
    /// Endpoint to submit forecast requests to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn set_endpoint(&mut self, endpoint: String) {
        self.endpoint = Some(endpoint);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "hike-forecast", "hike-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_default_endpoint() {
        let cfg = Config::default();
        assert_eq!(cfg.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn set_endpoint_overrides_default() {
        let mut cfg = Config::default();
        cfg.set_endpoint("https://hike.example.org/forecast".to_string());
        assert_eq!(cfg.endpoint(), "https://hike.example.org/forecast");
    }

    #[test]
    fn endpoint_round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.set_endpoint("https://hike.example.org/forecast".to_string());

        let toml = toml::to_string_pretty(&cfg).expect("should serialize");
        let parsed: Config = toml::from_str(&toml).expect("should parse");
        assert_eq!(parsed.endpoint(), cfg.endpoint());
    }

    #[test]
    fn missing_file_loads_as_default() {
        let path = PathBuf::from("/nonexistent/hike-cli/config.toml");
        let cfg = Config::load_from(&path).expect("missing file is fine");
        assert!(cfg.endpoint.is_none());
    }
}
