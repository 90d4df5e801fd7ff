use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment variable consulted before the config file.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather one-call API key. Opaque credential; never logged.
    pub api_key: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
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
        let dirs = ProjectDirs::from("dev", "skyview", "skyview")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set/replace the stored API key.
    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// API key from the environment, falling back to the config file.
    /// Fails fast when neither is set.
    pub fn require_api_key(&self) -> Result<String> {
        resolve_api_key(env::var(API_KEY_ENV).ok(), self.api_key.as_deref()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `skyview configure` and enter your OpenWeather API key,\n\
                 or set the {API_KEY_ENV} environment variable."
            )
        })
    }
}

/// Environment wins over the config file; empty values count as unset.
fn resolve_api_key(env_key: Option<String>, file_key: Option<&str>) -> Option<String> {
    env_key
        .filter(|key| !key.is_empty())
        .or_else(|| file_key.filter(|key| !key.is_empty()).map(str::to_owned))
}
