use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::Coordinates;

/// Unit system requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed endpoint description for the OneCall API.
///
/// None of these change per request; only coordinates do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub scheme: String,
    /// Host name, optionally with `:port`.
    pub host: String,
    pub base_path: String,
    pub api_key: String,
    pub units: Units,
    /// Data groups left out of the response, e.g. `minutely`.
    pub exclude: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            host: "api.openweathermap.org".to_string(),
            base_path: "/data/2.5".to_string(),
            api_key: String::new(),
            units: Units::Metric,
            exclude: vec!["minutely".to_string()],
        }
    }
}

impl ApiConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [api]
/// api_key = "..."
/// units = "metric"
///
/// [location]
/// latitude = 40.7128
/// longitude = -74.006
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    /// Coordinates used when none are given explicitly.
    pub location: Option<Coordinates>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;

        if let Some(loc) = cfg.location {
            Coordinates::new(loc.latitude, loc.longitude)
                .context("Invalid default location in configuration")?;
        }

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
        let dirs = ProjectDirs::from("dev", "weathernow", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the API config, failing with a hint when no key has been stored.
    pub fn require_api(&self) -> Result<&ApiConfig> {
        if !self.api.has_api_key() {
            return Err(anyhow!(
                "No API key configured.\n\
                 Hint: run `weather configure` and enter your OpenWeather API key."
            ));
        }
        Ok(&self.api)
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api.api_key = api_key.trim().to_string();
    }

    pub fn set_default_location(&mut self, location: Coordinates) {
        self.location = Some(location);
    }
}
