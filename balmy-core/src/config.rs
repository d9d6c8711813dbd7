use anyhow::{Context, Result, anyhow, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::{
    geo::Coordinate,
    icons::{IconAsset, IconTable},
    refresh::RefreshPolicy,
};

pub const DEFAULT_BASE_URL: &str = "https://api.weather.gov";

/// Point to forecast for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub longitude: f64,
    pub latitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            longitude: -93.2054,
            latitude: 44.9475,
        }
    }
}

impl From<LocationConfig> for Coordinate {
    fn from(loc: LocationConfig) -> Self {
        Coordinate::new(loc.longitude, loc.latitude)
    }
}

/// How to reach api.weather.gov.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// The API asks callers to identify themselves, ideally with a contact.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("balmy/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Minimum age of the displayed data before a trigger refetches it.
    #[serde(default = "default_interval")]
    pub interval_minutes: u32,
}

const fn default_interval() -> u32 {
    5
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Example TOML:
    /// [icons.rain_showers]
    /// icon = "/assets/showers.svg"
    /// percent = 60
    #[serde(default)]
    pub icons: HashMap<String, IconAsset>,
}

impl Config {
    pub fn coordinate(&self) -> Coordinate {
        self.location.into()
    }

    /// Replace the configured location after checking it is on the globe.
    pub fn set_location(&mut self, coordinate: Coordinate) -> Result<()> {
        ensure!(
            coordinate.is_valid(),
            "Invalid coordinates ({}, {}): latitude must be -90..90, longitude must be -180..180",
            coordinate.longitude,
            coordinate.latitude,
        );
        self.location = LocationConfig {
            longitude: coordinate.longitude,
            latitude: coordinate.latitude,
        };
        Ok(())
    }

    /// The standard icon table with this config's overrides applied.
    pub fn icon_table(&self) -> IconTable {
        IconTable::standard().with_overrides(&self.icons)
    }

    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy::every_minutes(self.refresh.interval_minutes)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        ensure!(
            cfg.coordinate().is_valid(),
            "Configured location ({}, {}) is out of range",
            cfg.location.longitude,
            cfg.location.latitude,
        );
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
        let dirs = ProjectDirs::from("dev", "balmy", "balmy")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
