//! Configuration file support for Fireground.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fireground/config.toml`.

use crate::{Error, GoalsRequest, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub library: LibraryConfig,

    #[serde(default)]
    pub equipment: EquipmentConfig,

    #[serde(default)]
    pub program: ProgramConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Exercise library source; the built-in library when unset
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct LibraryConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Equipment availability configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EquipmentConfig {
    #[serde(default = "default_equipment")]
    pub available: Vec<String>,
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            available: default_equipment(),
        }
    }
}

/// Defaults for goals not given on the command line
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgramConfig {
    #[serde(default = "default_goal_type")]
    pub goal_type: String,

    #[serde(default = "default_experience_level")]
    pub experience_level: String,

    #[serde(default = "default_duration_weeks")]
    pub duration_weeks: u32,

    #[serde(default = "default_days_per_week")]
    pub days_per_week: u32,

    #[serde(default)]
    pub include_fireground: bool,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            goal_type: default_goal_type(),
            experience_level: default_experience_level(),
            duration_weeks: default_duration_weeks(),
            days_per_week: default_days_per_week(),
            include_fireground: false,
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("fireground")
}

fn default_equipment() -> Vec<String> {
    vec!["bodyweight".into(), "dumbbells".into()]
}

fn default_goal_type() -> String {
    "Maintain".into()
}

fn default_experience_level() -> String {
    "Beginner".into()
}

fn default_duration_weeks() -> u32 {
    4
}

fn default_days_per_week() -> u32 {
    3
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("fireground").join("config.toml")
    }

    /// Where the active program lives inside the data directory
    pub fn active_program_path(&self) -> PathBuf {
        self.data.data_dir.join("active_program.json")
    }

    /// Goals request pre-filled from the `[program]` and `[equipment]` sections
    pub fn goals_request(&self) -> GoalsRequest {
        GoalsRequest {
            goal_type: Some(self.program.goal_type.clone()),
            experience_level: Some(self.program.experience_level.clone()),
            duration_weeks: Some(self.program.duration_weeks),
            days_per_week: Some(self.program.days_per_week),
            include_fireground: self.program.include_fireground,
            equipment: self.equipment.available.clone(),
            start_date: None,
        }
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
