//! Configuration file support for the clinic scheduler.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/clinic/config.toml`.

use crate::codec::TIME_FMT;
use crate::{Error, Result};
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub slots: SlotConfig,
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

/// Slot-grid policy for a clinic day
///
/// Candidate booking slots run from `day_start` (inclusive) to `day_end`
/// (exclusive) every `slot_minutes` minutes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SlotConfig {
    #[serde(default = "default_day_start")]
    pub day_start: String,

    #[serde(default = "default_day_end")]
    pub day_end: String,

    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            day_start: default_day_start(),
            day_end: default_day_end(),
            slot_minutes: default_slot_minutes(),
        }
    }
}

impl SlotConfig {
    /// Validate and build the concrete slot grid
    pub fn grid(&self) -> Result<SlotGrid> {
        let start = NaiveTime::parse_from_str(&self.day_start, TIME_FMT)
            .map_err(|e| Error::Config(format!("invalid day_start {:?}: {}", self.day_start, e)))?;
        let end = NaiveTime::parse_from_str(&self.day_end, TIME_FMT)
            .map_err(|e| Error::Config(format!("invalid day_end {:?}: {}", self.day_end, e)))?;

        if self.slot_minutes == 0 {
            return Err(Error::Config("slot_minutes must be positive".into()));
        }
        if start >= end {
            return Err(Error::Config(format!(
                "day_start {} must be before day_end {}",
                self.day_start, self.day_end
            )));
        }

        Ok(SlotGrid {
            start,
            end,
            interval: Duration::minutes(i64::from(self.slot_minutes)),
        })
    }
}

/// A validated candidate grid of slot start-times
#[derive(Clone, Copy, Debug)]
pub struct SlotGrid {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub interval: Duration,
}

impl SlotGrid {
    /// All candidate slot start-times for one clinic day, ascending
    pub fn candidates(&self) -> Vec<NaiveTime> {
        let mut slots = Vec::new();
        let mut current = self.start;
        while current < self.end {
            slots.push(current);
            let (next, wrapped) = current.overflowing_add_signed(self.interval);
            if wrapped != 0 || next <= current {
                break;
            }
            current = next;
        }
        slots
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("clinic")
}

fn default_day_start() -> String {
    "09:00".into()
}

fn default_day_end() -> String {
    "17:00".into()
}

fn default_slot_minutes() -> u32 {
    30
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
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
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("clinic").join("config.toml")
    }
}
