//! Configuration loading and typed config structures for the Foundry.
//!
//! The canonical configuration lives in `foundry-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure, and provides a loader that falls back to defaults
//! when the file is absent. All defaults reproduce the station's
//! canonical starting state: 50 000 credits, 1000 kg of materials,
//! 500 kW of power, no research, one simulated day per 2 seconds.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level Foundry configuration.
///
/// Mirrors the structure of `foundry-config.yaml`. All fields have
/// defaults, so a missing file or an empty document yields a playable
/// station.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FoundryConfig {
    /// Station identity and timing.
    #[serde(default)]
    pub station: StationSettings,

    /// Starting resource counters.
    #[serde(default)]
    pub resources: StartingResources,

    /// Offer board parameters.
    #[serde(default)]
    pub offers: OffersSettings,

    /// Observer API server settings.
    #[serde(default)]
    pub observer: ObserverSettings,
}

impl FoundryConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Station identity and timing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StationSettings {
    /// Human-readable station name.
    #[serde(default = "default_station_name")]
    pub name: String,

    /// Station level passed to the quest generator; scales contract
    /// complexity and rewards in the prompt.
    #[serde(default = "default_station_level")]
    pub level: u32,

    /// Real-time milliseconds per simulated day.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop the game loop after this many days. `None` runs until the
    /// process is terminated.
    #[serde(default)]
    pub max_days: Option<u64>,
}

impl Default for StationSettings {
    fn default() -> Self {
        Self {
            name: default_station_name(),
            level: default_station_level(),
            tick_interval_ms: default_tick_interval_ms(),
            max_days: None,
        }
    }
}

/// Starting resource counters for a fresh station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StartingResources {
    /// Starting credits.
    #[serde(default = "default_cash")]
    pub cash: u64,

    /// Starting raw materials in kilograms.
    #[serde(default = "default_materials")]
    pub materials: u64,

    /// Starting power in kilowatts.
    #[serde(default = "default_power")]
    pub power: u64,

    /// Starting research points.
    #[serde(default)]
    pub research_points: u64,
}

impl Default for StartingResources {
    fn default() -> Self {
        Self {
            cash: default_cash(),
            materials: default_materials(),
            power: default_power(),
            research_points: 0,
        }
    }
}

/// Offer board configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OffersSettings {
    /// Number of quests generated per refresh.
    #[serde(default = "default_offer_count")]
    pub count: usize,
}

impl Default for OffersSettings {
    fn default() -> Self {
        Self {
            count: default_offer_count(),
        }
    }
}

/// Observer API server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObserverSettings {
    /// Host address to bind (e.g. `0.0.0.0`).
    #[serde(default = "default_observer_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_observer_port")]
    pub port: u16,
}

impl Default for ObserverSettings {
    fn default() -> Self {
        Self {
            host: default_observer_host(),
            port: default_observer_port(),
        }
    }
}

fn default_station_name() -> String {
    "Orbital Artisan Foundry".to_owned()
}

const fn default_station_level() -> u32 {
    1
}

// 1 simulated day passes every 2 seconds.
const fn default_tick_interval_ms() -> u64 {
    2_000
}

const fn default_cash() -> u64 {
    50_000
}

const fn default_materials() -> u64 {
    1_000
}

const fn default_power() -> u64 {
    500
}

const fn default_offer_count() -> usize {
    3
}

fn default_observer_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_observer_port() -> u16 {
    8080
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = FoundryConfig::parse("{}").unwrap();
        assert_eq!(config, FoundryConfig::default());
        assert_eq!(config.resources.cash, 50_000);
        assert_eq!(config.resources.materials, 1_000);
        assert_eq!(config.resources.power, 500);
        assert_eq!(config.resources.research_points, 0);
        assert_eq!(config.station.tick_interval_ms, 2_000);
        assert_eq!(config.offers.count, 3);
        assert!(config.station.max_days.is_none());
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let yaml = r"
station:
  level: 3
  tick_interval_ms: 50
  max_days: 10
resources:
  materials: 4000
";
        let config = FoundryConfig::parse(yaml).unwrap();
        assert_eq!(config.station.level, 3);
        assert_eq!(config.station.tick_interval_ms, 50);
        assert_eq!(config.station.max_days, Some(10));
        assert_eq!(config.resources.materials, 4_000);
        // Untouched fields keep their defaults.
        assert_eq!(config.resources.cash, 50_000);
        assert_eq!(config.observer.port, 8080);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(FoundryConfig::parse("station: [").is_err());
    }
}
