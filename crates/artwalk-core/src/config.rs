//! TOML-based application configuration.
//!
//! Stores plan defaults and collaborator endpoints at
//! `~/.config/artwalk/config.toml` (or `~/.config/artwalk-dev/` with
//! `ARTWALK_ENV=dev`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::clock;
use crate::error::ConfigError;
use crate::itinerary::PlanConfig;

/// Collaborator endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_routing_url")]
    pub routing_url: String,
    #[serde(default = "default_venues_url")]
    pub venues_url: String,
}

fn default_routing_url() -> String {
    "http://localhost:8080/".to_string()
}
fn default_venues_url() -> String {
    "http://localhost:8080/".to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            routing_url: default_routing_url(),
            venues_url: default_venues_url(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/artwalk/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plan: PlanConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// Returns `~/.config/artwalk[-dev]/` based on ARTWALK_ENV.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ARTWALK_ENV").unwrap_or_else(|_| "production".to_string());
    let dir = if env == "dev" {
        base_dir.join("artwalk-dev")
    } else {
        base_dir.join("artwalk")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "plan.start_time" => Some(self.plan.start_time.clone()),
            "plan.visit_duration_minutes" => Some(self.plan.visit_duration_minutes.to_string()),
            "plan.default_transit_minutes" => Some(self.plan.default_transit_minutes.to_string()),
            "endpoints.routing_url" => Some(self.endpoints.routing_url.clone()),
            "endpoints.venues_url" => Some(self.endpoints.venues_url.clone()),
            _ => None,
        }
    }

    /// Set a config value by dotted key and persist.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "plan.start_time" => {
                if !clock::is_valid_hhmm(value) {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("'{value}' is not a HH:MM time"),
                    });
                }
                self.plan.start_time = value.to_string();
            }
            "plan.visit_duration_minutes" => {
                self.plan.visit_duration_minutes = parse_minutes(key, value)?;
            }
            "plan.default_transit_minutes" => {
                self.plan.default_transit_minutes = parse_minutes(key, value)?;
            }
            "endpoints.routing_url" => self.endpoints.routing_url = value.to_string(),
            "endpoints.venues_url" => self.endpoints.venues_url = value.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        self.save()
    }
}

fn parse_minutes(key: &str, value: &str) -> Result<i64, ConfigError> {
    let minutes: i64 = value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("cannot parse '{value}' as minutes"),
    })?;
    if minutes <= 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "minutes must be positive".to_string(),
        });
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.plan.start_time, "10:00");
        assert_eq!(cfg.plan.visit_duration_minutes, 60);
        assert_eq!(cfg.plan.default_transit_minutes, 30);
    }

    #[test]
    fn test_get_known_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("plan.start_time").as_deref(), Some("10:00"));
        assert_eq!(
            cfg.get("plan.default_transit_minutes").as_deref(),
            Some("30")
        );
        assert_eq!(cfg.get("nope"), None);
    }

    #[test]
    fn test_toml_round_trip() {
        let cfg = Config::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&toml).unwrap();
        assert_eq!(back.plan.start_time, cfg.plan.start_time);
        assert_eq!(back.endpoints.routing_url, cfg.endpoints.routing_url);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let back: Config = toml::from_str("[plan]\nstart_time = \"08:30\"\n").unwrap();
        assert_eq!(back.plan.start_time, "08:30");
        assert_eq!(back.plan.visit_duration_minutes, 60);
    }

    #[test]
    fn test_parse_minutes_rejects_garbage() {
        assert!(parse_minutes("k", "abc").is_err());
        assert!(parse_minutes("k", "0").is_err());
        assert!(parse_minutes("k", "-5").is_err());
        assert_eq!(parse_minutes("k", "45").unwrap(), 45);
    }
}
