//! Console configuration
//!
//! Defaults are used unless `DRONECTL_CONFIG` names a JSON file. Any field the
//! file leaves out keeps its default.

use anyhow::{Context, Result};
use dronectl_shared::DroneConfig;
use serde::Deserialize;
use std::path::Path;

/// Environment variable holding the config file path
pub const CONFIG_ENV: &str = "DRONECTL_CONFIG";

/// Configuration for the console binary
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Name used in log lines
    pub device_id: String,
    /// Printed before each input line
    pub prompt: String,
    /// Drone tuning
    pub drone: DroneConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            device_id: "drone-001".into(),
            prompt: "> ".into(),
            drone: DroneConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the file named by `DRONECTL_CONFIG`, or fall back to defaults
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dronectl_shared::Position;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_nested_drone_section() {
        let config = AppConfig::from_json(
            r#"{
                "device_id": "drone-042",
                "drone": { "speed_units_per_sec": 4, "boundary_min": { "x": -1, "y": -2 } }
            }"#,
        )
        .unwrap();

        assert_eq!(config.device_id, "drone-042");
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.drone.speed_units_per_sec, 4);
        assert_eq!(config.drone.boundary_min, Position::new(-1, -2));
        assert_eq!(config.drone.boundary_alert_repeats, 3);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(AppConfig::from_json("{ not json").is_err());
        assert!(AppConfig::from_json(r#"{ "drone": { "flash_count": -1 } }"#).is_err());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("dronectl-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "prompt": "drone> " }"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.prompt, "drone> ");
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = AppConfig::from_file(Path::new("/nonexistent/dronectl.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dronectl.json"));
    }
}
