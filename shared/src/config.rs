//! Drone tuning parameters
//!
//! Every field has a default, so a partial (or empty) config document is valid.

use crate::defaults;
use crate::state::Position;
use serde::{Deserialize, Serialize};

/// Configuration for a single [`DroneController`](crate::DroneController)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneConfig {
    /// Lower boundary corner; the `B` command only sets the upper one
    pub boundary_min: Position,
    /// Grid units covered per second of a move (0 is treated as 1)
    pub speed_units_per_sec: u32,
    /// Beeps sounded when a move strikes the boundary
    pub boundary_alert_repeats: u32,
    /// Flashes performed by the `F` command
    pub flash_count: u32,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            boundary_min: Position::ORIGIN,
            speed_units_per_sec: defaults::SPEED_UNITS_PER_SEC,
            boundary_alert_repeats: defaults::BOUNDARY_ALERT_REPEATS,
            flash_count: defaults::FLASH_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DroneConfig::default();
        assert_eq!(config.boundary_min, Position::ORIGIN);
        assert_eq!(config.speed_units_per_sec, 1);
        assert_eq!(config.boundary_alert_repeats, 3);
        assert_eq!(config.flash_count, 1);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config: DroneConfig =
            serde_json::from_str(r#"{ "boundary_min": { "x": -10, "y": -5 } }"#).unwrap();
        assert_eq!(config.boundary_min, Position::new(-10, -5));
        assert_eq!(config.speed_units_per_sec, 1);
        assert_eq!(config.boundary_alert_repeats, 3);
    }
}
