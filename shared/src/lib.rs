//! dronectl shared core
//!
//! This crate provides the drone command controller: the owned drone state,
//! the boundary-gated command dispatcher, bounded movement and the timed horn.
//! Front ends (the console binary, tests) talk to it through
//! [`DroneController::dispatch`] or the [`CommandHandler`] trait.

pub mod command;
pub mod config;
pub mod controller;
pub mod events;
pub mod horn;
pub mod movement;
pub mod state;


// Re-export commonly used types at crate root
pub use command::{Command, DispatchError};
pub use config::DroneConfig;
pub use controller::{CommandHandler, DroneController};
pub use events::{DroneEvent, DroneEventReceiver};
pub use movement::{Direction, MovePlan, MovementEngine};
pub use state::{Boundary, DroneState, Feature, Position};

/// Reply strings returned to the operator
pub mod messages {
    /// Returned by every action command while no boundary is configured
    pub const BOUNDARY_REMINDER: &str =
        "Please set boundary before attempting any action commands.";

    /// Returned for unknown commands and known commands with the wrong argument count
    pub const INVALID_COMMAND: &str = "Invalid command.";

    pub const DRONE_STARTED: &str = "Drone Started.";
    pub const DRONE_SHUT_DOWN: &str = "Drone has been shut down.";
    pub const LIGHTS_TOGGLED: &str = "Lights toggled.";
    pub const LIGHTS_FLASHED: &str = "Lights flashed";
    pub const GOING_HOME: &str = "Going home.";
    pub const MOVE_COMPLETED: &str = "Move completed";

    /// Reply for a restart, which always carries the boundary reminder
    pub fn drone_restarted() -> String {
        format!("Drone restarted. {}", BOUNDARY_REMINDER)
    }

    pub fn horn_sounded(seconds: i32) -> String {
        format!("Horn sounded for {} seconds.", seconds)
    }

    pub fn boundary_set(x: i32, y: i32) -> String {
        format!("Max Boundary Co-ords set to: {}, {}", x, y)
    }

    pub fn initial_position_set(x: i32, y: i32) -> String {
        format!("Initial Position Set to: {}, {}", x, y)
    }
}

/// Default tuning for a freshly built controller
pub mod defaults {
    /// Grid units covered per second of a move command
    pub const SPEED_UNITS_PER_SEC: u32 = 1;

    /// Distinct horn beeps sounded when a boundary is struck
    pub const BOUNDARY_ALERT_REPEATS: u32 = 3;

    /// Flashes performed by the `F` command
    pub const FLASH_COUNT: u32 = 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_reply_carries_reminder() {
        assert_eq!(
            messages::drone_restarted(),
            "Drone restarted. Please set boundary before attempting any action commands."
        );
    }

    #[test]
    fn test_formatted_replies() {
        assert_eq!(messages::horn_sounded(5), "Horn sounded for 5 seconds.");
        assert_eq!(messages::boundary_set(100, 50), "Max Boundary Co-ords set to: 100, 50");
        assert_eq!(messages::initial_position_set(3, 4), "Initial Position Set to: 3, 4");
    }
}
