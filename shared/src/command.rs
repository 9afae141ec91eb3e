//! Command parsing and dispatch errors
//!
//! Maps a command name plus its integer arguments onto a typed [`Command`].
//! Unknown names and known names with the wrong number of arguments both fail
//! with an error that renders as the same invalid-command reply.

use crate::state::Position;
use thiserror::Error;

/// A validated drone command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `S`
    Start,
    /// `R`
    Restart,
    /// `D`
    Shutdown,
    /// `T`
    ToggleLights,
    /// `F`
    FlashLights,
    /// `H`
    GoHome,
    /// `A seconds`
    AlertHorn { seconds: i32 },
    /// `B maxX maxY`
    SetBoundary { max: Position },
    /// `P x y`
    SetInitialPosition { position: Position },
    /// `M seconds degrees`
    Move { seconds: i32, degrees: i32 },
}

/// Why a command was not executed
///
/// `Display` yields the exact reply shown to the operator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Please set boundary before attempting any action commands.")]
    PreconditionNotMet { command: &'static str },

    #[error("Invalid command.")]
    UnknownCommand { name: String },

    #[error("Invalid command.")]
    WrongArity {
        command: &'static str,
        expected: usize,
        got: usize,
    },
}

impl DispatchError {
    /// True for both unknown names and wrong argument counts
    pub fn is_unrecognized(&self) -> bool {
        matches!(
            self,
            DispatchError::UnknownCommand { .. } | DispatchError::WrongArity { .. }
        )
    }
}

impl Command {
    /// Build a command from its name and arguments. Names are case-sensitive.
    pub fn parse(name: &str, args: &[i32]) -> Result<Self, DispatchError> {
        let command = match (name, args) {
            ("S", []) => Command::Start,
            ("R", []) => Command::Restart,
            ("D", []) => Command::Shutdown,
            ("T", []) => Command::ToggleLights,
            ("F", []) => Command::FlashLights,
            ("H", []) => Command::GoHome,
            ("A", &[seconds]) => Command::AlertHorn { seconds },
            ("B", &[x, y]) => Command::SetBoundary {
                max: Position::new(x, y),
            },
            ("P", &[x, y]) => Command::SetInitialPosition {
                position: Position::new(x, y),
            },
            ("M", &[seconds, degrees]) => Command::Move { seconds, degrees },
            _ => return Err(rejection(name, args.len())),
        };

        Ok(command)
    }

    /// Single-letter name of the command
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "S",
            Command::Restart => "R",
            Command::Shutdown => "D",
            Command::ToggleLights => "T",
            Command::FlashLights => "F",
            Command::GoHome => "H",
            Command::AlertHorn { .. } => "A",
            Command::SetBoundary { .. } => "B",
            Command::SetInitialPosition { .. } => "P",
            Command::Move { .. } => "M",
        }
    }

    /// Action commands only run once a boundary is configured
    pub fn requires_boundary(&self) -> bool {
        matches!(
            self,
            Command::ToggleLights
                | Command::FlashLights
                | Command::GoHome
                | Command::AlertHorn { .. }
                | Command::Move { .. }
        )
    }
}

/// Classify a name/argument combination that matched no command
fn rejection(name: &str, got: usize) -> DispatchError {
    let (command, expected) = match name {
        "S" => ("S", 0),
        "R" => ("R", 0),
        "D" => ("D", 0),
        "T" => ("T", 0),
        "F" => ("F", 0),
        "H" => ("H", 0),
        "A" => ("A", 1),
        "B" => ("B", 2),
        "P" => ("P", 2),
        "M" => ("M", 2),
        _ => {
            return DispatchError::UnknownCommand {
                name: name.to_string(),
            }
        }
    };

    DispatchError::WrongArity {
        command,
        expected,
        got,
    }
}
