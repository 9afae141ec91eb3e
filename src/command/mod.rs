//! Console command handling
//!
//! This module handles:
//! - Splitting raw operator input into a command name and arguments
//! - Forwarding commands to the drone and classifying the reply

mod executor;
mod parser;

pub use executor::CommandExecutor;
pub use parser::{parse_line, ConsoleInput};
