//! Command executor - forwards console commands to the drone and classifies replies

use dronectl_shared::{CommandHandler, DispatchError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command accepted and completed
    Completed { message: String },
    /// Command refused (boundary not set, unknown name, wrong argument count)
    Rejected { message: String },
}

impl CommandResult {
    /// Reply text to show the operator
    pub fn message(&self) -> &str {
        match self {
            CommandResult::Completed { message } | CommandResult::Rejected { message } => message,
        }
    }
}

/// Executes operator commands against a drone
pub struct CommandExecutor<H> {
    device_id: String,
    handler: Arc<H>,
    executed: AtomicU64,
    rejected: AtomicU64,
}

impl<H: CommandHandler> CommandExecutor<H> {
    /// Create a new command executor
    pub fn new(device_id: impl Into<String>, handler: Arc<H>) -> Self {
        Self {
            device_id: device_id.into(),
            handler,
            executed: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    /// Execute a command and return the classified reply
    pub async fn execute(&self, name: &str, args: &[i32]) -> CommandResult {
        let seq = self.executed.fetch_add(1, Ordering::SeqCst) + 1;
        info!("[{}] #{} Executing {} {:?}", self.device_id, seq, name, args);

        match self.handler.handle(name, args).await {
            Ok(message) => {
                info!("  Command completed: {}", message);
                CommandResult::Completed { message }
            }
            Err(e) => {
                self.rejected.fetch_add(1, Ordering::SeqCst);
                match &e {
                    DispatchError::PreconditionNotMet { command } => {
                        warn!("  Command {} rejected: boundary not set", command)
                    }
                    DispatchError::UnknownCommand { name } => {
                        warn!("  Command rejected: unknown name {:?}", name)
                    }
                    DispatchError::WrongArity {
                        command,
                        expected,
                        got,
                    } => warn!(
                        "  Command {} rejected: expected {} args, got {}",
                        command, expected, got
                    ),
                }
                CommandResult::Rejected {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Commands executed so far, accepted or not
    pub fn executed_count(&self) -> u64 {
        self.executed.load(Ordering::SeqCst)
    }

    pub fn rejected_count(&self) -> u64 {
        self.rejected.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dronectl_shared::{DroneConfig, DroneController};
    use std::sync::Mutex;

    /// Records calls and refuses anything named `X`
    #[derive(Default)]
    struct RecordingHandler {
        calls: Mutex<Vec<(String, Vec<i32>)>>,
    }

    #[async_trait]
    impl CommandHandler for RecordingHandler {
        async fn handle(&self, command: &str, args: &[i32]) -> Result<String, DispatchError> {
            self.calls
                .lock()
                .unwrap()
                .push((command.to_string(), args.to_vec()));
            if command == "X" {
                return Err(DispatchError::UnknownCommand {
                    name: command.to_string(),
                });
            }
            Ok(format!("ok {}", command))
        }
    }

    #[tokio::test]
    async fn test_forwards_name_and_args() {
        let handler = Arc::new(RecordingHandler::default());
        let executor = CommandExecutor::new("test", handler.clone());

        let result = executor.execute("M", &[3, 90]).await;

        assert_eq!(
            result,
            CommandResult::Completed {
                message: "ok M".into()
            }
        );
        assert_eq!(
            *handler.calls.lock().unwrap(),
            vec![("M".to_string(), vec![3, 90])]
        );
    }

    #[tokio::test]
    async fn test_counts_rejections() {
        let executor = CommandExecutor::new("test", Arc::new(RecordingHandler::default()));

        executor.execute("S", &[]).await;
        let result = executor.execute("X", &[]).await;

        assert_eq!(result.message(), "Invalid command.");
        assert!(matches!(result, CommandResult::Rejected { .. }));
        assert_eq!(executor.executed_count(), 2);
        assert_eq!(executor.rejected_count(), 1);
    }

    #[tokio::test]
    async fn test_against_real_drone() {
        let (drone, _events) = DroneController::new(DroneConfig::default());
        let executor = CommandExecutor::new("drone-001", Arc::new(drone));

        let refused = executor.execute("T", &[]).await;
        assert_eq!(
            refused,
            CommandResult::Rejected {
                message: "Please set boundary before attempting any action commands.".into()
            }
        );

        executor.execute("B", &[100, 100]).await;
        let toggled = executor.execute("T", &[]).await;
        assert_eq!(
            toggled,
            CommandResult::Completed {
                message: "Lights toggled.".into()
            }
        );
        assert_eq!(executor.rejected_count(), 1);
    }
}
