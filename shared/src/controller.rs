//! Drone Controller
//!
//! Owns the drone state and executes commands against it:
//! - Parsing the raw name/arguments into a [`Command`]
//! - Gating action commands behind a configured boundary
//! - Feature toggles, bounded moves and the timed horn
//!
//! Commands on one controller are serialised. A move suspends its caller for
//! the travel time and commits the final position in one write, so a snapshot
//! taken mid-move still shows where the drone started.

use crate::command::{Command, DispatchError};
use crate::config::DroneConfig;
use crate::events::{emit, DroneEvent, DroneEventReceiver, DroneEventSender};
use crate::horn::HornTimer;
use crate::messages;
use crate::movement::{Direction, MovementEngine};
use crate::state::{DroneState, Feature, Position};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex, RwLock};
use tracing::{debug, info, warn};

/// Anything that executes drone commands given as a name plus integer arguments
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Execute the command, returning the reply text or the reason it was refused
    async fn handle(&self, command: &str, args: &[i32]) -> Result<String, DispatchError>;
}

/// Command-driven controller for a single drone
pub struct DroneController {
    config: DroneConfig,
    engine: MovementEngine,
    state: Arc<RwLock<DroneState>>,
    horn_timer: Mutex<HornTimer>,
    /// Held for the whole of each command
    command_lock: Mutex<()>,
    event_tx: DroneEventSender,
}

impl DroneController {
    /// Create a controller with power-on defaults and the receiver for its events
    pub fn new(config: DroneConfig) -> (Self, DroneEventReceiver) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let controller = Self {
            engine: MovementEngine::new(config.speed_units_per_sec),
            state: Arc::new(RwLock::new(DroneState::new(config.boundary_min))),
            horn_timer: Mutex::new(HornTimer::new()),
            command_lock: Mutex::new(()),
            event_tx,
            config,
        };

        (controller, event_rx)
    }

    pub fn config(&self) -> &DroneConfig {
        &self.config
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> DroneState {
        self.state.read().await.clone()
    }

    /// Execute a command and return the operator-facing reply.
    ///
    /// Refusals come back as their reply text; nothing is raised.
    pub async fn dispatch(&self, command: &str, args: &[i32]) -> String {
        match self.try_dispatch(command, args).await {
            Ok(reply) => reply,
            Err(e) => e.to_string(),
        }
    }

    /// Execute a command, keeping refusals typed
    pub async fn try_dispatch(&self, command: &str, args: &[i32]) -> Result<String, DispatchError> {
        let command = Command::parse(command, args).map_err(|e| {
            warn!("[DRONE] Rejected {:?} {:?}: {:?}", command, args, e);
            e
        })?;
        self.execute(command).await
    }

    /// Execute an already parsed command
    pub async fn execute(&self, command: Command) -> Result<String, DispatchError> {
        let _guard = self.command_lock.lock().await;

        if command.requires_boundary() && !self.state.read().await.is_boundary_configured() {
            debug!("[DRONE] {} refused, boundary not set", command.name());
            return Err(DispatchError::PreconditionNotMet {
                command: command.name(),
            });
        }

        debug!("[DRONE] Executing {:?}", command);

        let reply = match command {
            Command::Start => {
                self.state.write().await.set_active(true);
                info!("[DRONE] Started");
                messages::DRONE_STARTED.to_string()
            }
            Command::Restart => {
                self.restart().await;
                messages::drone_restarted()
            }
            Command::Shutdown => {
                self.state.write().await.set_active(false);
                info!("[DRONE] Shut down");
                messages::DRONE_SHUT_DOWN.to_string()
            }
            Command::ToggleLights => {
                let mut state = self.state.write().await;
                self.toggle_feature(&mut state, Feature::Lights);
                messages::LIGHTS_TOGGLED.to_string()
            }
            Command::FlashLights => {
                let mut state = self.state.write().await;
                self.flash_lights(&mut state, self.config.flash_count);
                messages::LIGHTS_FLASHED.to_string()
            }
            Command::GoHome => {
                self.navigate_home().await;
                messages::GOING_HOME.to_string()
            }
            Command::AlertHorn { seconds } => {
                self.alert_horn_for(seconds).await;
                messages::horn_sounded(seconds)
            }
            Command::SetBoundary { max } => {
                self.state.write().await.set_boundary_max(max);
                info!("[DRONE] Boundary max set to {}", max);
                messages::boundary_set(max.x, max.y)
            }
            Command::SetInitialPosition { position } => {
                self.state.write().await.set_initial_position(position);
                info!("[DRONE] Initial position set to {}", position);
                messages::initial_position_set(position.x, position.y)
            }
            Command::Move { seconds, degrees } => {
                self.travel(seconds, degrees).await;
                messages::MOVE_COMPLETED.to_string()
            }
        };

        Ok(reply)
    }

    /// Flip a feature and publish the change
    fn toggle_feature(&self, state: &mut DroneState, feature: Feature) {
        let on = state.toggle(feature);
        debug!("[DRONE] {} -> {}", feature, if on { "on" } else { "off" });
        emit(&self.event_tx, DroneEvent::FeatureToggled { feature, on });
    }

    /// One flash is an on and an off, so the light ends where it started
    fn flash_lights(&self, state: &mut DroneState, times: u32) {
        for _ in 0..times.saturating_mul(2) {
            self.toggle_feature(state, Feature::Lights);
        }
    }

    /// Sound `beeps` distinct horn pulses
    fn sound_horn(&self, state: &mut DroneState, beeps: u32) {
        for _ in 0..beeps.saturating_mul(2) {
            self.toggle_feature(state, Feature::Horn);
        }
    }

    /// Horn on now, off after `seconds` without blocking the caller
    async fn alert_horn_for(&self, seconds: i32) {
        let secs = u64::try_from(seconds).unwrap_or(0);
        let mut timer = self.horn_timer.lock().await;

        // The new shut-off cannot run before the horn is on
        let mut state = self.state.write().await;
        timer.arm(
            Duration::from_secs(secs),
            self.state.clone(),
            self.event_tx.clone(),
        );
        state.set_horn(true);
        drop(state);

        info!("[HORN] Sounding for {}s", secs);
        emit(&self.event_tx, DroneEvent::HornSounding { seconds: secs });
    }

    /// Back to power-on defaults, then active
    async fn restart(&self) {
        self.horn_timer.lock().await.cancel();

        let mut state = self.state.write().await;
        state.reset();
        state.set_active(true);
        info!("[DRONE] Restarted, boundary cleared");
    }

    async fn navigate_home(&self) {
        let mut state = self.state.write().await;
        let from = state.current_position();
        let home = state.initial_position();
        let to = state.move_to(home);
        info!("[MOVE] Going home: ({}) -> ({})", from, to);
        emit(&self.event_tx, DroneEvent::Moved { from, to });
    }

    /// Walk toward the boundary for `seconds` on heading `degrees`.
    ///
    /// Ends early when the edge is reached. Unknown headings are a no-op.
    async fn travel(&self, seconds: i32, degrees: i32) -> Position {
        let Some(direction) = Direction::from_degrees(degrees) else {
            debug!("[MOVE] Ignoring unrecognised heading {}", degrees);
            return self.state.read().await.current_position();
        };

        let plan = {
            let state = self.state.read().await;
            self.engine
                .plan(&state.boundary(), state.current_position(), seconds, direction)
        };
        let travel_time = self.engine.travel_time(&plan);

        info!(
            "[MOVE] Heading {} for {}s: ({}) -> ({}) over {:?}",
            direction, seconds, plan.from, plan.to, travel_time
        );
        if !travel_time.is_zero() {
            tokio::time::sleep(travel_time).await;
        }

        let mut state = self.state.write().await;
        let to = state.move_to(plan.to);
        state.resume();
        emit(&self.event_tx, DroneEvent::Moved { from: plan.from, to });

        if plan.boundary_hit {
            state.halt();
            warn!("[MOVE] Boundary reached heading {} at ({})", direction, to);
            emit(&self.event_tx, DroneEvent::BoundaryReached { direction, position: to });
            self.sound_horn(&mut state, self.config.boundary_alert_repeats);
        }

        to
    }
}

#[async_trait]
impl CommandHandler for DroneController {
    async fn handle(&self, command: &str, args: &[i32]) -> Result<String, DispatchError> {
        self.try_dispatch(command, args).await
    }
}
