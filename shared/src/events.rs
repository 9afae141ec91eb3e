//! Drone events
//!
//! Side effects the controller reports to whoever holds the receiver: every
//! feature toggle (so alert pulses are observable), completed moves, boundary
//! strikes and the background horn shut-off.

use crate::movement::Direction;
use crate::state::{Feature, Position};
use tokio::sync::mpsc;

/// Events emitted by a [`DroneController`](crate::DroneController)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DroneEvent {
    /// A feature flipped; `on` is its new value
    FeatureToggled { feature: Feature, on: bool },
    /// The horn was switched on for a timed alert
    HornSounding { seconds: u64 },
    /// The horn-off timer fired
    HornSilenced,
    /// A move finished
    Moved { from: Position, to: Position },
    /// A move ended on the boundary edge
    BoundaryReached {
        direction: Direction,
        position: Position,
    },
}

/// Receiving half handed out by [`DroneController::new`](crate::DroneController::new)
pub type DroneEventReceiver = mpsc::UnboundedReceiver<DroneEvent>;

/// Sending half kept by the controller and its horn timer
pub type DroneEventSender = mpsc::UnboundedSender<DroneEvent>;

/// Publish an event; a dropped receiver is not an error for the drone
pub(crate) fn emit(tx: &DroneEventSender, event: DroneEvent) {
    let _ = tx.send(event);
}
