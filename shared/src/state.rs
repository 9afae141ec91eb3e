//! Drone State
//!
//! The single mutable record owned by a [`DroneController`](crate::DroneController).
//! Reads are public; every mutation goes through a crate-private method so the
//! boundary gate and the position invariant cannot be bypassed from outside.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the drone's grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

/// Features that can be flipped on and off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Active,
    Lights,
    Horn,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Active => write!(f, "active"),
            Feature::Lights => write!(f, "lights"),
            Feature::Horn => write!(f, "horn"),
        }
    }
}

/// Rectangular region the drone must stay inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub min: Position,
    pub max: Position,
}

impl Boundary {
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    /// Upper corner, never below `min` on either axis.
    ///
    /// A max set beneath the minimum collapses that axis onto the minimum.
    pub fn upper(&self) -> Position {
        Position::new(self.max.x.max(self.min.x), self.max.y.max(self.min.y))
    }

    pub fn contains(&self, p: Position) -> bool {
        let upper = self.upper();
        (self.min.x..=upper.x).contains(&p.x) && (self.min.y..=upper.y).contains(&p.y)
    }

    /// Nearest point inside the boundary
    pub fn clamp(&self, p: Position) -> Position {
        let upper = self.upper();
        Position::new(
            p.x.max(self.min.x).min(upper.x),
            p.y.max(self.min.y).min(upper.y),
        )
    }
}

/// Everything the controller knows about its drone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroneState {
    active: bool,
    initial_position: Position,
    current_position: Position,
    light_on: bool,
    horn_on: bool,
    boundary_configured: bool,
    boundary: Boundary,
    go: bool,
}

impl DroneState {
    /// Power-on defaults, with the given minimum boundary corner
    pub fn new(boundary_min: Position) -> Self {
        Self {
            active: false,
            initial_position: Position::ORIGIN,
            current_position: Position::ORIGIN,
            light_on: false,
            horn_on: false,
            boundary_configured: false,
            boundary: Boundary::new(boundary_min, Position::ORIGIN),
            go: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Home position, target of the go-home command
    pub fn initial_position(&self) -> Position {
        self.initial_position
    }

    pub fn current_position(&self) -> Position {
        self.current_position
    }

    pub fn is_light_on(&self) -> bool {
        self.light_on
    }

    pub fn is_horn_on(&self) -> bool {
        self.horn_on
    }

    pub fn is_boundary_configured(&self) -> bool {
        self.boundary_configured
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// False once the last move struck a boundary
    pub fn go(&self) -> bool {
        self.go
    }

    /// Flip a feature and return its new value
    pub(crate) fn toggle(&mut self, feature: Feature) -> bool {
        let flag = match feature {
            Feature::Active => &mut self.active,
            Feature::Lights => &mut self.light_on,
            Feature::Horn => &mut self.horn_on,
        };
        *flag = !*flag;
        *flag
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub(crate) fn set_horn(&mut self, on: bool) {
        self.horn_on = on;
    }

    pub(crate) fn set_initial_position(&mut self, position: Position) {
        self.initial_position = position;
    }

    /// Set the upper boundary corner, open the boundary gate and pull the drone inside
    pub(crate) fn set_boundary_max(&mut self, max: Position) {
        self.boundary.max = max;
        self.boundary_configured = true;
        // A shrinking boundary carries the drone with it
        self.current_position = self.boundary.clamp(self.current_position);
    }

    /// Relocate, clamped into the boundary. Returns where the drone ended up.
    pub(crate) fn move_to(&mut self, target: Position) -> Position {
        self.current_position = self.boundary.clamp(target);
        self.current_position
    }

    pub(crate) fn halt(&mut self) {
        self.go = false;
    }

    pub(crate) fn resume(&mut self) {
        self.go = true;
    }

    /// Back to power-on defaults; the configured minimum corner survives
    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.boundary.min);
    }
}

impl Default for DroneState {
    fn default() -> Self {
        Self::new(Position::ORIGIN)
    }
}
