//! Movement Engine
//!
//! Plans a move along one of the four cardinal headings. A move walks one grid
//! unit per step toward the boundary edge in that heading; the step budget is
//! the requested duration times the configured speed. The plan is computed in
//! one shot so the controller can suspend for the travel time and commit the
//! final position at once.

use crate::state::{Boundary, Position};
use std::fmt;
use std::time::Duration;

/// Cardinal heading of a move command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 0°, y toward max
    North,
    /// 90°, x toward max
    East,
    /// 180°, y toward min
    South,
    /// 270°, x toward min
    West,
}

impl Direction {
    /// Map a heading in degrees. Anything but 0, 90, 180 or 270 is `None`.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees {
            0 => Some(Direction::North),
            90 => Some(Direction::East),
            180 => Some(Direction::South),
            270 => Some(Direction::West),
            _ => None,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Direction::North => 0,
            Direction::East => 90,
            Direction::South => 180,
            Direction::West => 270,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::East => write!(f, "east"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
        }
    }
}

/// Outcome of planning a single move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    pub direction: Direction,
    pub from: Position,
    pub to: Position,
    /// Grid units walked
    pub steps: u64,
    /// The move ends on the boundary edge in its heading
    pub boundary_hit: bool,
}

/// Turns move commands into bounded plans
#[derive(Debug, Clone, Copy)]
pub struct MovementEngine {
    speed_units_per_sec: u32,
}

impl MovementEngine {
    /// Create an engine; a speed of zero is treated as one unit per second
    pub fn new(speed_units_per_sec: u32) -> Self {
        Self {
            speed_units_per_sec: speed_units_per_sec.max(1),
        }
    }

    pub fn speed(&self) -> u32 {
        self.speed_units_per_sec
    }

    /// Plan a move of `duration_secs` in `direction` starting at `from`.
    ///
    /// The start point is first pulled inside the boundary, so the resulting
    /// position always satisfies it. Negative durations walk zero steps.
    pub fn plan(
        &self,
        boundary: &Boundary,
        from: Position,
        duration_secs: i32,
        direction: Direction,
    ) -> MovePlan {
        let start = boundary.clamp(from);
        let upper = boundary.upper();
        let budget = u64::try_from(duration_secs).unwrap_or(0) * u64::from(self.speed_units_per_sec);

        let (coord, edge) = match direction {
            Direction::North => (start.y, upper.y),
            Direction::East => (start.x, upper.x),
            Direction::South => (start.y, boundary.min.y),
            Direction::West => (start.x, boundary.min.x),
        };

        let distance = (i64::from(edge) - i64::from(coord)).unsigned_abs();
        let steps = distance.min(budget);
        let boundary_hit = steps == distance;

        // Walking `steps` from `coord` toward `edge` stays between the two
        let reached = if boundary_hit {
            edge
        } else {
            let offset = steps as i64;
            let next = if edge > coord {
                i64::from(coord) + offset
            } else {
                i64::from(coord) - offset
            };
            i32::try_from(next).unwrap_or(edge)
        };

        let to = match direction {
            Direction::North | Direction::South => Position::new(start.x, reached),
            Direction::East | Direction::West => Position::new(reached, start.y),
        };

        MovePlan {
            direction,
            from,
            to,
            steps,
            boundary_hit,
        }
    }

    /// Wall-clock time needed to walk the plan
    pub fn travel_time(&self, plan: &MovePlan) -> Duration {
        Duration::from_millis(plan.steps.saturating_mul(1000) / u64::from(self.speed_units_per_sec))
    }
}

impl Default for MovementEngine {
    fn default() -> Self {
        Self::new(crate::defaults::SPEED_UNITS_PER_SEC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary(max_x: i32, max_y: i32) -> Boundary {
        Boundary::new(Position::ORIGIN, Position::new(max_x, max_y))
    }

    #[test]
    fn test_direction_from_degrees() {
        assert_eq!(Direction::from_degrees(0), Some(Direction::North));
        assert_eq!(Direction::from_degrees(90), Some(Direction::East));
        assert_eq!(Direction::from_degrees(180), Some(Direction::South));
        assert_eq!(Direction::from_degrees(270), Some(Direction::West));
        assert_eq!(Direction::from_degrees(45), None);
        assert_eq!(Direction::from_degrees(360), None);
        assert_eq!(Direction::West.degrees(), 270);
    }

    #[test]
    fn test_north_within_budget() {
        let engine = MovementEngine::new(1);
        let plan = engine.plan(&boundary(100, 100), Position::new(3, 4), 5, Direction::North);

        assert_eq!(plan.to, Position::new(3, 9));
        assert_eq!(plan.steps, 5);
        assert!(!plan.boundary_hit);
        assert_eq!(engine.travel_time(&plan), Duration::from_secs(5));
    }

    #[test]
    fn test_east_stops_at_edge() {
        let engine = MovementEngine::new(2);
        let plan = engine.plan(&boundary(10, 10), Position::new(7, 0), 30, Direction::East);

        assert_eq!(plan.to, Position::new(10, 0));
        assert_eq!(plan.steps, 3);
        assert!(plan.boundary_hit);
        assert_eq!(engine.travel_time(&plan), Duration::from_millis(1500));
    }

    #[test]
    fn test_south_and_west_head_for_min() {
        let engine = MovementEngine::new(1);
        let b = Boundary::new(Position::new(-2, -2), Position::new(10, 10));

        let south = engine.plan(&b, Position::new(5, 5), 3, Direction::South);
        assert_eq!(south.to, Position::new(5, 2));
        assert!(!south.boundary_hit);

        let west = engine.plan(&b, Position::new(5, 5), 20, Direction::West);
        assert_eq!(west.to, Position::new(-2, 5));
        assert!(west.boundary_hit);
    }

    #[test]
    fn test_already_on_edge_hits_immediately() {
        let engine = MovementEngine::default();
        let plan = engine.plan(&boundary(10, 10), Position::new(4, 10), 3, Direction::North);

        assert_eq!(plan.to, Position::new(4, 10));
        assert_eq!(plan.steps, 0);
        assert!(plan.boundary_hit);
        assert_eq!(engine.travel_time(&plan), Duration::ZERO);
    }

    #[test]
    fn test_zero_and_negative_duration_stay_put() {
        let engine = MovementEngine::default();
        for secs in [0, -4] {
            let plan = engine.plan(&boundary(10, 10), Position::new(2, 2), secs, Direction::East);
            assert_eq!(plan.to, Position::new(2, 2));
            assert_eq!(plan.steps, 0);
            assert!(!plan.boundary_hit);
        }
    }

    #[test]
    fn test_start_outside_boundary_is_pulled_in() {
        let engine = MovementEngine::default();
        // Boundary shrank after the drone moved
        let plan = engine.plan(&boundary(5, 5), Position::new(9, 9), 1, Direction::South);

        assert_eq!(plan.from, Position::new(9, 9));
        assert_eq!(plan.to, Position::new(5, 4));
        assert!(boundary(5, 5).contains(plan.to));
    }

    #[test]
    fn test_zero_speed_treated_as_one() {
        assert_eq!(MovementEngine::new(0).speed(), 1);
    }
}
