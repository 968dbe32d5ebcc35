#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Cell, MazeConfig, RescueError, Result};

/// Coarse direction hint towards a goal; each component is in `{-1, 0, 1}`.
///
/// A zero component means the goal lies exactly on the other axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bearing {
    pub x: i32,
    pub y: i32,
}

impl Bearing {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_valid(&self) -> bool {
        (-1..=1).contains(&self.x) && (-1..=1).contains(&self.y)
    }

    /// True when at least one component is zero, so the offset is fully determined.
    pub fn is_axis_aligned(&self) -> bool {
        self.x == 0 || self.y == 0
    }
}

impl From<(i32, i32)> for Bearing {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// What the environment reports after every move.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    pub position: Cell,
    /// Manhattan distance per goal, or the configured sentinel once collected.
    pub distances: Vec<i32>,
    pub bearings: Vec<Bearing>,
}

impl Observation {
    pub fn new(position: Cell, distances: Vec<i32>, bearings: Vec<Bearing>) -> Self {
        Self {
            position,
            distances,
            bearings,
        }
    }

    /// Whether goal `goal` is reported as already collected.
    pub fn is_collected(&self, goal: usize, config: &MazeConfig) -> bool {
        self.distances.get(goal).copied() == Some(config.not_found_distance)
    }

    /// Check the collaborator contract; nothing downstream is touched on failure.
    pub fn validate(&self, config: &MazeConfig) -> Result<()> {
        if self.distances.len() != config.goal_count {
            return Err(RescueError::MalformedObservation(format!(
                "expected {} distances, got {}",
                config.goal_count,
                self.distances.len()
            )));
        }
        if self.bearings.len() != config.goal_count {
            return Err(RescueError::MalformedObservation(format!(
                "expected {} bearings, got {}",
                config.goal_count,
                self.bearings.len()
            )));
        }
        if !config.bounds().contains(self.position) {
            return Err(RescueError::MalformedObservation(format!(
                "position {} is outside the {}x{} grid",
                self.position, config.width, config.height
            )));
        }
        for (goal, (&distance, bearing)) in self.distances.iter().zip(&self.bearings).enumerate() {
            if distance < 0 && distance != config.not_found_distance {
                return Err(RescueError::MalformedObservation(format!(
                    "goal {goal} has negative distance {distance}"
                )));
            }
            if i64::from(distance) > i64::from(config.bounds().max_manhattan()) {
                return Err(RescueError::MalformedObservation(format!(
                    "goal {goal} distance {distance} exceeds the {}x{} grid",
                    config.width, config.height
                )));
            }
            if !bearing.is_valid() {
                return Err(RescueError::MalformedObservation(format!(
                    "goal {goal} has bearing ({}, {}) outside {{-1, 0, 1}}",
                    bearing.x, bearing.y
                )));
            }
        }
        Ok(())
    }
}
