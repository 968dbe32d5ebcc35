//! Maze and search parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Cell, GridBounds, RescueError, Result};

/// Upper bound on goals; the route planner enumerates every visiting order.
pub const MAX_GOALS: usize = 8;

/// Tuning for the uncertainty-aware path search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Cost per step since the last branch point, charged when entering a node over an
    /// unconfirmed edge.
    pub unconfirmed_penalty: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            unconfirmed_penalty: 0.9,
        }
    }
}

/// Fixed configuration of one maze episode.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MazeConfig {
    pub width: u32,
    pub height: u32,
    pub goal_count: usize,
    pub start: Cell,
    pub exit: Cell,
    /// Distance reading meaning "goal already collected".
    pub not_found_distance: i32,
    pub search: SearchConfig,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            goal_count: 4,
            start: Cell::new(0, 0),
            exit: Cell::new(9, 9),
            not_found_distance: -1,
            search: SearchConfig::default(),
        }
    }
}

impl MazeConfig {
    /// Square-agnostic constructor; the exit defaults to the bottom-right corner.
    pub fn new(width: u32, height: u32, goal_count: usize) -> Self {
        Self {
            width,
            height,
            goal_count,
            exit: Cell::new(width as i32 - 1, height as i32 - 1),
            ..Self::default()
        }
    }

    pub fn with_start(mut self, start: Cell) -> Self {
        self.start = start;
        self
    }

    pub fn with_exit(mut self, exit: Cell) -> Self {
        self.exit = exit;
        self
    }

    pub fn with_not_found_distance(mut self, sentinel: i32) -> Self {
        self.not_found_distance = sentinel;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.width, self.height)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RescueError::InvalidConfig(format!(
                "grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(RescueError::InvalidConfig(
                "grid dimensions must fit in i32".to_string(),
            ));
        }
        if self.goal_count == 0 || self.goal_count > MAX_GOALS {
            return Err(RescueError::InvalidConfig(format!(
                "goal_count must be in 1..={MAX_GOALS}, got {}",
                self.goal_count
            )));
        }
        let bounds = self.bounds();
        for (name, cell) in [("start", self.start), ("exit", self.exit)] {
            if !bounds.contains(cell) {
                return Err(RescueError::InvalidConfig(format!(
                    "{name} {cell} is outside the {}x{} grid",
                    self.width, self.height
                )));
            }
        }
        if self.not_found_distance >= 0 {
            return Err(RescueError::InvalidConfig(format!(
                "not_found_distance must be negative, got {}",
                self.not_found_distance
            )));
        }
        let penalty = self.search.unconfirmed_penalty;
        if !penalty.is_finite() || penalty < 0.0 {
            return Err(RescueError::InvalidConfig(format!(
                "unconfirmed_penalty must be finite and >= 0, got {penalty}"
            )));
        }
        Ok(())
    }

    /// Parse and validate a YAML document. Missing keys fall back to defaults.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: MazeConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}
