use std::collections::BTreeSet;

use rescue_core::{Bearing, Cell, GridBounds, MazeConfig};

/// In-grid cells consistent with a single distance/bearing reading taken at `position`.
///
/// An axis-aligned bearing pins the goal exactly. A diagonal bearing only fixes the quadrant,
/// so every split of `distance` with both offsets non-zero is returned. A distance no cell of
/// `bounds` can be at yields nothing.
pub fn reading_cells(
    bounds: GridBounds,
    position: Cell,
    distance: i32,
    bearing: Bearing,
) -> Vec<Cell> {
    if distance < 0 || i64::from(distance) > i64::from(bounds.max_manhattan()) {
        return Vec::new();
    }
    if bearing.is_axis_aligned() {
        let cell = position.offset(
            bearing.x.saturating_mul(distance),
            bearing.y.saturating_mul(distance),
        );
        return if bounds.contains(cell) { vec![cell] } else { Vec::new() };
    }
    (1..distance)
        .map(|k| {
            position.offset(
                bearing.x.saturating_mul(k),
                bearing.y.saturating_mul(distance - k),
            )
        })
        .filter(|cell| bounds.contains(*cell))
        .collect()
}

/// Goals whose status changed during one [`GoalLocator::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorUpdate {
    pub collected: Vec<usize>,
    /// Goals still available whose candidate set just became empty.
    pub exhausted: Vec<usize>,
}

/// Per-goal candidate cells narrowed down by every reading so far.
#[derive(Debug, Clone)]
pub struct GoalLocator {
    bounds: GridBounds,
    not_found_distance: i32,
    available: Vec<bool>,
    candidates: Vec<BTreeSet<Cell>>,
}

impl GoalLocator {
    /// Every in-bounds cell starts as a candidate for every goal.
    pub fn new(bounds: GridBounds, goal_count: usize, not_found_distance: i32) -> Self {
        let all: BTreeSet<Cell> = bounds.cells().collect();
        Self {
            bounds,
            not_found_distance,
            available: vec![true; goal_count],
            candidates: vec![all; goal_count],
        }
    }

    pub fn from_config(config: &MazeConfig) -> Self {
        Self::new(config.bounds(), config.goal_count, config.not_found_distance)
    }

    pub fn goal_count(&self) -> usize {
        self.available.len()
    }

    pub fn is_available(&self, goal: usize) -> bool {
        self.available.get(goal).copied().unwrap_or(false)
    }

    pub fn all_collected(&self) -> bool {
        self.available.iter().all(|available| !available)
    }

    /// Available, but no cell agrees with every reading.
    pub fn exhausted(&self, goal: usize) -> bool {
        self.is_available(goal) && self.candidates[goal].is_empty()
    }

    /// Read-only view of the candidate cells of `goal`; empty once collected.
    pub fn candidates(&self, goal: usize) -> Option<&BTreeSet<Cell>> {
        self.candidates.get(goal)
    }

    pub fn candidate_sets(&self) -> &[BTreeSet<Cell>] {
        &self.candidates
    }

    /// Fold one observation into the estimates. Slices are expected to hold one entry per goal.
    pub fn update(
        &mut self,
        position: Cell,
        distances: &[i32],
        bearings: &[Bearing],
    ) -> LocatorUpdate {
        let mut update = LocatorUpdate::default();
        let readings = distances.iter().zip(bearings).enumerate();
        for (goal, (&distance, &bearing)) in readings.take(self.goal_count()) {
            if !self.available[goal] {
                continue;
            }
            if distance == self.not_found_distance {
                self.available[goal] = false;
                self.candidates[goal].clear();
                update.collected.push(goal);
                continue;
            }

            let was_empty = self.candidates[goal].is_empty();
            let consistent: BTreeSet<Cell> =
                reading_cells(self.bounds, position, distance, bearing).into_iter().collect();
            self.candidates[goal].retain(|cell| consistent.contains(cell));

            if self.candidates[goal].is_empty() && !was_empty {
                tracing::warn!(
                    goal,
                    position = %position,
                    distance,
                    "readings are contradictory, no candidate cell left"
                );
                update.exhausted.push(goal);
            }
        }
        update
    }
}
