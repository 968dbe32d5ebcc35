use crate::Cell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One discrete move on the grid.
///
/// North decreases `y`, south increases it; east increases `x`, west decreases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Wire order; `index()` is the position in this array.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
        }
    }

    pub fn index(self) -> i32 {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    pub fn apply(self, cell: Cell) -> Cell {
        let (dx, dy) = self.delta();
        cell.offset(dx, dy)
    }

    /// Direction of a single orthogonal step from `from` to `to`, if they are adjacent.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|dir| dir.apply(from) == to)
    }
}

/// What the agent hands back to the environment each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AgentAction {
    Move(Direction),
    Terminate,
}

impl AgentAction {
    /// Wire index: the direction index for moves, `-1` for terminate.
    pub fn index(self) -> i32 {
        match self {
            AgentAction::Move(dir) => dir.index(),
            AgentAction::Terminate => -1,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            AgentAction::Move(dir) => Some(dir),
            AgentAction::Terminate => None,
        }
    }

    pub fn is_terminate(self) -> bool {
        matches!(self, AgentAction::Terminate)
    }
}
