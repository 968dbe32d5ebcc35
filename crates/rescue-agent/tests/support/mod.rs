#![allow(dead_code)]

use std::collections::BTreeSet;

use rescue_core::{
    Bearing, Cell, Challenge, Direction, GridBounds, MazeEnv, Observation, RescueError, Result,
    StepResponse,
};

/// In-memory maze with hidden walls. Stepping onto an uncollected goal raises a challenge;
/// answering it collects every goal on that cell.
pub struct ToyMaze {
    bounds: GridBounds,
    walls: BTreeSet<(Cell, Cell)>,
    goals: Vec<Cell>,
    collected: Vec<bool>,
    start: Cell,
    position: Cell,
    pub moves: usize,
    pub answers: Vec<String>,
    pub finished: bool,
}

impl ToyMaze {
    pub fn new(width: u32, height: u32, goals: Vec<Cell>) -> Self {
        let collected = vec![false; goals.len()];
        Self {
            bounds: GridBounds::new(width, height),
            walls: BTreeSet::new(),
            goals,
            collected,
            start: Cell::new(0, 0),
            position: Cell::new(0, 0),
            moves: 0,
            answers: Vec::new(),
            finished: false,
        }
    }

    pub fn with_wall(mut self, a: Cell, b: Cell) -> Self {
        self.walls.insert((a, b));
        self.walls.insert((b, a));
        self
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn all_collected(&self) -> bool {
        self.collected.iter().all(|c| *c)
    }

    pub fn observation(&self) -> Observation {
        let mut distances = Vec::with_capacity(self.goals.len());
        let mut bearings = Vec::with_capacity(self.goals.len());
        for (goal, collected) in self.goals.iter().zip(&self.collected) {
            if *collected {
                distances.push(-1);
                bearings.push(Bearing::new(0, 0));
                continue;
            }
            let dx = goal.x - self.position.x;
            let dy = goal.y - self.position.y;
            distances.push(dx.abs() + dy.abs());
            bearings.push(Bearing::new(dx.signum(), dy.signum()));
        }
        Observation::new(self.position, distances, bearings)
    }
}

impl MazeEnv for ToyMaze {
    fn reset(&mut self) -> Result<Observation> {
        self.position = self.start;
        Ok(self.observation())
    }

    fn step(&mut self, direction: Direction) -> Result<StepResponse> {
        if self.finished {
            return Err(RescueError::Environment("episode already finished".into()));
        }
        self.moves += 1;
        let next = direction.apply(self.position);
        if self.bounds.contains(next) && !self.walls.contains(&(self.position, next)) {
            self.position = next;
        }

        let response = StepResponse::new(self.observation());
        let pending = self
            .goals
            .iter()
            .zip(&self.collected)
            .any(|(goal, collected)| *goal == self.position && !collected);
        if pending {
            let payload = format!("{},{}", self.position.x, self.position.y);
            return Ok(response.with_challenge(Challenge {
                kind: "cipher".into(),
                payload,
            }));
        }
        Ok(response)
    }

    fn answer(&mut self, _challenge: &Challenge, answer: String) -> Result<Observation> {
        self.answers.push(answer);
        for (goal, collected) in self.goals.iter().zip(self.collected.iter_mut()) {
            if *goal == self.position {
                *collected = true;
            }
        }
        Ok(self.observation())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
