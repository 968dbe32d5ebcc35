use crate::{Direction, Observation, Result};

/// A riddle the environment wants answered before a goal collection counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub kind: String,
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResponse {
    pub observation: Observation,
    pub challenge: Option<Challenge>,
}

impl StepResponse {
    pub fn new(observation: Observation) -> Self {
        Self {
            observation,
            challenge: None,
        }
    }

    pub fn with_challenge(mut self, challenge: Challenge) -> Self {
        self.challenge = Some(challenge);
        self
    }
}

/// The maze simulator or remote game server.
///
/// The agent never sees the maze itself, only the observations returned here. Transport and
/// framing are the implementor's concern.
pub trait MazeEnv {
    fn reset(&mut self) -> Result<Observation>;

    fn step(&mut self, direction: Direction) -> Result<StepResponse>;

    /// Answer the challenge raised by the previous step.
    fn answer(&mut self, challenge: &Challenge, answer: String) -> Result<Observation>;

    /// Called once after the agent terminates.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Opaque riddle solver: challenge kind and payload in, answer out.
pub trait RiddleSolver {
    fn solve(&mut self, kind: &str, payload: &str) -> String;
}

impl<F> RiddleSolver for F
where
    F: FnMut(&str, &str) -> String,
{
    fn solve(&mut self, kind: &str, payload: &str) -> String {
        self(kind, payload)
    }
}
