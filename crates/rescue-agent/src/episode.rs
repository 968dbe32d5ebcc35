use rescue_core::{MazeEnv, Result, RiddleSolver};

use crate::AgentController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeReport {
    /// Observations the controller consumed, including the terminating one.
    pub steps: u64,
    pub terminated: bool,
    pub challenges_answered: usize,
}

/// Drive `controller` against `env` until it terminates or `max_steps` observations pass.
///
/// Challenges raised by the environment are answered through `solver` before the next
/// observation reaches the controller. Running out of steps is reported, not an error.
pub fn run_episode<E, S>(
    env: &mut E,
    solver: &mut S,
    controller: &mut AgentController,
    max_steps: u64,
) -> Result<EpisodeReport>
where
    E: MazeEnv + ?Sized,
    S: RiddleSolver + ?Sized,
{
    let mut observation = env.reset()?;
    let mut challenges_answered = 0;

    for _ in 0..max_steps {
        let action = controller.step(&observation)?;
        let Some(direction) = action.direction() else {
            env.finish()?;
            return Ok(EpisodeReport {
                steps: controller.steps(),
                terminated: true,
                challenges_answered,
            });
        };

        let response = env.step(direction)?;
        observation = response.observation;
        if let Some(challenge) = response.challenge {
            let answer = solver.solve(&challenge.kind, &challenge.payload);
            tracing::debug!(kind = %challenge.kind, "answering challenge");
            observation = env.answer(&challenge, answer)?;
            challenges_answered += 1;
        }
    }

    tracing::warn!(max_steps, "step budget exhausted before the agent terminated");
    Ok(EpisodeReport {
        steps: controller.steps(),
        terminated: false,
        challenges_answered,
    })
}
