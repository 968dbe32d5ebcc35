use rescue_core::{AgentAction, Cell, Direction, MazeConfig, Observation, RescueError, Result};
use rescue_nav::WorldGraph;
use rescue_plan::{representatives, RoutePlanner};
use rescue_tools::{MindView, TraceEvent, TraceKind, TraceLog, Tracer};

use crate::GoalLocator;

/// Turns one observation into one action, keeping the maze and goal beliefs up to date.
///
/// The controller owns every piece of agent state. A step either completes and returns an
/// action or fails; `PathNotFound` means the connectivity model is broken and the episode
/// should be abandoned.
#[derive(Debug)]
pub struct AgentController {
    config: MazeConfig,
    graph: WorldGraph,
    locator: GoalLocator,
    planner: RoutePlanner,
    position: Option<Cell>,
    expected_next: Option<Cell>,
    plan: Vec<Cell>,
    planned_waypoints: Option<Vec<(usize, Cell)>>,
    steps: u64,
    terminated: bool,
    tracer: Tracer,
}

impl AgentController {
    pub fn new(config: MazeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            graph: WorldGraph::from_config(&config),
            locator: GoalLocator::from_config(&config),
            planner: RoutePlanner::from_config(&config),
            config,
            position: None,
            expected_next: None,
            plan: Vec::new(),
            planned_waypoints: None,
            steps: 0,
            terminated: false,
            tracer: Tracer::default(),
        })
    }

    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn graph(&self) -> &WorldGraph {
        &self.graph
    }

    pub fn locator(&self) -> &GoalLocator {
        &self.locator
    }

    /// Remaining plan, starting at the current position.
    pub fn plan(&self) -> &[Cell] {
        &self.plan
    }

    pub fn position(&self) -> Option<Cell> {
        self.position
    }

    pub fn expected_next(&self) -> Option<Cell> {
        self.expected_next
    }

    /// Observations consumed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn trace_log(&self) -> Option<&TraceLog> {
        self.tracer.log()
    }

    /// Snapshot for [`rescue_tools::render_mind`].
    pub fn mind(&self) -> MindView<'_> {
        MindView {
            graph: &self.graph,
            position: self.position.unwrap_or(self.config.start),
            exit: self.config.exit,
            plan: &self.plan,
            candidates: self.locator.candidate_sets(),
        }
    }

    fn terminate(&mut self) -> AgentAction {
        self.terminated = true;
        self.expected_next = None;
        self.tracer
            .emit(TraceEvent::new(self.steps, TraceKind::Terminate).with_a(self.config.exit));
        tracing::info!(steps = self.steps, "episode complete");
        AgentAction::Terminate
    }

    /// Outcome of the previous move: a wall if we did not arrive where expected.
    ///
    /// Returns whether the plan must be rebuilt.
    fn record_move_outcome(&mut self, position: Cell) -> bool {
        let (Some(prev), Some(expected)) = (self.position, self.expected_next.take()) else {
            return false;
        };

        if position == expected {
            self.graph.confirm_edge(prev, expected);
            self.tracer.emit(
                TraceEvent::new(self.steps, TraceKind::Confirm)
                    .with_a(prev)
                    .with_b(expected),
            );
            return false;
        }

        if position != prev {
            tracing::warn!(
                from = %prev,
                expected = %expected,
                reported = %position,
                "position jumped outside the attempted move"
            );
        }
        self.graph.remove_edge(prev, expected);
        self.tracer.emit(
            TraceEvent::new(self.steps, TraceKind::Wall)
                .with_a(prev)
                .with_b(expected),
        );
        tracing::debug!(from = %prev, to = %expected, "wall discovered");
        true
    }

    fn replan(&mut self, position: Cell, waypoints: Vec<(usize, Cell)>) -> Result<()> {
        let route = self
            .planner
            .plan_route(position, self.locator.candidate_sets(), &self.graph)
            .inspect_err(|err| {
                tracing::error!(%err, step = self.steps, "planning failed, aborting episode");
            })?;
        tracing::info!(
            step = self.steps,
            from = %position,
            moves = route.moves(),
            order = ?route.goal_order,
            "replanned"
        );
        self.tracer
            .emit(TraceEvent::new(self.steps, TraceKind::Replan).with_a(position));
        self.plan = route.cells;
        self.planned_waypoints = Some(waypoints);
        Ok(())
    }

    /// Consume one observation and decide the next action.
    ///
    /// Malformed observations are rejected before any state changes. After a terminate has
    /// been emitted, every later call returns terminate again.
    pub fn step(&mut self, observation: &Observation) -> Result<AgentAction> {
        observation.validate(&self.config)?;
        if self.terminated {
            return Ok(AgentAction::Terminate);
        }
        self.steps += 1;
        let position = observation.position;

        let all_collected = (0..self.config.goal_count).all(|goal| {
            !self.locator.is_available(goal) || observation.is_collected(goal, &self.config)
        });
        if all_collected && position == self.config.exit {
            return Ok(self.terminate());
        }

        let mut replan = self.record_move_outcome(position);
        self.position = Some(position);

        let update =
            self.locator
                .update(position, &observation.distances, &observation.bearings);
        for goal in update.collected {
            tracing::info!(goal, step = self.steps, "goal collected");
            self.tracer
                .emit(TraceEvent::new(self.steps, TraceKind::GoalCollected).with_goal(goal));
        }
        for goal in update.exhausted {
            self.tracer.emit(
                TraceEvent::new(self.steps, TraceKind::CandidatesExhausted)
                    .with_a(position)
                    .with_goal(goal),
            );
        }

        let waypoints = representatives(self.locator.candidate_sets());
        if self.planned_waypoints.as_ref() != Some(&waypoints) {
            replan = true;
        }

        if !replan {
            if !self.plan.is_empty() {
                self.plan.remove(0);
            }
            if self.plan.first() != Some(&position) {
                tracing::debug!(position = %position, "plan out of sync with position");
                replan = true;
            }
        }
        if replan {
            self.replan(position, waypoints)?;
        }

        let &[current, next, ..] = self.plan.as_slice() else {
            return Ok(self.terminate());
        };
        let direction = Direction::between(current, next).ok_or(RescueError::NonAdjacentStep {
            from: current,
            to: next,
        })?;
        self.expected_next = Some(next);
        Ok(AgentAction::Move(direction))
    }
}
