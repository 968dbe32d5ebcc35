use std::collections::{BTreeMap, BTreeSet};

use rescue_core::{Cell, MazeConfig, Result};
use rescue_nav::WorldGraph;

/// One waypoint per goal with a non-empty candidate set: its smallest cell.
///
/// This picks a cell, not the best cell; only the visiting order is optimised.
pub fn representatives(candidate_sets: &[BTreeSet<Cell>]) -> Vec<(usize, Cell)> {
    candidate_sets
        .iter()
        .enumerate()
        .filter_map(|(goal, cells)| cells.first().map(|cell| (goal, *cell)))
        .collect()
}

/// Planned walk from the current cell through every located goal to the exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Every cell in order, starting at the current position and ending at the exit.
    pub cells: Vec<Cell>,
    /// Goal indices in the order their representatives are visited.
    pub goal_order: Vec<usize>,
}

impl Route {
    /// Number of moves along the route.
    pub fn moves(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

/// Search results keyed by `(from, to)`; the reverse is stored alongside since moves are
/// undirected.
#[derive(Debug, Default)]
struct PathMemo {
    paths: BTreeMap<(Cell, Cell), Vec<Cell>>,
    searches: usize,
}

impl PathMemo {
    fn leg(&mut self, graph: &WorldGraph, from: Cell, to: Cell) -> Result<&[Cell]> {
        if !self.paths.contains_key(&(from, to)) {
            let path = graph.search(from, to)?;
            self.searches += 1;
            let mut reversed = path.clone();
            reversed.reverse();
            self.paths.insert((to, from), reversed);
            self.paths.insert((from, to), path);
        }
        Ok(self.paths[&(from, to)].as_slice())
    }
}

/// Advance `order` to the next lexicographic permutation; `false` once exhausted.
fn next_permutation(order: &mut [usize]) -> bool {
    if order.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..order.len() - 1).rev().find(|&i| order[i] < order[i + 1]) else {
        return false;
    };
    let successor = (pivot + 1..order.len())
        .rev()
        .find(|&j| order[j] > order[pivot])
        .unwrap_or(pivot + 1);
    order.swap(pivot, successor);
    order[pivot + 1..].reverse();
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePlanner {
    exit: Cell,
}

impl RoutePlanner {
    pub fn new(exit: Cell) -> Self {
        Self { exit }
    }

    pub fn from_config(config: &MazeConfig) -> Self {
        Self::new(config.exit)
    }

    pub fn exit(&self) -> Cell {
        self.exit
    }

    /// Cell sequence of the shortest route; see [`RoutePlanner::plan_route`].
    pub fn plan(
        &self,
        start: Cell,
        candidate_sets: &[BTreeSet<Cell>],
        graph: &WorldGraph,
    ) -> Result<Vec<Cell>> {
        Ok(self.plan_route(start, candidate_sets, graph)?.cells)
    }

    /// Try every visiting order of the goal representatives and keep the shortest.
    ///
    /// Goals with an empty candidate set are skipped. Ties keep the first order found in
    /// lexicographic goal-index order. Any search failure aborts the whole pass.
    pub fn plan_route(
        &self,
        start: Cell,
        candidate_sets: &[BTreeSet<Cell>],
        graph: &WorldGraph,
    ) -> Result<Route> {
        let waypoints = representatives(candidate_sets);
        let mut memo = PathMemo::default();
        let mut order: Vec<usize> = (0..waypoints.len()).collect();
        let mut best: Option<(usize, Route)> = None;

        loop {
            let mut cells = vec![start];
            let mut current = start;
            let stops = order
                .iter()
                .map(|&i| waypoints[i].1)
                .chain(core::iter::once(self.exit));
            for stop in stops {
                let leg = memo.leg(graph, current, stop)?;
                cells.extend_from_slice(&leg[1..]);
                current = stop;
            }

            let moves = cells.len() - 1;
            if best.as_ref().is_none_or(|(best_moves, _)| moves < *best_moves) {
                let goal_order = order.iter().map(|&i| waypoints[i].0).collect();
                best = Some((moves, Route { cells, goal_order }));
            }

            if !next_permutation(&mut order) {
                break;
            }
        }

        tracing::debug!(
            from = %start,
            waypoints = waypoints.len(),
            searches = memo.searches,
            "route planned"
        );

        let (_, route) = best.unwrap_or_else(|| {
            (
                0,
                Route {
                    cells: vec![start],
                    goal_order: Vec::new(),
                },
            )
        });
        Ok(route)
    }
}
