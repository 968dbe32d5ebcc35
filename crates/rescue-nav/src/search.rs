use core::cmp::Ordering;
use std::collections::BinaryHeap;

use rescue_core::{Cell, RescueError, Result};

use crate::WorldGraph;

/// Arena entry; `parent` indexes into the same arena.
#[derive(Debug, Clone)]
struct SearchNode {
    cell: Cell,
    parent: Option<usize>,
    cost_so_far: u32,
    heuristic: u32,
    branch_penalty: f64,
    steps_since_branch: u32,
    via_unconfirmed: bool,
}

impl SearchNode {
    fn total_cost(&self, unconfirmed_penalty: f64) -> f64 {
        let mut cost = f64::from(self.cost_so_far) + f64::from(self.heuristic) + self.branch_penalty;
        if self.via_unconfirmed {
            cost += unconfirmed_penalty * f64::from(self.steps_since_branch);
        }
        cost
    }

    /// Penalty carried over to children: everything this node paid beyond `g + h`.
    fn inherited_penalty(&self, unconfirmed_penalty: f64) -> f64 {
        if self.via_unconfirmed {
            self.branch_penalty + unconfirmed_penalty * f64::from(self.steps_since_branch)
        } else {
            self.branch_penalty
        }
    }
}

#[derive(Debug)]
struct OpenNode {
    cost: f64,
    g: u32,
    tie: u64,
    node: usize,
}

impl OpenNode {
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then(self.g.cmp(&other.g))
            .then(self.tie.cmp(&other.tie))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_key(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.cmp_key(self)
    }
}

fn reconstruct_path(arena: &[SearchNode], mut current: usize) -> Vec<Cell> {
    let mut out = vec![arena[current].cell];
    while let Some(prev) = arena[current].parent {
        current = prev;
        out.push(arena[current].cell);
    }
    out.reverse();
    out
}

/// A* over the belief graph with a corridor-commitment penalty.
///
/// A cell is closed as soon as it is discovered; there is no decrease-key. Equal costs are
/// broken by the smaller cost-so-far and then by discovery order.
pub(crate) fn uncertain_a_star(
    graph: &WorldGraph,
    start_idx: usize,
    start: Cell,
    goal: Cell,
) -> Result<Vec<Cell>> {
    let bounds = graph.bounds();
    let penalty = graph.search_config().unconfirmed_penalty;

    let mut arena: Vec<SearchNode> = Vec::new();
    let mut discovered = vec![false; bounds.len()];
    let mut open = BinaryHeap::<OpenNode>::new();
    let mut tie: u64 = 0;

    arena.push(SearchNode {
        cell: start,
        parent: None,
        cost_so_far: 0,
        heuristic: start.manhattan(goal),
        branch_penalty: 0.0,
        steps_since_branch: 0,
        via_unconfirmed: false,
    });
    discovered[start_idx] = true;
    open.push(OpenNode {
        cost: arena[0].total_cost(penalty),
        g: 0,
        tie,
        node: 0,
    });
    tie += 1;

    let mut expansions: usize = 0;
    while let Some(entry) = open.pop() {
        let current = arena[entry.node].clone();
        if current.cell == goal {
            let path = reconstruct_path(&arena, entry.node);
            tracing::debug!(
                from = %start,
                to = %goal,
                expansions,
                len = path.len(),
                "path search complete"
            );
            return Ok(path);
        }
        expansions += 1;

        let Some(current_idx) = bounds.index(current.cell) else {
            continue;
        };
        let children: Vec<Cell> = graph
            .adjacency_at(current_idx)
            .iter()
            .copied()
            .filter(|n| bounds.index(*n).is_some_and(|idx| !discovered[idx]))
            .collect();

        let steps_since_branch = if children.len() > 1 {
            1
        } else {
            current.steps_since_branch + 1
        };
        let branch_penalty = current.inherited_penalty(penalty);

        for child in children {
            let Some(child_idx) = bounds.index(child) else {
                continue;
            };
            let node = SearchNode {
                cell: child,
                parent: Some(entry.node),
                cost_so_far: current.cost_so_far + 1,
                heuristic: child.manhattan(goal),
                branch_penalty,
                steps_since_branch,
                via_unconfirmed: !graph.is_confirmed(current.cell, child),
            };
            discovered[child_idx] = true;
            open.push(OpenNode {
                cost: node.total_cost(penalty),
                g: node.cost_so_far,
                tie,
                node: arena.len(),
            });
            tie += 1;
            arena.push(node);
        }
    }

    Err(RescueError::PathNotFound {
        from: start,
        to: goal,
    })
}
