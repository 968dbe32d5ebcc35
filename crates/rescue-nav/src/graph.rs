use std::collections::BTreeSet;

use rescue_core::{Cell, GridBounds, MazeConfig, RescueError, Result, SearchConfig};

/// Belief about which neighbouring cells are connected.
///
/// Starts as the full 4-neighbourhood of the grid. Edges are only ever removed (a move across
/// them failed) or confirmed (a move across them succeeded); adjacency stays symmetric.
#[derive(Debug, Clone)]
pub struct WorldGraph {
    bounds: GridBounds,
    adjacency: Vec<BTreeSet<Cell>>,
    confirmed: BTreeSet<(Cell, Cell)>,
    search: SearchConfig,
}

impl WorldGraph {
    /// Fully connected belief over `bounds`.
    ///
    /// # Panics
    ///
    /// Panics if `bounds` has no cells. [`MazeConfig::validate`] rejects such grids, so
    /// [`WorldGraph::from_config`] on a validated config never panics.
    pub fn new(bounds: GridBounds) -> Self {
        assert!(!bounds.is_empty(), "grid must be non-empty");
        let adjacency = bounds
            .cells()
            .map(|cell| {
                cell.neighbors4()
                    .into_iter()
                    .filter(|n| bounds.contains(*n))
                    .collect()
            })
            .collect();
        Self {
            bounds,
            adjacency,
            confirmed: BTreeSet::new(),
            search: SearchConfig::default(),
        }
    }

    pub fn from_config(config: &MazeConfig) -> Self {
        Self::new(config.bounds()).with_search_config(config.search)
    }

    pub fn with_search_config(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn search_config(&self) -> SearchConfig {
        self.search
    }

    fn index(&self, cell: Cell) -> Result<usize> {
        self.bounds.index(cell).ok_or(RescueError::OutOfBounds {
            cell,
            width: self.bounds.width,
            height: self.bounds.height,
        })
    }

    /// Cells currently believed reachable from `cell` in one move.
    pub fn neighbors(&self, cell: Cell) -> Result<&BTreeSet<Cell>> {
        let idx = self.index(cell)?;
        Ok(&self.adjacency[idx])
    }

    pub fn has_edge(&self, a: Cell, b: Cell) -> bool {
        self.bounds
            .index(a)
            .is_some_and(|idx| self.adjacency[idx].contains(&b))
    }

    /// Drop the edge in both directions. Returns whether anything was removed.
    ///
    /// Removal is permanent; nothing in this type re-adds an edge.
    pub fn remove_edge(&mut self, a: Cell, b: Cell) -> bool {
        let mut removed = false;
        if let Some(idx) = self.bounds.index(a) {
            removed |= self.adjacency[idx].remove(&b);
        }
        if let Some(idx) = self.bounds.index(b) {
            removed |= self.adjacency[idx].remove(&a);
        }
        if removed {
            tracing::debug!(from = %a, to = %b, "edge removed");
        }
        removed
    }

    /// Record that the edge was traversed. Adjacency is left untouched.
    pub fn confirm_edge(&mut self, a: Cell, b: Cell) {
        if !self.has_edge(a, b) {
            tracing::warn!(from = %a, to = %b, "confirming an edge missing from adjacency");
        }
        self.confirmed.insert((a, b));
        self.confirmed.insert((b, a));
    }

    pub fn is_confirmed(&self, a: Cell, b: Cell) -> bool {
        self.confirmed.contains(&(a, b))
    }

    /// Confirmed edges as ordered pairs; each traversal contributes both directions.
    pub fn confirmed_edges(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        self.confirmed.iter().copied()
    }

    /// Number of undirected edges still in the adjacency.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Least-cost path from `start` to `goal`, both inclusive.
    ///
    /// Unconfirmed edges are penalised in proportion to how far past the last branch point they
    /// lie. Fails with [`RescueError::PathNotFound`] when the two cells are disconnected in the
    /// model, which never happens unless an edge was wrongly removed.
    pub fn search(&self, start: Cell, goal: Cell) -> Result<Vec<Cell>> {
        let start_idx = self.index(start)?;
        self.index(goal)?;
        crate::search::uncertain_a_star(self, start_idx, start, goal)
    }

    pub(crate) fn adjacency_at(&self, idx: usize) -> &BTreeSet<Cell> {
        &self.adjacency[idx]
    }
}
