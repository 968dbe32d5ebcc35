use std::collections::VecDeque;

use proptest::prelude::*;
use rescue_core::{Cell, GridBounds};
use rescue_nav::WorldGraph;

fn all_edges(bounds: GridBounds) -> Vec<(Cell, Cell)> {
    let mut edges = Vec::new();
    for cell in bounds.cells() {
        for n in [cell.offset(1, 0), cell.offset(0, 1)] {
            if bounds.contains(n) {
                edges.push((cell, n));
            }
        }
    }
    edges
}

/// Grid size, edges in shuffled order, and a keep flag per edge for extra loops.
#[derive(Debug, Clone)]
struct MazeSpec {
    bounds: GridBounds,
    edges: Vec<(Cell, Cell)>,
    keep_extra: Vec<bool>,
    endpoints: (usize, usize),
}

fn maze_spec() -> impl Strategy<Value = MazeSpec> {
    (2u32..10, 2u32..10).prop_flat_map(|(width, height)| {
        let bounds = GridBounds::new(width, height);
        let edges = all_edges(bounds);
        let count = edges.len();
        (
            Just(edges).prop_shuffle(),
            prop::collection::vec(prop::bool::weighted(0.3), count),
            (0..bounds.len(), 0..bounds.len()),
        )
            .prop_map(move |(edges, keep_extra, endpoints)| MazeSpec {
                bounds,
                edges,
                keep_extra,
                endpoints,
            })
    })
}

/// Random spanning tree (Kruskal over the shuffled edges) plus the flagged extra edges, so
/// the grid stays connected.
fn build_maze(spec: &MazeSpec) -> WorldGraph {
    let bounds = spec.bounds;
    let mut parent: Vec<usize> = (0..bounds.len()).collect();
    fn find(parent: &mut [usize], mut x: usize) -> usize {
        while parent[x] != x {
            parent[x] = parent[parent[x]];
            x = parent[x];
        }
        x
    }

    let mut graph = WorldGraph::new(bounds);
    for (&(a, b), &keep) in spec.edges.iter().zip(&spec.keep_extra) {
        let ra = find(&mut parent, bounds.index(a).expect("in bounds"));
        let rb = find(&mut parent, bounds.index(b).expect("in bounds"));
        if ra != rb {
            parent[ra] = rb;
        } else if !keep {
            graph.remove_edge(a, b);
        }
    }
    graph
}

fn bfs_distance(graph: &WorldGraph, start: Cell, goal: Cell) -> Option<usize> {
    let bounds = graph.bounds();
    let mut dist = vec![usize::MAX; bounds.len()];
    let mut queue = VecDeque::from([start]);
    dist[bounds.index(start)?] = 0;
    while let Some(cell) = queue.pop_front() {
        let d = dist[bounds.index(cell)?];
        if cell == goal {
            return Some(d);
        }
        for &n in graph.neighbors(cell).ok()? {
            let idx = bounds.index(n)?;
            if dist[idx] == usize::MAX {
                dist[idx] = d + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

#[derive(Debug, Clone)]
enum EdgeOp {
    Remove(usize),
    Confirm(usize),
}

fn edge_op() -> impl Strategy<Value = EdgeOp> {
    prop_oneof![
        (0usize..1000).prop_map(EdgeOp::Remove),
        (0usize..1000).prop_map(EdgeOp::Confirm),
    ]
}

proptest! {
    #[test]
    fn adjacency_stays_symmetric(
        width in 1u32..7,
        height in 1u32..7,
        ops in prop::collection::vec((edge_op(), any::<bool>()), 0..40),
    ) {
        let bounds = GridBounds::new(width, height);
        let edges = all_edges(bounds);
        let mut graph = WorldGraph::new(bounds);

        for (op, flipped) in ops {
            if edges.is_empty() {
                break;
            }
            let (idx, remove) = match op {
                EdgeOp::Remove(i) => (i, true),
                EdgeOp::Confirm(i) => (i, false),
            };
            let (mut a, mut b) = edges[idx % edges.len()];
            if flipped {
                core::mem::swap(&mut a, &mut b);
            }
            if remove {
                graph.remove_edge(a, b);
            } else {
                graph.confirm_edge(a, b);
            }
        }

        for a in bounds.cells() {
            for &b in graph.neighbors(a).expect("in bounds") {
                prop_assert!(graph.neighbors(b).expect("in bounds").contains(&a));
            }
        }
        for (a, b) in graph.confirmed_edges() {
            prop_assert!(graph.is_confirmed(b, a));
        }
    }

    #[test]
    fn fully_confirmed_search_matches_bfs(spec in maze_spec()) {
        let bounds = spec.bounds;
        let mut graph = build_maze(&spec);
        for (a, b) in all_edges(bounds) {
            if graph.has_edge(a, b) {
                graph.confirm_edge(a, b);
            }
        }

        let start = bounds.cell_at(spec.endpoints.0);
        let goal = bounds.cell_at(spec.endpoints.1);
        let path = graph.search(start, goal).expect("maze is connected");

        prop_assert_eq!(path.first().copied(), Some(start));
        prop_assert_eq!(path.last().copied(), Some(goal));
        for pair in path.windows(2) {
            prop_assert!(graph.has_edge(pair[0], pair[1]));
        }
        prop_assert_eq!(Some(path.len() - 1), bfs_distance(&graph, start, goal));
    }
}
