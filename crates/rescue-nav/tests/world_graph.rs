use std::collections::VecDeque;

use rescue_core::{Cell, GridBounds, RescueError, SearchConfig};
use rescue_nav::WorldGraph;

fn bfs_distance(graph: &WorldGraph, start: Cell, goal: Cell) -> Option<usize> {
    let bounds = graph.bounds();
    let mut dist = vec![usize::MAX; bounds.len()];
    let mut queue = VecDeque::new();
    dist[bounds.index(start)?] = 0;
    queue.push_back(start);
    while let Some(cell) = queue.pop_front() {
        let d = dist[bounds.index(cell)?];
        if cell == goal {
            return Some(d);
        }
        for &n in graph.neighbors(cell).expect("in bounds") {
            let idx = bounds.index(n)?;
            if dist[idx] == usize::MAX {
                dist[idx] = d + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

fn confirm_all(graph: &mut WorldGraph) {
    let cells: Vec<Cell> = graph.bounds().cells().collect();
    for a in cells {
        let neighbors: Vec<Cell> = graph.neighbors(a).expect("in bounds").iter().copied().collect();
        for b in neighbors {
            graph.confirm_edge(a, b);
        }
    }
}

fn assert_contiguous(graph: &WorldGraph, path: &[Cell]) {
    for pair in path.windows(2) {
        assert!(
            graph.has_edge(pair[0], pair[1]),
            "path steps across a missing edge {} -> {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn search_on_open_grid_follows_manhattan_distance() {
    let graph = WorldGraph::new(GridBounds::new(6, 4));
    let start = Cell::new(0, 0);
    let goal = Cell::new(5, 3);
    let path = graph.search(start, goal).expect("path should exist");

    assert_eq!(path.first().copied(), Some(start));
    assert_eq!(path.last().copied(), Some(goal));
    assert_eq!(path.len() - 1, start.manhattan(goal) as usize);
    assert_contiguous(&graph, &path);
}

#[test]
fn search_to_self_is_a_single_cell() {
    let graph = WorldGraph::new(GridBounds::new(3, 3));
    let c = Cell::new(1, 2);
    assert_eq!(graph.search(c, c).expect("trivial path"), vec![c]);
}

#[test]
fn search_routes_through_single_gap() {
    let mut graph = WorldGraph::new(GridBounds::new(5, 5));

    // Wall between columns 1 and 2 with a single gap at row 2.
    for y in 0..5 {
        if y == 2 {
            continue;
        }
        graph.remove_edge(Cell::new(1, y), Cell::new(2, y));
    }
    confirm_all(&mut graph);

    let start = Cell::new(0, 0);
    let goal = Cell::new(4, 4);
    let path = graph.search(start, goal).expect("path should exist");

    assert!(path.contains(&Cell::new(1, 2)) && path.contains(&Cell::new(2, 2)));
    assert_eq!(Some(path.len() - 1), bfs_distance(&graph, start, goal));
    assert_contiguous(&graph, &path);
}

#[test]
fn search_is_deterministic_for_same_input() {
    let mut graph = WorldGraph::new(GridBounds::new(10, 10));
    for y in 0..10 {
        if y != 5 {
            graph.remove_edge(Cell::new(4, y), Cell::new(5, y));
        }
    }

    let a = graph.search(Cell::new(1, 1), Cell::new(8, 8)).expect("path");
    let b = graph.search(Cell::new(1, 1), Cell::new(8, 8)).expect("path");
    assert_eq!(a, b);
}

#[test]
fn confirmed_route_wins_a_tie_against_unconfirmed_one() {
    let mut graph = WorldGraph::new(GridBounds::new(3, 3));
    let route = [
        Cell::new(0, 0),
        Cell::new(1, 0),
        Cell::new(2, 0),
        Cell::new(2, 1),
        Cell::new(2, 2),
    ];
    for pair in route.windows(2) {
        graph.confirm_edge(pair[0], pair[1]);
    }

    let path = graph.search(Cell::new(0, 0), Cell::new(2, 2)).expect("path");
    assert_eq!(path, route.to_vec());
}

/// Two parallel corridors joined at both ends; the lower one is known, the upper one is not.
fn twin_corridors(penalty: f64) -> WorldGraph {
    let mut graph = WorldGraph::new(GridBounds::new(5, 2)).with_search_config(SearchConfig {
        unconfirmed_penalty: penalty,
    });
    for x in 1..4 {
        graph.remove_edge(Cell::new(x, 0), Cell::new(x, 1));
    }
    let known = [
        Cell::new(0, 0),
        Cell::new(0, 1),
        Cell::new(1, 1),
        Cell::new(2, 1),
        Cell::new(3, 1),
        Cell::new(4, 1),
        Cell::new(4, 0),
    ];
    for pair in known.windows(2) {
        graph.confirm_edge(pair[0], pair[1]);
    }
    graph
}

#[test]
fn long_unconfirmed_corridor_loses_to_confirmed_detour() {
    let graph = twin_corridors(0.9);
    let path = graph.search(Cell::new(0, 0), Cell::new(4, 0)).expect("path");
    assert_eq!(path.len(), 7);
    assert_eq!(path[1], Cell::new(0, 1));
}

#[test]
fn zero_penalty_takes_the_shortest_corridor() {
    let graph = twin_corridors(0.0);
    let path = graph.search(Cell::new(0, 0), Cell::new(4, 0)).expect("path");
    assert_eq!(
        path,
        (0..5).map(|x| Cell::new(x, 0)).collect::<Vec<_>>()
    );
}

#[test]
fn disconnected_cell_reports_path_not_found_with_the_pair() {
    let mut graph = WorldGraph::new(GridBounds::new(3, 3));
    let corner = Cell::new(2, 2);
    graph.remove_edge(corner, Cell::new(1, 2));
    graph.remove_edge(corner, Cell::new(2, 1));

    let err = graph
        .search(Cell::new(0, 0), corner)
        .expect_err("corner is cut off");
    match err {
        RescueError::PathNotFound { from, to } => {
            assert_eq!(from, Cell::new(0, 0));
            assert_eq!(to, corner);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn search_rejects_out_of_bounds_endpoints() {
    let graph = WorldGraph::new(GridBounds::new(3, 3));
    assert!(matches!(
        graph.search(Cell::new(0, 0), Cell::new(3, 3)),
        Err(RescueError::OutOfBounds { .. })
    ));
}
