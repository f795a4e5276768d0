//! Tests for BFS and DFS traversal.

use crate::error::ErrorKind;
use crate::graph::GraphWrite;
use crate::hashes::int_hash;
use crate::memory::MemoryGraph;
use crate::traits::Traits;
use crate::traversal::{bfs, dfs};
use rustc_hash::FxHashSet;

fn digraph(vertices: &[i64], edges: &[(i64, i64)]) -> MemoryGraph<i64, i64, ()> {
    let g = MemoryGraph::with_traits(int_hash, Traits::default().directed());
    for v in vertices {
        g.add_vertex(*v).expect("add vertex");
    }
    for (source, target) in edges {
        g.add_edge(*source, *target).expect("add edge");
    }
    g
}

#[test]
fn test_dfs_visits_each_reachable_vertex_once() {
    let g = digraph(&[1, 2, 3, 4, 5], &[(1, 2), (2, 3), (3, 1), (2, 4)]);

    let visited: Vec<i64> = dfs(&g, &1).collect::<Result<_, _>>().expect("dfs");
    let unique: FxHashSet<i64> = visited.iter().copied().collect();
    assert_eq!(visited.len(), unique.len());
    assert_eq!(unique, [1, 2, 3, 4].into_iter().collect());
}

#[test]
fn test_bfs_visits_in_level_order() {
    let g = digraph(&[1, 2, 3, 4, 5, 6], &[(1, 2), (1, 3), (2, 4), (3, 5), (4, 6)]);

    let visited: Vec<i64> = bfs(&g, &1).collect::<Result<_, _>>().expect("bfs");
    assert_eq!(visited[0], 1);
    let position = |k: i64| visited.iter().position(|v| *v == k).expect("visited");
    // Level 1 before level 2, level 2 before level 3.
    assert!(position(2) < position(4));
    assert!(position(3) < position(5));
    assert!(position(4) < position(6));
    assert_eq!(visited.len(), 6);
}

#[test]
fn test_unreachable_vertices_are_not_visited() {
    let g = digraph(&[1, 2, 3], &[(1, 2)]);

    let visited: Vec<i64> = bfs(&g, &1).collect::<Result<_, _>>().expect("bfs");
    assert!(!visited.contains(&3));
}

#[test]
fn test_missing_start_yields_single_error() {
    let g = digraph(&[1], &[]);

    let mut items = dfs(&g, &9);
    let err = items.next().expect("error item").expect_err("missing start");
    assert_eq!(err.kind(), ErrorKind::VertexNotFound);
    assert!(items.next().is_none());

    let mut items = bfs(&g, &9);
    assert!(items.next().expect("error item").is_err());
    assert!(items.next().is_none());
}

#[test]
fn test_traversal_stops_when_dropped() {
    let g = digraph(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 4)]);

    let first_two: Vec<i64> = bfs(&g, &1)
        .take(2)
        .collect::<Result<_, _>>()
        .expect("bfs");
    assert_eq!(first_two.len(), 2);
}

#[test]
fn test_traversal_handles_cycles() {
    let g = digraph(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);

    assert_eq!(dfs(&g, &1).count(), 3);
    assert_eq!(bfs(&g, &1).count(), 3);
}

#[test]
fn test_undirected_traversal_follows_both_orientations() {
    let g: MemoryGraph<i64, i64, ()> = MemoryGraph::new(int_hash);
    for v in [1, 2, 3] {
        g.add_vertex(v).expect("add vertex");
    }
    g.add_edge(2, 1).expect("add edge");
    g.add_edge(2, 3).expect("add edge");

    let visited: Vec<i64> = bfs(&g, &1).collect::<Result<_, _>>().expect("bfs");
    assert_eq!(visited.len(), 3);
}
