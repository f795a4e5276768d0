//! Tests for all-simple-paths enumeration.

use crate::all_paths::all_paths_between;
use crate::graph::GraphWrite;
use crate::hashes::int_hash;
use crate::memory::MemoryGraph;
use crate::traits::Traits;

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

fn sorted_paths(g: &MemoryGraph<i64, i64, ()>, start: i64, end: i64) -> Vec<Vec<i64>> {
    let mut paths: Vec<Vec<i64>> = all_paths_between(g, &start, &end)
        .collect::<Result<_, _>>()
        .expect("paths");
    paths.sort();
    paths
}

#[test]
fn test_diamond_paths() {
    let g = digraph(&[1, 2, 3, 4], &[(1, 2), (1, 3), (2, 4), (3, 4)]);
    assert_eq!(sorted_paths(&g, 1, 4), vec![vec![1, 2, 4], vec![1, 3, 4]]);
}

#[test]
fn test_paths_are_simple() {
    // The 2 -> 1 back edge must not let paths revisit 1 on the way to 3.
    let g = digraph(&[1, 2, 3], &[(1, 2), (2, 1), (2, 3)]);
    assert_eq!(sorted_paths(&g, 1, 3), vec![vec![1, 2, 3]]);
}

#[test]
fn test_cycles_back_to_start() {
    let g = digraph(&[0, 1, 2, 3], &[(0, 1), (1, 2), (2, 3), (2, 0), (3, 0)]);
    assert_eq!(
        sorted_paths(&g, 0, 0),
        vec![vec![0, 1, 2, 0], vec![0, 1, 2, 3, 0]]
    );
}

#[test]
fn test_no_path() {
    let g = digraph(&[1, 2, 3], &[(1, 2)]);
    assert!(sorted_paths(&g, 1, 3).is_empty());
}

#[test]
fn test_start_equals_end_without_loop() {
    let g = digraph(&[1, 2], &[(1, 2)]);
    assert!(sorted_paths(&g, 1, 1).is_empty());
}

#[test]
fn test_missing_start_yields_nothing() {
    let g = digraph(&[1, 2], &[(1, 2)]);
    assert!(sorted_paths(&g, 9, 1).is_empty());
}

#[test]
fn test_early_termination() {
    let g = digraph(&[1, 2, 3, 4], &[(1, 2), (1, 3), (2, 4), (3, 4)]);

    // Consuming only the first result ends the enumeration.
    let first = all_paths_between(&g, &1, &4)
        .next()
        .expect("one path")
        .expect("path");
    assert_eq!(first.len(), 3);
}
