//! Tests for topological sorting and transitive reduction.

use crate::dag::{stable_topological_sort, topological_sort, transitive_reduction};
use crate::error::ErrorKind;
use crate::graph::{GraphRead, GraphRelations, GraphWrite};
use crate::hashes::int_hash;
use crate::memory::MemoryGraph;
use crate::traits::Traits;
use rustc_hash::FxHashMap;

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
fn test_topological_sort_respects_edges() {
    let g = digraph(
        &[1, 2, 3, 4, 5],
        &[(1, 2), (1, 3), (2, 3), (2, 4), (2, 5), (3, 4), (4, 5)],
    );

    let order: Vec<i64> = topological_sort(g.predecessor_map().expect("predecessors"))
        .collect::<Result<_, _>>()
        .expect("sort");

    assert_eq!(order.len(), 5);
    let position: FxHashMap<i64, usize> =
        order.iter().enumerate().map(|(i, k)| (*k, i)).collect();
    for edge in g.edges() {
        let edge = edge.expect("edge");
        assert!(position[&edge.source] < position[&edge.target]);
    }
}

#[test]
fn test_stable_topological_sort_is_deterministic() {
    let edges = &[(1, 2), (1, 3), (2, 3), (2, 4), (2, 5), (3, 4), (4, 5)];
    let g = digraph(&[1, 2, 3, 4, 5], edges);

    let order: Vec<i64> =
        stable_topological_sort(g.predecessor_map().expect("predecessors"), i64::cmp)
            .collect::<Result<_, _>>()
            .expect("sort");
    assert_eq!(order, vec![1, 2, 3, 4, 5]);

    // Replaying the same map yields identical output.
    let replay: Vec<i64> =
        stable_topological_sort(g.predecessor_map().expect("predecessors"), i64::cmp)
            .collect::<Result<_, _>>()
            .expect("sort");
    assert_eq!(order, replay);
}

#[test]
fn test_stable_topological_sort_orders_independent_vertices() {
    let g = digraph(&[3, 1, 2, 4], &[(3, 4), (1, 4), (2, 4)]);

    let order: Vec<i64> =
        stable_topological_sort(g.predecessor_map().expect("predecessors"), i64::cmp)
            .collect::<Result<_, _>>()
            .expect("sort");
    assert_eq!(order, vec![1, 2, 3, 4]);
}

#[test]
fn test_stable_topological_sort_reversed_view() {
    let g = digraph(&[1, 2, 3], &[(1, 2), (2, 3)]);

    // Feeding the adjacency map produces the reverse topological order;
    // the comparator keeps its natural sense.
    let order: Vec<i64> =
        stable_topological_sort(g.adjacency_map().expect("adjacency"), i64::cmp)
            .collect::<Result<_, _>>()
            .expect("sort");
    assert_eq!(order, vec![3, 2, 1]);
}

#[test]
fn test_topological_sort_reports_cycle() {
    let g = digraph(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);

    let mut sorted = topological_sort(g.predecessor_map().expect("predecessors"));
    let terminal = sorted
        .find(Result::is_err)
        .expect("terminal error item")
        .expect_err("cycle");
    assert_eq!(terminal.kind(), ErrorKind::GraphHasCycle);
    assert_eq!(sorted.count(), 0);
}

#[test]
fn test_stable_topological_sort_emits_through_cycle() {
    // 1 -> 2 <-> 3; the 2/3 cycle blocks Kahn's queue after 1.
    let g = digraph(&[1, 2, 3], &[(1, 2), (2, 3), (3, 2)]);

    let order: Vec<i64> =
        stable_topological_sort(g.predecessor_map().expect("predecessors"), i64::cmp)
            .collect::<Result<_, _>>()
            .expect("no error in stable variant");
    assert_eq!(order.len(), 3);
    assert_eq!(order[0], 1);
}

#[test]
fn test_transitive_reduction_removes_shortcuts() {
    let g = digraph(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 4), (1, 3), (2, 4), (1, 4)]);

    transitive_reduction(&g).expect("reduce");

    assert_eq!(g.size(), 3);
    for (source, target) in [(1, 2), (2, 3), (3, 4)] {
        assert!(g.edge(&source, &target).is_ok());
    }
    for (source, target) in [(1, 3), (2, 4), (1, 4)] {
        assert!(g.edge(&source, &target).is_err());
    }
}

#[test]
fn test_transitive_reduction_preserves_reachability() {
    let g = digraph(
        &[1, 2, 3, 4, 5],
        &[(1, 2), (1, 3), (1, 5), (2, 4), (3, 4), (4, 5)],
    );

    let reachable_before = reachable_pairs(&g);
    transitive_reduction(&g).expect("reduce");
    assert_eq!(reachable_before, reachable_pairs(&g));
}

#[test]
fn test_transitive_reduction_rejects_cycle() {
    let g = digraph(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);

    let err = transitive_reduction(&g).expect_err("cyclic input");
    assert_eq!(err.kind(), ErrorKind::GraphHasCycle);
}

fn reachable_pairs(g: &MemoryGraph<i64, i64, ()>) -> Vec<(i64, i64)> {
    let adjacency = g.adjacency_map().expect("adjacency");
    let mut keys: Vec<i64> = adjacency.keys().copied().collect();
    keys.sort_unstable();

    let mut pairs = Vec::new();
    for from in &keys {
        let mut stack = vec![*from];
        let mut visited = Vec::new();
        while let Some(current) = stack.pop() {
            if visited.contains(&current) {
                continue;
            }
            visited.push(current);
            if let Some(next) = adjacency.get(&current) {
                stack.extend(next.keys().copied());
            }
        }
        visited.sort_unstable();
        for to in visited {
            if to != *from {
                pairs.push((*from, to));
            }
        }
    }
    pairs.sort_unstable();
    pairs
}
