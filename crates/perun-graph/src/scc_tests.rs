//! Tests for strongly connected components.

use crate::graph::GraphWrite;
use crate::hashes::int_hash;
use crate::memory::MemoryGraph;
use crate::scc::strongly_connected_components;
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

fn sorted_components(g: &MemoryGraph<i64, i64, ()>) -> Vec<Vec<i64>> {
    let mut components = strongly_connected_components(g).expect("components");
    for component in &mut components {
        component.sort_unstable();
    }
    components.sort();
    components
}

#[test]
fn test_single_cycle_is_one_component() {
    let g = digraph(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
    assert_eq!(sorted_components(&g), vec![vec![1, 2, 3]]);
}

#[test]
fn test_acyclic_graph_has_singleton_components() {
    let g = digraph(&[1, 2, 3], &[(1, 2), (2, 3)]);
    assert_eq!(sorted_components(&g), vec![vec![1], vec![2], vec![3]]);
}

#[test]
fn test_components_partition_the_vertex_set() {
    let g = digraph(
        &[1, 2, 3, 4, 5, 6, 7, 8],
        &[
            (1, 2),
            (2, 3),
            (2, 5),
            (2, 6),
            (3, 4),
            (3, 7),
            (4, 3),
            (4, 8),
            (5, 1),
            (5, 6),
            (6, 7),
            (7, 6),
            (8, 4),
            (8, 7),
        ],
    );

    let components = sorted_components(&g);
    assert_eq!(
        components,
        vec![vec![1, 2, 5], vec![3, 4, 8], vec![6, 7]]
    );

    let mut all: Vec<i64> = components.into_iter().flatten().collect();
    all.sort_unstable();
    assert_eq!(all, (1..=8).collect::<Vec<i64>>());
}
