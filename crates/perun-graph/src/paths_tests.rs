//! Tests for shortest paths and cycle tests.

use crate::edge::EdgeProperties;
use crate::error::ErrorKind;
use crate::graph::GraphWrite;
use crate::hashes::string_hash;
use crate::memory::MemoryGraph;
use crate::paths::{
    bellman_ford_shortest_path, creates_cycle, dijkstra_shortest_path, path_weight,
    shortest_path,
};
use crate::traits::Traits;

fn weighted(
    traits: Traits,
    vertices: &[&str],
    edges: &[(&str, &str, f64)],
) -> MemoryGraph<String, String, ()> {
    let g = MemoryGraph::with_traits(string_hash, traits);
    for v in vertices {
        g.add_vertex((*v).to_string()).expect("add vertex");
    }
    for (source, target, weight) in edges {
        g.add_edge_with(
            (*source).to_string(),
            (*target).to_string(),
            EdgeProperties::default().with_weight(*weight),
        )
        .expect("add edge");
    }
    g
}

fn keys(path: &[String]) -> Vec<&str> {
    path.iter().map(String::as_str).collect()
}

#[test]
fn test_dijkstra_picks_cheapest_route() {
    let g = weighted(
        Traits::default(),
        &["A", "B", "C", "D"],
        &[("A", "B", 1.0), ("B", "D", 1.0), ("A", "C", 1.0), ("C", "D", 5.0)],
    );

    let paths = dijkstra_shortest_path(&g, &"A".to_string());
    assert_eq!(keys(&paths.path(&"D".to_string()).expect("path")), ["A", "B", "D"]);
}

#[test]
fn test_unweighted_graph_counts_hops() {
    let g = weighted(
        Traits::default().directed(),
        &["A", "B", "C", "D"],
        &[("A", "B", 0.0), ("B", "D", 0.0), ("A", "D", 0.0)],
    );

    // With all weights at zero the graph stays unweighted and the direct
    // edge wins on hop count.
    let paths = shortest_path(&g, &"A".to_string());
    assert_eq!(keys(&paths.path(&"D".to_string()).expect("path")), ["A", "D"]);
}

#[test]
fn test_path_to_source_is_singleton() {
    let g = weighted(Traits::default().directed(), &["A", "B"], &[("A", "B", 1.0)]);

    let paths = shortest_path(&g, &"A".to_string());
    assert_eq!(keys(&paths.path(&"A".to_string()).expect("path")), ["A"]);
}

#[test]
fn test_unreachable_target() {
    let g = weighted(
        Traits::default().directed(),
        &["A", "B", "C"],
        &[("A", "B", 1.0)],
    );

    let paths = shortest_path(&g, &"A".to_string());
    let err = paths.path(&"C".to_string()).expect_err("unreachable");
    assert_eq!(err.kind(), ErrorKind::TargetNotReachable);
}

#[test]
fn test_bellman_ford_handles_negative_weights() {
    let g = weighted(
        Traits::default().directed(),
        &["A", "B", "C", "D"],
        &[("A", "B", 4.0), ("A", "C", 1.0), ("C", "B", -2.0), ("B", "D", 1.0)],
    );

    let paths = bellman_ford_shortest_path(&g, &"A".to_string(), None);
    assert_eq!(
        keys(&paths.path(&"D".to_string()).expect("path")),
        ["A", "C", "B", "D"]
    );
}

#[test]
fn test_bellman_ford_detects_negative_cycle() {
    let g = weighted(
        Traits::default().directed(),
        &["A", "B", "C"],
        &[("A", "B", 1.0), ("B", "C", -3.0), ("C", "B", 1.0)],
    );

    let paths = bellman_ford_shortest_path(&g, &"A".to_string(), None);
    let err = paths.path(&"A".to_string()).expect_err("negative cycle");
    assert_eq!(err.kind(), ErrorKind::NegativeCycle);
}

#[test]
fn test_dijkstra_and_bellman_ford_agree_on_weights() {
    let g = weighted(
        Traits::default().directed(),
        &["A", "B", "C", "D", "E"],
        &[
            ("A", "B", 2.0),
            ("A", "C", 5.0),
            ("B", "C", 1.0),
            ("B", "D", 4.0),
            ("C", "D", 1.0),
            ("D", "E", 3.0),
            ("C", "E", 9.0),
        ],
    );

    for target in ["B", "C", "D", "E"] {
        let target = target.to_string();
        let via_dijkstra = dijkstra_shortest_path(&g, &"A".to_string())
            .path(&target)
            .expect("dijkstra path");
        let via_bellman_ford = bellman_ford_shortest_path(&g, &"A".to_string(), None)
            .path(&target)
            .expect("bellman-ford path");

        let w1 = path_weight(&g, &via_dijkstra).expect("weight");
        let w2 = path_weight(&g, &via_bellman_ford).expect("weight");
        assert!((w1 - w2).abs() < f64::EPSILON, "{target}: {w1} vs {w2}");
    }
}

#[test]
fn test_path_weight_includes_vertex_weights() {
    let g = weighted(
        Traits::default().directed().vertices_weighted(),
        &["A", "B", "C"],
        &[("A", "B", 2.0), ("B", "C", 3.0)],
    );
    g.update_vertex(&"B".to_string(), |vertex| vertex.properties.weight = 10.0)
        .expect("set weight");

    let weight = path_weight(
        &g,
        &["A".to_string(), "B".to_string(), "C".to_string()],
    )
    .expect("weight");
    assert!((weight - 15.0).abs() < f64::EPSILON);
}

#[test]
fn test_creates_cycle_generic() {
    let g = weighted(
        Traits::default().directed(),
        &["A", "B", "C"],
        &[("A", "B", 0.0), ("B", "C", 0.0)],
    );

    assert!(creates_cycle(&g, &"C".to_string(), &"A".to_string()).expect("cycle test"));
    assert!(!creates_cycle(&g, &"A".to_string(), &"C".to_string()).expect("cycle test"));
    assert!(creates_cycle(&g, &"A".to_string(), &"A".to_string()).expect("self loop"));
}
