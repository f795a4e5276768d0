//! Higher-level modification helpers built on the primitive operations.
//!
//! These are multi-operation sequences and deliberately not atomic: a
//! concurrent observer may witness intermediate states.

use crate::edge::Edge;
use crate::error::Error;
use crate::graph::{GraphKey, GraphNeighbors, GraphRead, GraphWrite};
use rustc_hash::FxHashSet;

/// Collects the incident edges of `key`, each logical edge exactly once
/// even when the downstream and upstream views both report it (self-loops,
/// undirected graphs).
fn incident_edges<K, V, E, G>(g: &G, key: &K) -> Result<Vec<Edge<K, E>>, Error<K>>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphWrite<K, V, E> + GraphNeighbors<K, E>,
{
    let undirected = !g.traits().is_directed;
    let mut seen: FxHashSet<(K, K)> = FxHashSet::default();
    let mut edges: Vec<Edge<K, E>> = Vec::new();

    let mut record = |edge: Edge<K, E>| {
        let pair = (edge.source.clone(), edge.target.clone());
        if seen.contains(&pair) {
            return;
        }
        if undirected && seen.contains(&(pair.1.clone(), pair.0.clone())) {
            return;
        }
        seen.insert(pair);
        edges.push(edge);
    };

    for edge in g.downstream_neighbors(key) {
        record(edge?);
    }
    for edge in g.upstream_neighbors(key) {
        record(edge?);
    }
    Ok(edges)
}

/// Removes the vertex with the given key together with all of its edges.
/// Aborts on the first error; already-removed edges stay removed.
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`] if the vertex is absent, or any
/// error from the individual removals.
pub fn remove_vertex_and_edges<K, V, E, G>(g: &G, key: &K) -> Result<(), Error<K>>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphWrite<K, V, E> + GraphNeighbors<K, E>,
{
    for edge in incident_edges(g, key)? {
        g.remove_edge(&edge.source, &edge.target)?;
    }
    g.remove_vertex(key)
}

/// Replaces the vertex stored under `old_key` with `new_value`.
///
/// If the new value hashes to the same key, the value is updated in
/// place. Otherwise the new vertex is added with the old properties,
/// every incident edge is rewired onto the new key, and the old vertex is
/// removed. Not atomic; aborts on the first error.
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`] if the old vertex is absent,
/// [`Error::VertexAlreadyExists`] if the new key is taken, or any error
/// from the individual rewiring steps.
pub fn replace_vertex<K, V, E, G>(g: &G, old_key: &K, new_value: V) -> Result<(), Error<K>>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphWrite<K, V, E> + GraphNeighbors<K, E>,
{
    let new_key = g.key_of(&new_value);
    if new_key == *old_key {
        return g.update_vertex(old_key, |vertex| vertex.value = new_value);
    }

    let old_vertex = g.vertex(old_key)?;
    g.add_vertex_with(new_value, old_vertex.properties)?;

    for edge in incident_edges(g, old_key)? {
        g.remove_edge(&edge.source, &edge.target)?;
        let source = if edge.source == *old_key {
            new_key.clone()
        } else {
            edge.source
        };
        let target = if edge.target == *old_key {
            new_key.clone()
        } else {
            edge.target
        };
        g.add_edge_with(source, target, edge.properties)?;
    }

    g.remove_vertex(old_key)
}
