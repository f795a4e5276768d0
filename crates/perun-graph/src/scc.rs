//! Strongly connected components (Tarjan).

use crate::error::Error;
use crate::graph::{GraphKey, GraphRelations, RelationMap};
use rustc_hash::{FxHashMap, FxHashSet};

struct SccState<K: GraphKey, E> {
    adjacency: RelationMap<K, E>,
    components: Vec<Vec<K>>,
    stack: Vec<K>,
    visited: FxHashSet<K>,
    lowlink: FxHashMap<K, usize>,
    index: FxHashMap<K, usize>,
    time: usize,
}

/// Detects all strongly connected components of a directed graph and
/// returns them as lists of vertex keys. Every vertex appears in exactly
/// one component; vertices on a common cycle share a component.
///
/// Only meaningful for directed graphs.
///
/// # Errors
///
/// Forwards adjacency-map construction errors.
pub fn strongly_connected_components<K, E, G>(g: &G) -> Result<Vec<Vec<K>>, Error<K>>
where
    K: GraphKey,
    G: GraphRelations<K, E>,
{
    let adjacency = g.adjacency_map()?;
    let mut state = SccState {
        adjacency,
        components: Vec::new(),
        stack: Vec::new(),
        visited: FxHashSet::default(),
        lowlink: FxHashMap::default(),
        index: FxHashMap::default(),
        time: 0,
    };

    let keys: Vec<K> = state.adjacency.keys().cloned().collect();
    for key in keys {
        if !state.visited.contains(&key) {
            find_component(key, &mut state);
        }
    }

    Ok(state.components)
}

fn find_component<K: GraphKey, E>(vertex: K, state: &mut SccState<K, E>) {
    state.stack.push(vertex.clone());
    state.visited.insert(vertex.clone());
    state.index.insert(vertex.clone(), state.time);
    state.lowlink.insert(vertex.clone(), state.time);
    state.time += 1;

    let neighbors: Vec<K> = state
        .adjacency
        .get(&vertex)
        .map(|adjacent| adjacent.keys().cloned().collect())
        .unwrap_or_default();
    for adjacent in neighbors {
        if !state.visited.contains(&adjacent) {
            find_component(adjacent.clone(), state);
            let low = state
                .lowlink
                .get(&vertex)
                .copied()
                .min(state.lowlink.get(&adjacent).copied())
                .unwrap_or(0);
            state.lowlink.insert(vertex.clone(), low);
        } else if state.stack.contains(&adjacent) {
            // A back edge to a vertex still on the stack; the component
            // reaches at least as far up as that vertex.
            let low = state
                .lowlink
                .get(&vertex)
                .copied()
                .min(state.index.get(&adjacent).copied())
                .unwrap_or(0);
            state.lowlink.insert(vertex.clone(), low);
        }
    }

    // A vertex whose lowlink equals its index heads a component made of
    // everything above it on the stack.
    if state.lowlink.get(&vertex) == state.index.get(&vertex) {
        let mut component: Vec<K> = Vec::new();
        while let Some(member) = state.stack.pop() {
            let is_head = member == vertex;
            component.push(member);
            if is_head {
                break;
            }
        }
        state.components.push(component);
    }
}
