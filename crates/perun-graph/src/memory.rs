//! Concurrent in-memory graph store.
//!
//! [`MemoryGraph`] owns the canonical vertex table and two adjacency
//! indexes (out-edges and in-edges), enforces all structural invariants,
//! and serialises access with a single readers/writer lock.
//!
//! # Snapshot Semantics
//!
//! Enumeration methods (`vertices`, `edges`, the neighbor iterators, and
//! the relation maps) clone a consistent snapshot under the read lock and
//! release it before the iterator is handed out. Concurrent readers always
//! see a view consistent with one moment in time; writers can never
//! interleave inside a single iteration. Mutations performed after the
//! snapshot was taken are not reflected in it.
//!
//! # Undirected Storage
//!
//! An undirected graph stores each edge once, in the orientation it was
//! added with. Lookup, neighbor iteration, and map materialisation treat
//! both orientations symmetrically, so a single logical edge never appears
//! twice in storage.

use crate::edge::{Edge, EdgeProperties};
use crate::error::Error;
use crate::graph::{
    EdgeIter, GraphBulk, GraphKey, GraphNeighbors, GraphRead, GraphRelations, GraphWrite,
    RelationMap, VertexIter,
};
use crate::paths::GraphCycles;
use crate::traits::Traits;
use crate::vertex::{Vertex, VertexProperties};
use crate::walk::{walk_relation_map, EdgeOrdering, GraphWalker, WalkControl, WalkDirection, WalkOrder};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

/// Hashing function deriving the key of a vertex from its value.
pub type HashFn<K, V> = Box<dyn Fn(&V) -> K + Send + Sync>;

/// All mutable state, guarded by the store's readers/writer lock.
///
/// The in-edge index stores only keys; the edge record itself lives in the
/// out-edge index under its stored orientation, so the two indexes can
/// never disagree about an edge's properties.
struct State<K, V, E> {
    traits: Traits,
    vertices: FxHashMap<K, Vertex<V>>,
    out_edges: FxHashMap<K, FxHashMap<K, Edge<K, E>>>,
    in_edges: FxHashMap<K, FxHashSet<K>>,
    edge_count: usize,
}

/// A thread-safe in-memory graph keyed by `K`, storing vertex values of
/// type `V` and opaque edge payloads of type `E`.
///
/// # Example
///
/// ```rust,ignore
/// use perun_graph::{int_hash, GraphWrite, MemoryGraph, Traits};
///
/// let g: MemoryGraph<i64, i64, ()> =
///     MemoryGraph::with_traits(int_hash, Traits::default().directed());
/// g.add_vertex(1)?;
/// g.add_vertex(2)?;
/// g.add_edge(1, 2)?;
/// ```
pub struct MemoryGraph<K, V, E> {
    hash: HashFn<K, V>,
    state: RwLock<State<K, V, E>>,
}

impl<K, V, E> MemoryGraph<K, V, E> {
    /// Creates an empty undirected graph with the given hashing function.
    #[must_use]
    pub fn new(hash: impl Fn(&V) -> K + Send + Sync + 'static) -> Self {
        Self::with_traits(hash, Traits::default())
    }

    /// Creates an empty graph with the given hashing function and traits.
    #[must_use]
    pub fn with_traits(hash: impl Fn(&V) -> K + Send + Sync + 'static, traits: Traits) -> Self {
        Self {
            hash: Box::new(hash),
            state: RwLock::new(State {
                traits,
                vertices: FxHashMap::default(),
                out_edges: FxHashMap::default(),
                in_edges: FxHashMap::default(),
                edge_count: 0,
            }),
        }
    }
}

/// Looks up the stored edge for `(source, target)`, matching the reversed
/// pair as well on undirected graphs. The returned edge is in its stored
/// orientation.
fn find_edge<'a, K: GraphKey, V, E>(
    state: &'a State<K, V, E>,
    source: &K,
    target: &K,
) -> Option<&'a Edge<K, E>> {
    if let Some(edge) = state.out_edges.get(source).and_then(|out| out.get(target)) {
        return Some(edge);
    }
    if !state.traits.is_directed {
        if let Some(edge) = state.out_edges.get(target).and_then(|out| out.get(source)) {
            return Some(edge);
        }
    }
    None
}

/// Walks backwards from `source` through the in-edge index looking for
/// `target`. Runs on the already-locked state so `add_edge` can call it
/// without re-acquiring the lock.
fn creates_cycle_in<K: GraphKey, V, E>(state: &State<K, V, E>, source: &K, target: &K) -> bool {
    if source == target {
        return true;
    }

    let mut stack: Vec<K> = vec![source.clone()];
    let mut visited: FxHashSet<K> = FxHashSet::default();

    while let Some(current) = stack.pop() {
        if visited.contains(&current) {
            continue;
        }
        // If the target is an ancestor of the source, the proposed edge
        // would close a cycle.
        if current == *target {
            return true;
        }
        visited.insert(current.clone());

        if let Some(predecessors) = state.in_edges.get(&current) {
            stack.extend(predecessors.iter().cloned());
        }
        if !state.traits.is_directed {
            if let Some(successors) = state.out_edges.get(&current) {
                stack.extend(successors.keys().cloned());
            }
        }
    }

    false
}

/// Builds the adjacency map from the locked state.
fn adjacency_of<K: GraphKey, V, E: Clone>(state: &State<K, V, E>) -> RelationMap<K, E> {
    let mut adj: RelationMap<K, E> =
        FxHashMap::with_capacity_and_hasher(state.vertices.len(), rustc_hash::FxBuildHasher);
    for key in state.vertices.keys() {
        adj.entry(key.clone()).or_default();
    }
    for (src, out) in &state.out_edges {
        for (tgt, edge) in out {
            adj.entry(src.clone()).or_default().insert(
                tgt.clone(),
                Edge {
                    source: src.clone(),
                    target: tgt.clone(),
                    properties: edge.properties.clone(),
                },
            );
            if !state.traits.is_directed {
                adj.entry(tgt.clone()).or_default().insert(
                    src.clone(),
                    Edge {
                        source: tgt.clone(),
                        target: src.clone(),
                        properties: edge.properties.clone(),
                    },
                );
            }
        }
    }
    adj
}

/// Builds the predecessor map from the locked state.
fn predecessors_of<K: GraphKey, V, E: Clone>(state: &State<K, V, E>) -> RelationMap<K, E> {
    let mut pred: RelationMap<K, E> =
        FxHashMap::with_capacity_and_hasher(state.vertices.len(), rustc_hash::FxBuildHasher);
    for key in state.vertices.keys() {
        pred.entry(key.clone()).or_default();
    }
    for (src, out) in &state.out_edges {
        for (tgt, edge) in out {
            pred.entry(tgt.clone()).or_default().insert(
                src.clone(),
                Edge {
                    source: src.clone(),
                    target: tgt.clone(),
                    properties: edge.properties.clone(),
                },
            );
            if !state.traits.is_directed {
                pred.entry(src.clone()).or_default().insert(
                    tgt.clone(),
                    Edge {
                        source: src.clone(),
                        target: tgt.clone(),
                        properties: edge.properties.clone(),
                    },
                );
            }
        }
    }
    pred
}

impl<K: GraphKey, V: Clone, E: Clone> GraphRead<K, V, E> for MemoryGraph<K, V, E> {
    fn key_of(&self, value: &V) -> K {
        (self.hash)(value)
    }

    fn traits(&self) -> Traits {
        self.state.read().traits
    }

    fn vertex(&self, key: &K) -> Result<Vertex<V>, Error<K>> {
        let state = self.state.read();
        state
            .vertices
            .get(key)
            .cloned()
            .ok_or_else(|| Error::VertexNotFound { key: key.clone() })
    }

    fn vertices(&self) -> VertexIter<'_, K, V> {
        let snapshot: Vec<Vertex<V>> = {
            let state = self.state.read();
            state.vertices.values().cloned().collect()
        };
        Box::new(snapshot.into_iter().map(Ok))
    }

    fn edge(&self, source: &K, target: &K) -> Result<Edge<K, E>, Error<K>> {
        let state = self.state.read();
        let Some(stored) = find_edge(&state, source, target) else {
            return Err(Error::EdgeNotFound {
                source: source.clone(),
                target: target.clone(),
            });
        };
        // Orient the copy as requested, which matters when the stored
        // direction of an undirected edge is the reverse one.
        Ok(Edge {
            source: source.clone(),
            target: target.clone(),
            properties: stored.properties.clone(),
        })
    }

    fn edges(&self) -> EdgeIter<'_, K, E> {
        let snapshot: Vec<Edge<K, E>> = {
            let state = self.state.read();
            state
                .out_edges
                .values()
                .flat_map(|out| out.values().cloned())
                .collect()
        };
        Box::new(snapshot.into_iter().map(Ok))
    }

    fn order(&self) -> usize {
        self.state.read().vertices.len()
    }

    fn size(&self) -> usize {
        self.state.read().edge_count
    }
}

impl<K: GraphKey, V: Clone, E: Clone> GraphWrite<K, V, E> for MemoryGraph<K, V, E> {
    fn add_vertex_with(&self, value: V, properties: VertexProperties) -> Result<(), Error<K>> {
        let key = (self.hash)(&value);
        let mut state = self.state.write();

        if state.vertices.contains_key(&key) {
            if state.traits.allow_duplicate_add {
                return Ok(());
            }
            return Err(Error::VertexAlreadyExists { key });
        }

        if !state.traits.is_vertices_weighted && properties.weight != 0.0 {
            state.traits.is_vertices_weighted = true;
        }

        trace!(key = ?key, "add vertex");
        state.vertices.insert(key, Vertex { value, properties });
        Ok(())
    }

    fn update_vertex(
        &self,
        key: &K,
        update: impl FnOnce(&mut Vertex<V>),
    ) -> Result<(), Error<K>> {
        let mut state = self.state.write();
        let Some(vertex) = state.vertices.get_mut(key) else {
            return Err(Error::VertexNotFound { key: key.clone() });
        };

        let backup = vertex.clone();
        update(vertex);

        let new_key = (self.hash)(&vertex.value);
        if new_key != *key {
            *vertex = backup;
            return Err(Error::UpdateChangedKey {
                old: key.clone(),
                new: new_key,
            });
        }
        Ok(())
    }

    fn remove_vertex(&self, key: &K) -> Result<(), Error<K>> {
        let mut state = self.state.write();
        if !state.vertices.contains_key(key) {
            return Err(Error::VertexNotFound { key: key.clone() });
        }

        let count = state.out_edges.get(key).map_or(0, |out| out.len())
            + state.in_edges.get(key).map_or(0, |incoming| incoming.len());
        if count > 0 {
            return Err(Error::VertexHasEdges {
                key: key.clone(),
                count,
            });
        }

        trace!(key = ?key, "remove vertex");
        state.vertices.remove(key);
        // The adjacency buckets are empty at this point; drop them too.
        state.out_edges.remove(key);
        state.in_edges.remove(key);
        Ok(())
    }

    fn add_edge_with(
        &self,
        source: K,
        target: K,
        properties: EdgeProperties<E>,
    ) -> Result<(), Error<K>> {
        let mut state = self.state.write();

        if !state.vertices.contains_key(&source) {
            return Err(Error::VertexNotFound { key: source });
        }
        if !state.vertices.contains_key(&target) {
            return Err(Error::VertexNotFound { key: target });
        }

        if find_edge(&state, &source, &target).is_some() {
            if state.traits.allow_duplicate_add {
                return Ok(());
            }
            return Err(Error::EdgeAlreadyExists { source, target });
        }

        if state.traits.prevent_cycles
            && state.traits.is_directed
            && creates_cycle_in(&state, &source, &target)
        {
            return Err(Error::EdgeCausesCycle { source, target });
        }

        if !state.traits.is_edges_weighted && properties.weight != 0.0 {
            state.traits.is_edges_weighted = true;
        }

        trace!(source = ?source, target = ?target, "add edge");
        state
            .in_edges
            .entry(target.clone())
            .or_default()
            .insert(source.clone());
        state.out_edges.entry(source.clone()).or_default().insert(
            target.clone(),
            Edge {
                source,
                target,
                properties,
            },
        );
        state.edge_count += 1;
        Ok(())
    }

    fn update_edge(
        &self,
        source: &K,
        target: &K,
        update: impl FnOnce(&mut EdgeProperties<E>),
    ) -> Result<(), Error<K>> {
        let mut state = self.state.write();
        let Some(stored) = find_edge(&state, source, target) else {
            return Err(Error::EdgeNotFound {
                source: source.clone(),
                target: target.clone(),
            });
        };

        let (stored_source, stored_target) = (stored.source.clone(), stored.target.clone());
        let Some(edge) = state
            .out_edges
            .get_mut(&stored_source)
            .and_then(|out| out.get_mut(&stored_target))
        else {
            return Err(Error::EdgeNotFound {
                source: source.clone(),
                target: target.clone(),
            });
        };
        update(&mut edge.properties);
        Ok(())
    }

    fn remove_edge(&self, source: &K, target: &K) -> Result<(), Error<K>> {
        let mut state = self.state.write();
        let Some(stored) = find_edge(&state, source, target) else {
            return Err(Error::EdgeNotFound {
                source: source.clone(),
                target: target.clone(),
            });
        };

        // Remove through the stored orientation, which may be the reverse
        // of the requested pair on undirected graphs.
        let (stored_source, stored_target) = (stored.source.clone(), stored.target.clone());
        trace!(source = ?stored_source, target = ?stored_target, "remove edge");
        if let Some(out) = state.out_edges.get_mut(&stored_source) {
            out.remove(&stored_target);
        }
        if let Some(incoming) = state.in_edges.get_mut(&stored_target) {
            incoming.remove(&stored_source);
        }
        state.edge_count -= 1;
        Ok(())
    }
}

impl<K: GraphKey, V: Clone, E: Clone> GraphBulk<K, V, E> for MemoryGraph<K, V, E> {
    fn add_vertices(&self, vertices: Vec<Vertex<V>>) -> Result<(), Error<K>> {
        let mut state = self.state.write();

        // Validate everything against the pre-batch state, then commit.
        let mut staged: FxHashMap<K, Vertex<V>> =
            FxHashMap::with_capacity_and_hasher(vertices.len(), rustc_hash::FxBuildHasher);
        for vertex in vertices {
            let key = (self.hash)(&vertex.value);
            if state.vertices.contains_key(&key) {
                if state.traits.allow_duplicate_add {
                    continue;
                }
                return Err(Error::VertexAlreadyExists { key });
            }
            staged.insert(key, vertex);
        }

        for (key, vertex) in staged {
            if !state.traits.is_vertices_weighted && vertex.properties.weight != 0.0 {
                state.traits.is_vertices_weighted = true;
            }
            state.vertices.insert(key, vertex);
        }
        Ok(())
    }

    fn add_edges(&self, edges: Vec<Edge<K, E>>) -> Result<(), Error<K>> {
        let mut state = self.state.write();

        // Validation pass against the pre-batch state. Edges that only
        // form a cycle together with other edges of the same batch are
        // accepted.
        let mut staged: Vec<Edge<K, E>> = Vec::with_capacity(edges.len());
        for edge in edges {
            if !state.vertices.contains_key(&edge.source) {
                return Err(Error::VertexNotFound { key: edge.source });
            }
            if !state.vertices.contains_key(&edge.target) {
                return Err(Error::VertexNotFound { key: edge.target });
            }
            if find_edge(&state, &edge.source, &edge.target).is_some() {
                if state.traits.allow_duplicate_add {
                    continue;
                }
                return Err(Error::EdgeAlreadyExists {
                    source: edge.source,
                    target: edge.target,
                });
            }
            if state.traits.prevent_cycles
                && state.traits.is_directed
                && creates_cycle_in(&state, &edge.source, &edge.target)
            {
                return Err(Error::EdgeCausesCycle {
                    source: edge.source,
                    target: edge.target,
                });
            }
            staged.push(edge);
        }

        for edge in staged {
            if !state.traits.is_edges_weighted && edge.properties.weight != 0.0 {
                state.traits.is_edges_weighted = true;
            }
            state
                .in_edges
                .entry(edge.target.clone())
                .or_default()
                .insert(edge.source.clone());
            let replaced = state
                .out_edges
                .entry(edge.source.clone())
                .or_default()
                .insert(edge.target.clone(), edge);
            // Duplicates within the batch collapse onto one stored edge.
            if replaced.is_none() {
                state.edge_count += 1;
            }
        }
        Ok(())
    }
}

impl<K: GraphKey, V: Clone, E: Clone> GraphRelations<K, E> for MemoryGraph<K, V, E> {
    fn adjacency_map(&self) -> Result<RelationMap<K, E>, Error<K>> {
        Ok(adjacency_of(&self.state.read()))
    }

    fn predecessor_map(&self) -> Result<RelationMap<K, E>, Error<K>> {
        Ok(predecessors_of(&self.state.read()))
    }
}

impl<K: GraphKey, V: Clone, E: Clone> GraphNeighbors<K, E> for MemoryGraph<K, V, E> {
    fn downstream_neighbors(&self, key: &K) -> EdgeIter<'_, K, E> {
        let snapshot: Vec<Edge<K, E>> = {
            let state = self.state.read();
            let mut edges: Vec<Edge<K, E>> = state
                .out_edges
                .get(key)
                .map(|out| out.values().cloned().collect())
                .unwrap_or_default();
            if !state.traits.is_directed {
                if let Some(incoming) = state.in_edges.get(key) {
                    for other in incoming {
                        // Self-loops were already collected from the
                        // out-index.
                        if other == key {
                            continue;
                        }
                        if let Some(edge) =
                            state.out_edges.get(other).and_then(|out| out.get(key))
                        {
                            edges.push(Edge {
                                source: key.clone(),
                                target: other.clone(),
                                properties: edge.properties.clone(),
                            });
                        }
                    }
                }
            }
            edges
        };
        Box::new(snapshot.into_iter().map(Ok))
    }

    fn upstream_neighbors(&self, key: &K) -> EdgeIter<'_, K, E> {
        let snapshot: Vec<Edge<K, E>> = {
            let state = self.state.read();
            let mut edges: Vec<Edge<K, E>> = Vec::new();
            if let Some(incoming) = state.in_edges.get(key) {
                for other in incoming {
                    if let Some(edge) = state.out_edges.get(other).and_then(|out| out.get(key)) {
                        edges.push(edge.clone());
                    }
                }
            }
            if !state.traits.is_directed {
                if let Some(out) = state.out_edges.get(key) {
                    for (other, edge) in out {
                        if other == key {
                            continue;
                        }
                        edges.push(Edge {
                            source: other.clone(),
                            target: key.clone(),
                            properties: edge.properties.clone(),
                        });
                    }
                }
            }
            edges
        };
        Box::new(snapshot.into_iter().map(Ok))
    }
}

impl<K: GraphKey, V: Clone, E: Clone> GraphCycles<K> for MemoryGraph<K, V, E> {
    /// Fast cycle test over the in-edge index. Unlike the generic
    /// fallback, no relation map is materialised.
    fn creates_cycle(&self, source: &K, target: &K) -> Result<bool, Error<K>> {
        if source == target {
            return Ok(true);
        }
        Ok(creates_cycle_in(&self.state.read(), source, target))
    }
}

impl<K: GraphKey, V: Clone, E: Clone> GraphWalker<K, E> for MemoryGraph<K, V, E> {
    fn walk(
        &self,
        direction: WalkDirection,
        order: WalkOrder,
        start: &K,
        visitor: &mut dyn FnMut(&[K], Option<&Error<K>>) -> WalkControl<K>,
        ordering: Option<EdgeOrdering<'_, K, E>>,
    ) -> Result<(), Error<K>> {
        let relations = {
            let state = self.state.read();
            match direction {
                WalkDirection::Down => adjacency_of(&state),
                WalkDirection::Up => predecessors_of(&state),
            }
        };
        walk_relation_map(&relations, order, start, visitor, ordering)
    }
}

// Compile-time check: MemoryGraph must be Send + Sync.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MemoryGraph<u64, u64, ()>>();
};
