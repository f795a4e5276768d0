//! Capability contracts implemented by graph stores.
//!
//! Each algorithm in this crate is written once against the minimal set of
//! capabilities it needs, so it composes with any conforming store:
//!
//! - [`GraphRead`]: lookup, enumeration, counts, traits, hashing
//! - [`GraphWrite`]: add/update/remove for vertices and edges
//! - [`GraphBulk`]: atomic bulk insertion
//! - [`GraphRelations`]: adjacency and predecessor map materialisation
//! - [`GraphNeighbors`]: downstream/upstream edge iteration
//!
//! Two further capabilities live next to their algorithms:
//! [`GraphCycles`](crate::GraphCycles) in `paths` and
//! [`GraphWalker`](crate::GraphWalker) in `walk`. Stores may specialise any
//! of these; the free functions [`build_adjacency_map`] and
//! [`build_predecessor_map`] provide the generic fallback for stores that
//! only implement [`GraphRead`].

use crate::edge::{Edge, EdgeProperties};
use crate::error::Error;
use crate::traits::Traits;
use crate::vertex::{Vertex, VertexProperties};
use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Bounds every vertex key type must satisfy.
///
/// Blanket-implemented for all conforming types; never implement it
/// manually.
pub trait GraphKey: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> GraphKey for T {}

/// Lazy sequence of vertices. Errors are in-band and terminal: an
/// implementation yields at most one `Err` item and then stops.
pub type VertexIter<'a, K, V> = Box<dyn Iterator<Item = Result<Vertex<V>, Error<K>>> + 'a>;

/// Lazy sequence of edges. Errors are in-band and terminal.
pub type EdgeIter<'a, K, E> = Box<dyn Iterator<Item = Result<Edge<K, E>, Error<K>>> + 'a>;

/// Two-level relation map: for every vertex, its related edges keyed by the
/// neighbor on the other end. Every vertex has an entry, possibly empty.
pub type RelationMap<K, E> = FxHashMap<K, FxHashMap<K, Edge<K, E>>>;

/// Read capabilities of a graph.
pub trait GraphRead<K: GraphKey, V, E> {
    /// Derives the key for a vertex value through the graph's hashing
    /// function. Pure projection; does not touch the store.
    fn key_of(&self, value: &V) -> K;

    /// Returns the structural traits of the graph.
    fn traits(&self) -> Traits;

    /// Returns the vertex stored under the given key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if no such vertex exists.
    fn vertex(&self, key: &K) -> Result<Vertex<V>, Error<K>>;

    /// Returns all vertices in unspecified order.
    fn vertices(&self) -> VertexIter<'_, K, V>;

    /// Returns the edge joining the two given vertices. For undirected
    /// graphs the reversed pair also matches, and the returned edge is
    /// oriented as requested.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeNotFound`] if no such edge exists.
    fn edge(&self, source: &K, target: &K) -> Result<Edge<K, E>, Error<K>>;

    /// Returns all edges in unspecified order. Undirected graphs yield
    /// each logical edge exactly once, in its stored orientation.
    fn edges(&self) -> EdgeIter<'_, K, E>;

    /// Returns the number of vertices. Constant time.
    fn order(&self) -> usize;

    /// Returns the number of edges. Constant time.
    fn size(&self) -> usize;
}

/// Write capabilities of a graph.
pub trait GraphWrite<K: GraphKey, V, E>: GraphRead<K, V, E> {
    /// Adds a vertex with the given properties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexAlreadyExists`] if the derived key is taken,
    /// unless the graph was built with
    /// [`Traits::allow_duplicate_add`](crate::Traits::allow_duplicate_add).
    fn add_vertex_with(&self, value: V, properties: VertexProperties) -> Result<(), Error<K>>;

    /// Adds a vertex with zeroed properties.
    ///
    /// # Errors
    ///
    /// Same as [`GraphWrite::add_vertex_with`].
    fn add_vertex(&self, value: V) -> Result<(), Error<K>> {
        self.add_vertex_with(value, VertexProperties::default())
    }

    /// Mutates the vertex stored under `key` in place. If the mutation
    /// changes the value such that its derived key differs from `key`, the
    /// update is rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if the vertex is absent, or
    /// [`Error::UpdateChangedKey`] if the mutation changed the key.
    fn update_vertex(
        &self,
        key: &K,
        update: impl FnOnce(&mut Vertex<V>),
    ) -> Result<(), Error<K>>;

    /// Removes the vertex stored under `key`. The vertex must be
    /// disconnected; remove its edges first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if the vertex is absent, or
    /// [`Error::VertexHasEdges`] if any edge still references it.
    fn remove_vertex(&self, key: &K) -> Result<(), Error<K>>;

    /// Adds an edge between the two given vertices with the given
    /// properties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if either endpoint is absent,
    /// [`Error::EdgeAlreadyExists`] on duplicates (unless duplicate adds
    /// are allowed), and [`Error::EdgeCausesCycle`] if cycle prevention is
    /// enabled and the edge would close a directed cycle.
    fn add_edge_with(
        &self,
        source: K,
        target: K,
        properties: EdgeProperties<E>,
    ) -> Result<(), Error<K>>;

    /// Adds an edge with zeroed properties.
    ///
    /// # Errors
    ///
    /// Same as [`GraphWrite::add_edge_with`].
    fn add_edge(&self, source: K, target: K) -> Result<(), Error<K>>
    where
        E: Default,
    {
        self.add_edge_with(source, target, EdgeProperties::default())
    }

    /// Mutates the properties of the stored edge in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeNotFound`] if the edge is absent.
    fn update_edge(
        &self,
        source: &K,
        target: &K,
        update: impl FnOnce(&mut EdgeProperties<E>),
    ) -> Result<(), Error<K>>;

    /// Removes the edge joining the two given vertices, matching either
    /// orientation on undirected graphs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeNotFound`] if the edge is absent.
    fn remove_edge(&self, source: &K, target: &K) -> Result<(), Error<K>>;
}

/// Atomic bulk insertion.
///
/// Both operations validate every item first and only then commit; a single
/// rejection aborts the whole batch with no side effects.
pub trait GraphBulk<K: GraphKey, V, E>: GraphWrite<K, V, E> {
    /// Adds all given vertices, or none.
    ///
    /// # Errors
    ///
    /// Returns the first validation error; the graph is unchanged.
    fn add_vertices(&self, vertices: Vec<Vertex<V>>) -> Result<(), Error<K>>;

    /// Adds all given edges, or none.
    ///
    /// # Errors
    ///
    /// Returns the first validation error; the graph is unchanged.
    fn add_edges(&self, edges: Vec<Edge<K, E>>) -> Result<(), Error<K>>;
}

/// Materialisation of the relation maps most algorithms consume.
///
/// Stores that can build these from their own indexes should implement this
/// directly; [`build_adjacency_map`] and [`build_predecessor_map`] derive
/// them from [`GraphRead`] enumeration otherwise.
pub trait GraphRelations<K: GraphKey, E> {
    /// Returns the adjacency map: for every vertex, its outgoing edges
    /// keyed by target. Undirected graphs contain each edge twice, once in
    /// each orientation.
    ///
    /// # Errors
    ///
    /// Forwards enumeration errors of the underlying store.
    fn adjacency_map(&self) -> Result<RelationMap<K, E>, Error<K>>;

    /// Returns the predecessor map: for every vertex, its incoming edges
    /// keyed by source. Identical to the adjacency map for undirected
    /// graphs.
    ///
    /// # Errors
    ///
    /// Forwards enumeration errors of the underlying store.
    fn predecessor_map(&self) -> Result<RelationMap<K, E>, Error<K>>;
}

/// Per-vertex edge iteration without materialising a full relation map.
pub trait GraphNeighbors<K: GraphKey, E> {
    /// Returns the edges leaving the given vertex; every yielded edge has
    /// `source == key`. Undirected graphs yield every incident edge.
    fn downstream_neighbors(&self, key: &K) -> EdgeIter<'_, K, E>;

    /// Returns the edges entering the given vertex; every yielded edge has
    /// `target == key`. Undirected graphs yield every incident edge.
    fn upstream_neighbors(&self, key: &K) -> EdgeIter<'_, K, E>;
}

/// Builds an adjacency map from plain [`GraphRead`] enumeration.
///
/// # Errors
///
/// Forwards the first in-band enumeration error.
pub fn build_adjacency_map<K, V, E, G>(g: &G) -> Result<RelationMap<K, E>, Error<K>>
where
    K: GraphKey,
    E: Clone,
    G: GraphRead<K, V, E>,
{
    let mut adj: RelationMap<K, E> = FxHashMap::default();
    for vertex in g.vertices() {
        let vertex = vertex?;
        adj.entry(g.key_of(&vertex.value)).or_default();
    }
    let undirected = !g.traits().is_directed;
    for edge in g.edges() {
        let edge = edge?;
        if undirected {
            let mut reversed = edge.clone();
            std::mem::swap(&mut reversed.source, &mut reversed.target);
            adj.entry(reversed.source.clone())
                .or_default()
                .insert(reversed.target.clone(), reversed);
        }
        adj.entry(edge.source.clone())
            .or_default()
            .insert(edge.target.clone(), edge);
    }
    Ok(adj)
}

/// Builds a predecessor map from plain [`GraphRead`] enumeration.
///
/// # Errors
///
/// Forwards the first in-band enumeration error.
pub fn build_predecessor_map<K, V, E, G>(g: &G) -> Result<RelationMap<K, E>, Error<K>>
where
    K: GraphKey,
    E: Clone,
    G: GraphRead<K, V, E>,
{
    let mut pred: RelationMap<K, E> = FxHashMap::default();
    for vertex in g.vertices() {
        let vertex = vertex?;
        pred.entry(g.key_of(&vertex.value)).or_default();
    }
    let undirected = !g.traits().is_directed;
    for edge in g.edges() {
        let edge = edge?;
        if undirected {
            let mut reversed = edge.clone();
            std::mem::swap(&mut reversed.source, &mut reversed.target);
            pred.entry(reversed.target.clone())
                .or_default()
                .insert(reversed.source.clone(), reversed);
        }
        pred.entry(edge.target.clone())
            .or_default()
            .insert(edge.source.clone(), edge);
    }
    Ok(pred)
}

/// Copies all vertices and edges of `from` into `to` through the bulk
/// capability. `to` is expected to be empty.
///
/// # Errors
///
/// Forwards enumeration errors of `from` and validation errors of `to`.
pub fn copy_to<K, V, E, F, T>(from: &F, to: &T) -> Result<(), Error<K>>
where
    K: GraphKey,
    F: GraphRead<K, V, E>,
    T: GraphBulk<K, V, E>,
{
    let vertices = from.vertices().collect::<Result<Vec<_>, _>>()?;
    to.add_vertices(vertices)?;
    let edges = from.edges().collect::<Result<Vec<_>, _>>()?;
    to.add_edges(edges)?;
    Ok(())
}
