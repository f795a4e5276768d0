//! Shortest paths and cycle tests.
//!
//! [`shortest_path`] computes single-source shortest paths eagerly and
//! returns a [`ShortestPaths`] handle that reconstructs the path to any
//! target on demand. Directed graphs go through Bellman-Ford (which also
//! detects negative cycles); undirected graphs go through Dijkstra.
//!
//! [`GraphCycles`] is the capability contract for the would-this-edge-
//! close-a-cycle test; [`creates_cycle`] is the generic fallback over a
//! predecessor map.

use crate::error::Error;
use crate::graph::{GraphKey, GraphRead, GraphRelations};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// A path through the graph, as the sequence of visited vertex keys.
pub type Path<K> = Vec<K>;

/// Computes the weight of a path under the graph's weighting rules: edge
/// weights (or 1 per hop for unweighted graphs) plus, on vertex-weighted
/// graphs, the weight of every vertex after the first.
///
/// # Errors
///
/// Returns [`Error::EdgeNotFound`] or [`Error::VertexNotFound`] if the
/// path does not exist in the graph.
pub fn path_weight<K, V, E, G>(g: &G, path: &[K]) -> Result<f64, Error<K>>
where
    K: GraphKey,
    G: GraphRead<K, V, E>,
{
    let (vertices_weighted, edges_weighted) = g.traits().is_weighted();
    let mut weight = 0.0;
    for i in 1..path.len() {
        let edge = g.edge(&path[i - 1], &path[i])?;
        weight += if edges_weighted {
            edge.properties.weight
        } else {
            1.0
        };
        if vertices_weighted {
            weight += g.vertex(&path[i])?.properties.weight;
        }
    }
    Ok(weight)
}

/// Capability contract for graphs that can answer the cycle test more
/// efficiently than the generic [`creates_cycle`] fallback, as the
/// in-memory store does with its in-edge index.
pub trait GraphCycles<K: GraphKey> {
    /// Returns whether adding an edge from `source` to `target` would
    /// introduce a cycle. `source == target` always would.
    ///
    /// # Errors
    ///
    /// Forwards errors of the underlying store.
    fn creates_cycle(&self, source: &K, target: &K) -> Result<bool, Error<K>>;
}

/// Determines whether adding an edge between the two given vertices would
/// introduce a cycle, by walking backwards from `source` through the
/// predecessor map looking for `target`.
///
/// A non-existent `source` has no predecessors and yields `false`.
///
/// # Errors
///
/// Forwards predecessor-map construction errors.
pub fn creates_cycle<K, E, G>(g: &G, source: &K, target: &K) -> Result<bool, Error<K>>
where
    K: GraphKey,
    G: GraphRelations<K, E>,
{
    if source == target {
        return Ok(true);
    }

    let predecessors = g.predecessor_map()?;
    let mut stack: Vec<K> = vec![source.clone()];
    let mut visited: FxHashSet<K> = FxHashSet::default();

    while let Some(current) = stack.pop() {
        if visited.contains(&current) {
            continue;
        }
        // If the target is an ancestor of the source, the proposed edge
        // would close a cycle.
        if current == *target {
            return Ok(true);
        }
        visited.insert(current.clone());

        if let Some(ancestors) = predecessors.get(&current) {
            stack.extend(ancestors.keys().cloned());
        }
    }

    Ok(false)
}

/// Min-heap entry ordered by cost alone, using IEEE 754 total ordering so
/// the heap stays consistent even with infinities.
struct MinEntry<K> {
    cost: f64,
    key: K,
}

impl<K> PartialEq for MinEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cost.to_bits() == other.cost.to_bits()
    }
}

impl<K> Eq for MinEntry<K> {}

impl<K> PartialOrd for MinEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for MinEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the std max-heap pops the cheapest entry first.
        other.cost.total_cmp(&self.cost)
    }
}

/// Eagerly computed single-source shortest paths. Obtained from
/// [`shortest_path`], [`dijkstra_shortest_path`], or
/// [`bellman_ford_shortest_path`]; reconstructs the path to any target by
/// walking the best-predecessor chain backwards.
pub struct ShortestPaths<K: GraphKey> {
    source: K,
    predecessors: FxHashMap<K, K>,
    failed: Option<Error<K>>,
}

impl<K: GraphKey> ShortestPaths<K> {
    fn computed(source: K, predecessors: FxHashMap<K, K>) -> Self {
        Self {
            source,
            predecessors,
            failed: None,
        }
    }

    fn failed(source: K, error: Error<K>) -> Self {
        Self {
            source,
            predecessors: FxHashMap::default(),
            failed: Some(error),
        }
    }

    /// Returns the shortest path from the source to `target`, both
    /// included. The path for `target == source` is the singleton
    /// `[source]`. Among multiple shortest paths, an arbitrary one is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TargetNotReachable`] if no path exists, or the
    /// error encountered during the setup pass.
    pub fn path(&self, target: &K) -> Result<Path<K>, Error<K>> {
        if let Some(error) = &self.failed {
            return Err(error.clone());
        }

        let mut path: Path<K> = Vec::new();
        let mut current = target.clone();
        while current != self.source {
            let Some(previous) = self.predecessors.get(&current) else {
                return Err(Error::TargetNotReachable);
            };
            path.push(current);
            current = previous.clone();
        }
        path.push(self.source.clone());
        path.reverse();
        Ok(path)
    }
}

/// Per-relaxation edge cost: the edge weight (or 1 on unweighted graphs)
/// plus the destination vertex weight on vertex-weighted graphs.
fn step_cost<K: GraphKey>(
    edge_weight: f64,
    destination: &K,
    edges_weighted: bool,
    vertex_weights: &FxHashMap<K, f64>,
) -> f64 {
    let mut cost = if edges_weighted { edge_weight } else { 1.0 };
    cost += vertex_weights.get(destination).copied().unwrap_or(0.0);
    cost
}

fn vertex_weights_of<K, V, E, G>(
    g: &G,
    keys: impl Iterator<Item = K>,
) -> Result<FxHashMap<K, f64>, Error<K>>
where
    K: GraphKey,
    G: GraphRead<K, V, E>,
{
    let mut weights = FxHashMap::default();
    for key in keys {
        let vertex = g.vertex(&key)?;
        weights.insert(key, vertex.properties.weight);
    }
    Ok(weights)
}

/// Computes shortest paths from `source` with Dijkstra's algorithm.
/// Requires non-negative weights.
#[must_use]
pub fn dijkstra_shortest_path<K, V, E, G>(g: &G, source: &K) -> ShortestPaths<K>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphRelations<K, E>,
{
    let adjacency = match g.adjacency_map() {
        Ok(adjacency) => adjacency,
        Err(e) => return ShortestPaths::failed(source.clone(), e),
    };
    let (vertices_weighted, edges_weighted) = g.traits().is_weighted();
    let vertex_weights = if vertices_weighted {
        match vertex_weights_of(g, adjacency.keys().cloned()) {
            Ok(weights) => weights,
            Err(e) => return ShortestPaths::failed(source.clone(), e),
        }
    } else {
        FxHashMap::default()
    };
    debug!(order = adjacency.len(), "dijkstra setup");

    let mut distances: FxHashMap<K, f64> = adjacency
        .keys()
        .map(|key| (key.clone(), f64::INFINITY))
        .collect();
    distances.insert(source.clone(), 0.0);

    let mut queue: BinaryHeap<MinEntry<K>> = distances
        .iter()
        .map(|(key, cost)| MinEntry {
            cost: *cost,
            key: key.clone(),
        })
        .collect();
    let mut best_predecessors: FxHashMap<K, K> = FxHashMap::default();

    while let Some(MinEntry { cost, key: vertex }) = queue.pop() {
        let current = distances.get(&vertex).copied().unwrap_or(f64::INFINITY);
        if cost > current {
            // Stale entry superseded by a cheaper relaxation.
            continue;
        }
        if current.is_infinite() {
            continue;
        }
        let Some(neighbors) = adjacency.get(&vertex) else {
            continue;
        };
        for (adjacent, edge) in neighbors {
            let relaxed = current
                + step_cost(
                    edge.properties.weight,
                    adjacent,
                    edges_weighted,
                    &vertex_weights,
                );
            let best = distances.get(adjacent).copied().unwrap_or(f64::INFINITY);
            if relaxed < best {
                distances.insert(adjacent.clone(), relaxed);
                best_predecessors.insert(adjacent.clone(), vertex.clone());
                queue.push(MinEntry {
                    cost: relaxed,
                    key: adjacent.clone(),
                });
            }
        }
    }

    ShortestPaths::computed(source.clone(), best_predecessors)
}

/// Computes shortest paths from `source` with the Bellman-Ford algorithm
/// in O(|V|·|E|). Handles negative edge weights; a negative cycle is
/// reported through the returned handle. An optional key comparator makes
/// the relaxation order deterministic.
#[must_use]
pub fn bellman_ford_shortest_path<K, V, E, G>(
    g: &G,
    source: &K,
    compare: Option<&dyn Fn(&K, &K) -> Ordering>,
) -> ShortestPaths<K>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphRelations<K, E>,
{
    let adjacency = match g.adjacency_map() {
        Ok(adjacency) => adjacency,
        Err(e) => return ShortestPaths::failed(source.clone(), e),
    };
    let (vertices_weighted, edges_weighted) = g.traits().is_weighted();
    let vertex_weights = if vertices_weighted {
        match vertex_weights_of(g, adjacency.keys().cloned()) {
            Ok(weights) => weights,
            Err(e) => return ShortestPaths::failed(source.clone(), e),
        }
    } else {
        FxHashMap::default()
    };
    debug!(order = adjacency.len(), "bellman-ford setup");

    let mut keys: Vec<K> = adjacency.keys().cloned().collect();
    if let Some(cmp) = compare {
        keys.sort_by(|a, b| cmp(a, b));
    }

    let mut distances: FxHashMap<K, f64> = keys
        .iter()
        .map(|key| (key.clone(), f64::INFINITY))
        .collect();
    distances.insert(source.clone(), 0.0);
    let mut best_predecessors: FxHashMap<K, K> = FxHashMap::default();

    for _ in 1..adjacency.len() {
        for key in &keys {
            let from = distances.get(key).copied().unwrap_or(f64::INFINITY);
            if from.is_infinite() {
                continue;
            }
            let Some(neighbors) = adjacency.get(key) else {
                continue;
            };
            for (adjacent, edge) in neighbors {
                let relaxed = from
                    + step_cost(
                        edge.properties.weight,
                        adjacent,
                        edges_weighted,
                        &vertex_weights,
                    );
                let best = distances.get(adjacent).copied().unwrap_or(f64::INFINITY);
                if relaxed < best {
                    distances.insert(adjacent.clone(), relaxed);
                    best_predecessors.insert(adjacent.clone(), key.clone());
                }
            }
        }
    }

    // One more pass: any further improvement means a negative cycle.
    for (key, neighbors) in &adjacency {
        let from = distances.get(key).copied().unwrap_or(f64::INFINITY);
        if from.is_infinite() {
            continue;
        }
        for (adjacent, edge) in neighbors {
            let relaxed = from
                + step_cost(
                    edge.properties.weight,
                    adjacent,
                    edges_weighted,
                    &vertex_weights,
                );
            if relaxed < distances.get(adjacent).copied().unwrap_or(f64::INFINITY) {
                return ShortestPaths::failed(source.clone(), Error::NegativeCycle);
            }
        }
    }

    ShortestPaths::computed(source.clone(), best_predecessors)
}

/// Computes shortest paths from `source` to every other vertex, choosing
/// the algorithm by the graph's traits: Bellman-Ford for directed graphs,
/// Dijkstra for undirected ones.
///
/// Edge cost is the edge weight when the graph is edge-weighted and 1
/// otherwise, so unweighted graphs yield minimum hop counts. On
/// vertex-weighted graphs the destination vertex weight is added to every
/// step.
#[must_use]
pub fn shortest_path<K, V, E, G>(g: &G, source: &K) -> ShortestPaths<K>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphRelations<K, E>,
{
    if g.traits().is_directed {
        bellman_ford_shortest_path(g, source, None)
    } else {
        dijkstra_shortest_path(g, source)
    }
}

/// Like [`shortest_path`], but relaxes vertices in the order given by the
/// comparator, for a deterministic choice among equal-weight paths.
#[must_use]
pub fn shortest_path_stable<K, V, E, G>(
    g: &G,
    source: &K,
    compare: impl Fn(&K, &K) -> Ordering,
) -> ShortestPaths<K>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphRelations<K, E>,
{
    bellman_ford_shortest_path(g, source, Some(&compare))
}
