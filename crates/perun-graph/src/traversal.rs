//! Breadth-first and depth-first traversal.
//!
//! Both traversals operate on an adjacency snapshot and yield each
//! reachable vertex key exactly once. Termination is caller-controlled:
//! dropping the iterator ends the traversal. If the start vertex is
//! absent, the iterator yields a single error item and stops.

use crate::error::Error;
use crate::graph::{GraphKey, GraphRead, GraphRelations};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Iterator over the vertices reachable from a start vertex in
/// depth-first order. Created by [`dfs`].
pub struct Dfs<K: GraphKey> {
    adjacency: FxHashMap<K, Vec<K>>,
    stack: Vec<K>,
    visited: FxHashSet<K>,
    failed: Option<Error<K>>,
}

impl<K: GraphKey> Iterator for Dfs<K> {
    type Item = Result<K, Error<K>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.failed.take() {
            self.stack.clear();
            return Some(Err(err));
        }
        while let Some(current) = self.stack.pop() {
            if !self.visited.insert(current.clone()) {
                continue;
            }
            if let Some(neighbors) = self.adjacency.get(&current) {
                self.stack.extend(neighbors.iter().cloned());
            }
            return Some(Ok(current));
        }
        None
    }
}

/// Iterator over the vertices reachable from a start vertex in
/// breadth-first order. Created by [`bfs`].
pub struct Bfs<K: GraphKey> {
    adjacency: FxHashMap<K, Vec<K>>,
    queue: VecDeque<K>,
    visited: FxHashSet<K>,
    failed: Option<Error<K>>,
}

impl<K: GraphKey> Iterator for Bfs<K> {
    type Item = Result<K, Error<K>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.failed.take() {
            self.queue.clear();
            return Some(Err(err));
        }
        let current = self.queue.pop_front()?;
        if let Some(neighbors) = self.adjacency.get(&current) {
            for neighbor in neighbors {
                // Mark at enqueue time so a vertex is queued at most once.
                if self.visited.insert(neighbor.clone()) {
                    self.queue.push_back(neighbor.clone());
                }
            }
        }
        Some(Ok(current))
    }
}

fn neighbor_snapshot<K, V, E, G>(g: &G) -> Result<FxHashMap<K, Vec<K>>, Error<K>>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphRelations<K, E>,
{
    let adjacency = g.adjacency_map()?;
    Ok(adjacency
        .into_iter()
        .map(|(key, neighbors)| (key, neighbors.into_keys().collect()))
        .collect())
}

/// Depth-first traversal from `start`, yielding each reachable vertex key
/// exactly once. Unreachable vertices are not visited.
///
/// An absent start vertex produces a single
/// [`Error::VertexNotFound`] item.
#[must_use]
pub fn dfs<K, V, E, G>(g: &G, start: &K) -> Dfs<K>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphRelations<K, E>,
{
    let (adjacency, failed) = match neighbor_snapshot(g) {
        Ok(adjacency) if adjacency.contains_key(start) => (adjacency, None),
        Ok(_) => (
            FxHashMap::default(),
            Some(Error::VertexNotFound { key: start.clone() }),
        ),
        Err(e) => (FxHashMap::default(), Some(e)),
    };
    Dfs {
        adjacency,
        stack: if failed.is_none() {
            vec![start.clone()]
        } else {
            Vec::new()
        },
        visited: FxHashSet::default(),
        failed,
    }
}

/// Breadth-first traversal from `start`, yielding each reachable vertex
/// key exactly once. Unreachable vertices are not visited.
///
/// An absent start vertex produces a single
/// [`Error::VertexNotFound`] item.
#[must_use]
pub fn bfs<K, V, E, G>(g: &G, start: &K) -> Bfs<K>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphRelations<K, E>,
{
    let (adjacency, failed) = match neighbor_snapshot(g) {
        Ok(adjacency) if adjacency.contains_key(start) => (adjacency, None),
        Ok(_) => (
            FxHashMap::default(),
            Some(Error::VertexNotFound { key: start.clone() }),
        ),
        Err(e) => (FxHashMap::default(), Some(e)),
    };
    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::new();
    if failed.is_none() {
        visited.insert(start.clone());
        queue.push_back(start.clone());
    }
    Bfs {
        adjacency,
        queue,
        visited,
        failed,
    }
}
