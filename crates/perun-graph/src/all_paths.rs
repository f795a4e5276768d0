//! Enumeration of all simple paths between two vertices.
//!
//! The implementation is non-recursive: a main stack holds the current
//! path while a parallel stack of frontier stacks holds, per layer, the
//! neighbors not yet explored from that layer. Yielded paths are copies
//! of the main stack.

use crate::error::Error;
use crate::graph::{GraphKey, GraphRelations};
use rustc_hash::FxHashMap;

/// Iterator over all simple paths between two vertices. Created by
/// [`all_paths_between`].
pub struct AllPaths<K: GraphKey> {
    adjacency: FxHashMap<K, Vec<K>>,
    start: K,
    end: K,
    /// The current path.
    main: Vec<K>,
    /// One frontier of unexplored neighbors per layer of `main`.
    vice: Vec<Vec<K>>,
    failed: Option<Error<K>>,
}

impl<K: GraphKey> AllPaths<K> {
    /// Pushes `element` onto the path and derives its frontier: all
    /// neighbors not already on the path, except that the endpoints are
    /// admitted once more so cycles back to them can close.
    fn build_layer(&mut self, element: K) {
        let mut frontier: Vec<K> = Vec::new();
        if let Some(neighbors) = self.adjacency.get(&element) {
            for neighbor in neighbors {
                let occurrences = self.main.iter().filter(|k| *k == neighbor).count()
                    + usize::from(*neighbor == element);
                let on_path = occurrences > 0;
                if on_path && (*neighbor != self.start || *neighbor != self.end)
                    || occurrences > 1
                {
                    continue;
                }
                frontier.push(neighbor.clone());
            }
        }
        self.main.push(element);
        self.vice.push(frontier);
    }

    /// Expands the top frontier until it is exhausted, layering each
    /// popped candidate onto the path.
    fn build_stack(&mut self) -> Result<(), Error<K>> {
        if self.main.is_empty() || self.vice.is_empty() {
            return Err(Error::EmptyStack);
        }
        loop {
            let Some(frontier) = self.vice.last_mut() else {
                return Err(Error::EmptyStack);
            };
            let Some(element) = frontier.pop() else {
                break;
            };
            self.build_layer(element);
        }
        Ok(())
    }

    /// Pops one exhausted layer off both stacks.
    fn remove_layer(&mut self) -> Result<(), Error<K>> {
        if self.main.is_empty() || self.vice.is_empty() {
            return Err(Error::EmptyStack);
        }
        if self.vice.last().is_some_and(|frontier| !frontier.is_empty()) {
            return Err(Error::EmptyStack);
        }
        self.main.pop();
        self.vice.pop();
        Ok(())
    }
}

impl<K: GraphKey> Iterator for AllPaths<K> {
    type Item = Result<Vec<K>, Error<K>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.failed.take() {
            self.main.clear();
            self.vice.clear();
            return Some(Err(error));
        }

        while !self.main.is_empty() {
            let top_exhausted = self.vice.last().is_none_or(Vec::is_empty);
            if top_exhausted {
                let complete = self.main.last() == Some(&self.end) && self.main.len() > 1;
                let path = if complete { Some(self.main.clone()) } else { None };
                if let Err(error) = self.remove_layer() {
                    self.main.clear();
                    self.vice.clear();
                    return Some(Err(error));
                }
                if let Some(path) = path {
                    return Some(Ok(path));
                }
            } else if let Err(error) = self.build_stack() {
                self.main.clear();
                self.vice.clear();
                return Some(Err(error));
            }
        }
        None
    }
}

/// Enumerates every simple path from `start` to `end`. Self-loops are
/// permitted only when `start == end`; each path is yielded as a fresh
/// copy.
///
/// Estimated runtime O(n²) in the number of vertices; the full result set
/// can be exponential, so prefer consuming the iterator lazily.
#[must_use]
pub fn all_paths_between<K, E, G>(g: &G, start: &K, end: &K) -> AllPaths<K>
where
    K: GraphKey,
    G: GraphRelations<K, E>,
{
    match g.adjacency_map() {
        Ok(adjacency) => {
            let adjacency: FxHashMap<K, Vec<K>> = adjacency
                .into_iter()
                .map(|(key, neighbors)| (key, neighbors.into_keys().collect()))
                .collect();
            let mut paths = AllPaths {
                adjacency,
                start: start.clone(),
                end: end.clone(),
                main: Vec::new(),
                vice: Vec::new(),
                failed: None,
            };
            paths.build_layer(start.clone());
            paths
        }
        Err(error) => AllPaths {
            adjacency: FxHashMap::default(),
            start: start.clone(),
            end: end.clone(),
            main: Vec::new(),
            vice: Vec::new(),
            failed: Some(error),
        },
    }
}
