//! Algorithms on directed acyclic graphs.
//!
//! [`topological_sort`] and [`stable_topological_sort`] implement Kahn's
//! algorithm over a predecessor map; [`transitive_reduction`] removes
//! redundant edges while preserving reachability.

use crate::error::Error;
use crate::graph::{GraphKey, GraphRead, GraphRelations, GraphWrite, RelationMap};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::collections::VecDeque;
use tracing::debug;

/// Lazy topological ordering produced by [`topological_sort`] or
/// [`stable_topological_sort`]. The predecessor map is consumed as the
/// iterator advances.
pub struct TopoSort<K: GraphKey + 'static, E> {
    predecessors: RelationMap<K, E>,
    queue: VecDeque<K>,
    seen: FxHashSet<K>,
    compare: Option<Box<dyn Fn(&K, &K) -> Ordering>>,
    /// The input was a successor-keyed (adjacency) view; tie-breaking is
    /// mirrored so the caller-visible order stays in the natural sense.
    inverted: bool,
    emit_on_cycle: bool,
    done: bool,
}

impl<K: GraphKey + 'static, E> TopoSort<K, E> {
    fn new(
        mut predecessors: RelationMap<K, E>,
        compare: Option<Box<dyn Fn(&K, &K) -> Ordering>>,
        emit_on_cycle: bool,
    ) -> Self {
        let mut seen = FxHashSet::default();
        let mut ready: Vec<K> = predecessors
            .iter()
            .filter(|(_, entries)| entries.is_empty())
            .map(|(key, _)| key.clone())
            .collect();
        for key in &ready {
            predecessors.remove(key);
            seen.insert(key.clone());
        }

        // A reversed (successor-keyed) map is detectable by comparing any
        // stored edge's target with its inner key.
        let mut inverted = false;
        'detect: for entries in predecessors.values() {
            for (inner, edge) in entries {
                inverted = edge.target == *inner;
                break 'detect;
            }
        }

        let compare = compare.map(|cmp| {
            if inverted {
                Box::new(move |a: &K, b: &K| cmp(b, a)) as Box<dyn Fn(&K, &K) -> Ordering>
            } else {
                cmp
            }
        });
        if let Some(cmp) = &compare {
            ready.sort_by(|a, b| cmp(a, b));
        }

        Self {
            predecessors,
            queue: ready.into(),
            seen,
            compare,
            inverted,
            emit_on_cycle,
            done: false,
        }
    }

    /// Picks the remaining vertex with the fewest outstanding
    /// predecessors, ties broken by the comparator. Used when a cycle
    /// blocks the queue and the stable variant keeps emitting.
    fn least_blocked(&self) -> Option<K> {
        let mut remaining: Vec<&K> = self.predecessors.keys().collect();
        remaining.sort_by(|a, b| {
            let a_count = self.predecessors.get(*a).map_or(0, |p| p.len());
            let b_count = self.predecessors.get(*b).map_or(0, |p| p.len());
            if a_count != b_count {
                if self.inverted {
                    return b_count.cmp(&a_count);
                }
                return a_count.cmp(&b_count);
            }
            match &self.compare {
                Some(cmp) => cmp(a, b),
                None => Ordering::Equal,
            }
        });
        remaining.first().map(|key| (*key).clone())
    }
}

impl<K: GraphKey + 'static, E> Iterator for TopoSort<K, E> {
    type Item = Result<K, Error<K>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = match self.queue.pop_front() {
            Some(key) => key,
            None => {
                if self.predecessors.is_empty() {
                    self.done = true;
                    return None;
                }
                if !self.emit_on_cycle {
                    self.done = true;
                    return Some(Err(Error::GraphHasCycle));
                }
                let key = self.least_blocked()?;
                self.seen.insert(key.clone());
                self.predecessors.remove(&key);
                key
            }
        };

        // Unblock every vertex that waited on the current one; those with
        // no predecessors left form the next frontier.
        let mut emptied: Vec<K> = Vec::new();
        for (vertex, entries) in &mut self.predecessors {
            entries.remove(&current);
            if entries.is_empty() {
                emptied.push(vertex.clone());
            }
        }
        let mut frontier: Vec<K> = Vec::new();
        for vertex in emptied {
            if !self.seen.insert(vertex.clone()) {
                continue;
            }
            self.predecessors.remove(&vertex);
            frontier.push(vertex);
        }
        if let Some(cmp) = &self.compare {
            frontier.sort_by(|a, b| cmp(a, b));
        }
        self.queue.extend(frontier);

        Some(Ok(current))
    }
}

/// Topologically sorts a directed graph given its predecessor map, using
/// Kahn's algorithm. The map is consumed.
///
/// The order between independent vertices is unspecified; use
/// [`stable_topological_sort`] for a deterministic order. If the graph
/// contains a cycle, the iterator yields a terminal
/// [`Error::GraphHasCycle`] item once the acyclic prefix is exhausted.
#[must_use]
pub fn topological_sort<K: GraphKey + 'static, E>(predecessors: RelationMap<K, E>) -> TopoSort<K, E> {
    TopoSort::new(predecessors, None, false)
}

/// Like [`topological_sort`], but sorts every frontier with the given
/// comparator for a stable, deterministic order.
///
/// Passing an adjacency (successor-keyed) map instead of a predecessor map
/// is detected and produces the reverse topological order while the
/// comparator keeps its natural sense. On a cycle, this variant does not
/// fail: it emits the remaining vertex with the fewest outstanding
/// predecessors and keeps going.
#[must_use]
pub fn stable_topological_sort<K: GraphKey + 'static, E>(
    predecessors: RelationMap<K, E>,
    compare: impl Fn(&K, &K) -> Ordering + 'static,
) -> TopoSort<K, E> {
    TopoSort::new(predecessors, Some(Box::new(compare)), true)
}

/// Reduces the graph to the minimal edge set with the same reachability.
/// The graph must be directed and acyclic.
///
/// For each vertex, a depth-first search runs from each of its direct
/// successors; any direct edge to a vertex the search reaches is
/// redundant and removed. Runs in O(V·(V+E)).
///
/// # Errors
///
/// Returns [`Error::GraphHasCycle`] if a cycle is encountered; the graph
/// may have been partially reduced at that point.
pub fn transitive_reduction<K, V, E, G>(g: &G) -> Result<(), Error<K>>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphWrite<K, V, E> + GraphRelations<K, E>,
{
    let adjacency = g.adjacency_map()?;
    debug!(order = adjacency.len(), "transitive reduction");

    for (vertex, successors) in &adjacency {
        for successor in successors.keys() {
            let mut stack: Vec<K> = vec![successor.clone()];
            let mut visited: FxHashSet<K> = FxHashSet::default();

            while let Some(current) = stack.pop() {
                if visited.contains(&current) {
                    continue;
                }
                visited.insert(current.clone());
                stack.push(current.clone());

                let Some(reachable) = adjacency.get(&current) else {
                    continue;
                };
                for next in reachable.keys() {
                    if visited.contains(next) {
                        if stack.contains(next) {
                            return Err(Error::GraphHasCycle);
                        }
                        continue;
                    }
                    if successors.contains_key(next) {
                        // Reachable transitively, so the direct edge is
                        // redundant. It may already be gone.
                        let _ = g.remove_edge(vertex, next);
                    }
                    stack.push(next.clone());
                }
            }
        }
    }

    Ok(())
}
