//! Generalised path-wise graph walking.
//!
//! [`walk_paths`] visits every loop-free path reachable from a start
//! vertex, downstream or upstream, in BFS or DFS order. The visitor is
//! called once per path and steers the walk through [`WalkControl`],
//! which distinguishes between abandoning a single path and stopping the
//! whole walk.
//!
//! Stores that can produce the relation maps more cheaply than the generic
//! fallback implement [`GraphWalker`]; [`walk_paths`] on such a store is a
//! thin dispatch.

use crate::edge::Edge;
use crate::error::Error;
use crate::graph::{build_adjacency_map, build_predecessor_map, GraphKey, GraphRead, RelationMap};
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Which edges a walk follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkDirection {
    /// Follow outgoing edges.
    Down,
    /// Follow incoming edges.
    Up,
}

/// The order in which pending paths are taken up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    /// Breadth-first: shortest pending path next.
    Bfs,
    /// Depth-first: newest pending path next.
    Dfs,
}

/// Control value returned by a walk visitor.
#[derive(Debug)]
pub enum WalkControl<K: std::fmt::Debug> {
    /// Extend the current path through its neighbors.
    Continue,
    /// Do not extend the current path; keep walking others.
    SkipPath,
    /// Stop the whole walk; the walk returns cleanly.
    SkipAll,
    /// Record an error, hand it to the next visitor call, and keep
    /// extending. If still recorded when the walk drains, it is returned.
    Error(Error<K>),
}

/// Comparator over edges used to order the neighbors of each vertex.
pub type EdgeOrdering<'a, K, E> = &'a dyn Fn(&Edge<K, E>, &Edge<K, E>) -> Ordering;

/// Orders edges by ascending weight; the ready-made ordering for walks
/// that should prefer light edges first.
#[must_use]
pub fn edge_weight_ordering<K, E>(a: &Edge<K, E>, b: &Edge<K, E>) -> Ordering {
    a.properties.weight.total_cmp(&b.properties.weight)
}

/// Walks that have a specialised implementation on the store itself.
pub trait GraphWalker<K: GraphKey, E> {
    /// Walks the graph from `start`, calling `visitor` once per path.
    ///
    /// # Errors
    ///
    /// Returns the error recorded by the last visitor call, if any.
    fn walk(
        &self,
        direction: WalkDirection,
        order: WalkOrder,
        start: &K,
        visitor: &mut dyn FnMut(&[K], Option<&Error<K>>) -> WalkControl<K>,
        ordering: Option<EdgeOrdering<'_, K, E>>,
    ) -> Result<(), Error<K>>;
}

/// Walks through the graph starting at `start`, preferring the store's
/// specialised [`GraphWalker`] implementation.
///
/// The path handed to the visitor is in traversal order (reversed relative
/// to the graph when walking up), so `path[path.len() - 1]` is always the
/// newest vertex. Paths never revisit a vertex. Callers that retain a path
/// beyond the callback must copy it.
///
/// # Errors
///
/// Returns the error recorded by the last visitor call, if any.
pub fn walk_paths<K, E, G>(
    g: &G,
    direction: WalkDirection,
    order: WalkOrder,
    start: &K,
    visitor: &mut dyn FnMut(&[K], Option<&Error<K>>) -> WalkControl<K>,
) -> Result<(), Error<K>>
where
    K: GraphKey,
    G: GraphWalker<K, E>,
{
    g.walk(direction, order, start, visitor, None)
}

/// Like [`walk_paths`], but orders the neighbors of every vertex by the
/// given edge comparator, for a stable traversal.
///
/// # Errors
///
/// Returns the error recorded by the last visitor call, if any.
pub fn walk_paths_ordered<K, E, G>(
    g: &G,
    direction: WalkDirection,
    order: WalkOrder,
    start: &K,
    visitor: &mut dyn FnMut(&[K], Option<&Error<K>>) -> WalkControl<K>,
    ordering: EdgeOrdering<'_, K, E>,
) -> Result<(), Error<K>>
where
    K: GraphKey,
    G: GraphWalker<K, E>,
{
    g.walk(direction, order, start, visitor, Some(ordering))
}

/// Fallback walk for stores without a specialised [`GraphWalker`]: builds
/// the needed relation map through plain enumeration first.
///
/// # Errors
///
/// Forwards map-construction errors, then behaves like [`walk_paths`].
pub fn walk_paths_generic<K, V, E, G>(
    g: &G,
    direction: WalkDirection,
    order: WalkOrder,
    start: &K,
    visitor: &mut dyn FnMut(&[K], Option<&Error<K>>) -> WalkControl<K>,
    ordering: Option<EdgeOrdering<'_, K, E>>,
) -> Result<(), Error<K>>
where
    K: GraphKey,
    E: Clone,
    G: GraphRead<K, V, E>,
{
    let relations = match direction {
        WalkDirection::Down => build_adjacency_map(g)?,
        WalkDirection::Up => build_predecessor_map(g)?,
    };
    walk_relation_map(&relations, order, start, visitor, ordering)
}

/// Returns the neighbor keys of `key`, sorted by the comparator when one
/// is given. `invert` flips the comparator; DFS pops pending paths from
/// the newest end, so inverted insertion keeps the visible order natural.
fn neighbor_keys<K: GraphKey, E>(
    relations: &RelationMap<K, E>,
    key: &K,
    ordering: Option<EdgeOrdering<'_, K, E>>,
    invert: bool,
) -> Vec<K> {
    let Some(neighbors) = relations.get(key) else {
        return Vec::new();
    };
    match ordering {
        None => neighbors.keys().cloned().collect(),
        Some(cmp) => {
            let mut frontier: Vec<(&K, &Edge<K, E>)> = neighbors.iter().collect();
            frontier.sort_by(|(_, e1), (_, e2)| {
                if invert {
                    cmp(e2, e1)
                } else {
                    cmp(e1, e2)
                }
            });
            frontier.into_iter().map(|(k, _)| k.clone()).collect()
        }
    }
}

/// Core walk over an already-materialised relation map.
///
/// # Errors
///
/// Returns the error recorded by the last visitor call, if any.
pub fn walk_relation_map<K: GraphKey, E>(
    relations: &RelationMap<K, E>,
    order: WalkOrder,
    start: &K,
    visitor: &mut dyn FnMut(&[K], Option<&Error<K>>) -> WalkControl<K>,
    ordering: Option<EdgeOrdering<'_, K, E>>,
) -> Result<(), Error<K>> {
    let invert = order == WalkOrder::Dfs;

    // Pending paths form a queue under BFS and a stack under DFS.
    let mut pending: VecDeque<Vec<K>> = VecDeque::new();
    for neighbor in neighbor_keys(relations, start, ordering, invert) {
        if neighbor != *start {
            pending.push_back(vec![start.clone(), neighbor]);
        }
    }

    let mut recorded: Option<Error<K>> = None;

    loop {
        let current = match order {
            WalkOrder::Bfs => pending.pop_front(),
            WalkOrder::Dfs => pending.pop_back(),
        };
        let Some(current) = current else {
            break;
        };

        match visitor(&current, recorded.as_ref()) {
            WalkControl::SkipAll => return Ok(()),
            WalkControl::SkipPath => continue,
            WalkControl::Continue => recorded = None,
            WalkControl::Error(e) => recorded = Some(e),
        }

        let Some(last) = current.last() else {
            continue;
        };
        for neighbor in neighbor_keys(relations, last, ordering, invert) {
            if current.contains(&neighbor) {
                // Prevent loops.
                continue;
            }
            let mut next = current.clone();
            next.push(neighbor);
            pending.push_back(next);
        }
    }

    match recorded {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
