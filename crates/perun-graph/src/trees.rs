//! Spanning trees (Kruskal) and the union-find underneath.

use crate::edge::Edge;
use crate::error::Error;
use crate::graph::{GraphKey, GraphRead, GraphRelations, GraphWrite};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Builds a minimum spanning tree of `g` into the empty destination graph
/// `tree`, copying vertices with their properties and the selected edges.
/// A disconnected source produces a spanning forest. The source graph is
/// unchanged.
///
/// # Errors
///
/// Forwards lookup errors of `g` and insertion errors of `tree`.
pub fn minimum_spanning_tree<K, V, E, G, T>(g: &G, tree: &T) -> Result<(), Error<K>>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphRelations<K, E>,
    T: GraphWrite<K, V, E>,
{
    spanning_tree(g, tree, false)
}

/// Like [`minimum_spanning_tree`], but selects the heaviest edges first.
///
/// # Errors
///
/// Forwards lookup errors of `g` and insertion errors of `tree`.
pub fn maximum_spanning_tree<K, V, E, G, T>(g: &G, tree: &T) -> Result<(), Error<K>>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphRelations<K, E>,
    T: GraphWrite<K, V, E>,
{
    spanning_tree(g, tree, true)
}

fn spanning_tree<K, V, E, G, T>(g: &G, tree: &T, maximum: bool) -> Result<(), Error<K>>
where
    K: GraphKey,
    G: GraphRead<K, V, E> + GraphRelations<K, E>,
    T: GraphWrite<K, V, E>,
{
    let adjacency = g.adjacency_map()?;
    debug!(order = adjacency.len(), maximum, "spanning tree");

    let mut edges: Vec<Edge<K, E>> = Vec::new();
    let mut subtrees: UnionFind<K> = UnionFind::new();

    for (key, adjacent) in adjacency {
        let vertex = g.vertex(&key)?;
        tree.add_vertex_with(vertex.value, vertex.properties)?;
        subtrees.add(key);
        edges.extend(adjacent.into_values());
    }

    if maximum {
        edges.sort_by(|a, b| b.properties.weight.total_cmp(&a.properties.weight));
    } else {
        edges.sort_by(|a, b| a.properties.weight.total_cmp(&b.properties.weight));
    }

    for edge in edges {
        // Undirected adjacency lists every edge in both orientations; the
        // union test lets only the first one through.
        if subtrees.union(&edge.source, &edge.target) {
            tree.add_edge_with(edge.source, edge.target, edge.properties)?;
        }
    }

    Ok(())
}

/// Disjoint-set structure over vertex keys with path compression.
#[derive(Debug)]
pub(crate) struct UnionFind<K: GraphKey> {
    parents: FxHashMap<K, K>,
}

impl<K: GraphKey> UnionFind<K> {
    pub(crate) fn new() -> Self {
        Self {
            parents: FxHashMap::default(),
        }
    }

    /// Registers a key as its own singleton component.
    pub(crate) fn add(&mut self, key: K) {
        self.parents.insert(key.clone(), key);
    }

    /// Returns the representative of the component containing `key`,
    /// compressing the path behind it. An unregistered key is its own
    /// representative.
    pub(crate) fn find(&mut self, key: &K) -> K {
        let mut root = key.clone();
        while let Some(parent) = self.parents.get(&root) {
            if *parent == root {
                break;
            }
            root = parent.clone();
        }

        let mut current = key.clone();
        while current != root {
            let Some(parent) = self.parents.get(&current).cloned() else {
                break;
            };
            self.parents.insert(current, root.clone());
            current = parent;
        }

        root
    }

    /// Merges the components of the two keys. Returns true if they were
    /// distinct, false if they already shared a component.
    pub(crate) fn union(&mut self, a: &K, b: &K) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        self.parents.insert(root_b, root_a);
        true
    }
}
