//! # `PerunGraph`
//!
//! Generic, strongly-typed in-memory graph data structures and the
//! classical algorithms that operate on them.
//!
//! `PerunGraph` is built to be embedded in larger systems (dependency
//! resolvers, build planners, orchestration engines) that need to model
//! relationships and run standard graph analyses over them.
//!
//! ## Features
//!
//! - **Typed graphs**: vertices of any value type `V`, identified by a
//!   caller-supplied projection to a comparable key `K`, with opaque
//!   per-edge payloads `E`
//! - **Thread-safe store**: [`MemoryGraph`] keeps bidirectional adjacency
//!   indexes consistent behind a single readers/writer lock
//! - **Structural invariants**: unique vertices and edges, existence
//!   checks, disconnection before removal, optional cycle prevention
//! - **Algorithms**: topological sort, transitive reduction, strongly
//!   connected components, Dijkstra and Bellman-Ford shortest paths,
//!   Kruskal spanning trees, cycle tests, all-simple-paths, BFS/DFS, and
//!   ordered path walks
//! - **Capability contracts**: every algorithm is written once against
//!   the minimal trait set it needs and composes with any conforming
//!   store
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use perun_graph::{int_hash, shortest_path, GraphWrite, MemoryGraph, Traits};
//!
//! let g: MemoryGraph<i64, i64, ()> =
//!     MemoryGraph::with_traits(int_hash, Traits::default().directed());
//!
//! g.add_vertex(1)?;
//! g.add_vertex(2)?;
//! g.add_vertex(3)?;
//! g.add_edge(1, 2)?;
//! g.add_edge(2, 3)?;
//!
//! let paths = shortest_path(&g, &1);
//! assert_eq!(paths.path(&3)?, vec![1, 2, 3]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod all_paths;
pub mod dag;
pub mod edge;
pub mod error;
pub mod graph;
pub mod hashes;
pub mod memory;
pub mod modification;
pub mod paths;
pub mod scc;
pub mod traits;
pub mod traversal;
pub mod trees;
pub mod vertex;
pub mod walk;

#[cfg(test)]
mod all_paths_tests;
#[cfg(test)]
mod dag_tests;
#[cfg(test)]
mod error_tests;
#[cfg(test)]
mod paths_tests;
#[cfg(test)]
mod scc_tests;
#[cfg(test)]
mod traversal_tests;

pub use all_paths::{all_paths_between, AllPaths};
pub use dag::{stable_topological_sort, topological_sort, transitive_reduction, TopoSort};
pub use edge::{Edge, EdgeProperties};
pub use error::{Error, ErrorKind};
pub use graph::{
    build_adjacency_map, build_predecessor_map, copy_to, EdgeIter, GraphBulk, GraphKey,
    GraphNeighbors, GraphRead, GraphRelations, GraphWrite, RelationMap, VertexIter,
};
pub use hashes::{int_hash, string_hash};
pub use memory::{HashFn, MemoryGraph};
pub use modification::{remove_vertex_and_edges, replace_vertex};
pub use paths::{
    bellman_ford_shortest_path, creates_cycle, dijkstra_shortest_path, path_weight,
    shortest_path, shortest_path_stable, GraphCycles, Path, ShortestPaths,
};
pub use scc::strongly_connected_components;
pub use traits::Traits;
pub use traversal::{bfs, dfs, Bfs, Dfs};
pub use trees::{maximum_spanning_tree, minimum_spanning_tree};
pub use vertex::{Vertex, VertexProperties};
pub use walk::{
    edge_weight_ordering, walk_paths, walk_paths_generic, walk_paths_ordered, walk_relation_map,
    EdgeOrdering, GraphWalker, WalkControl, WalkDirection, WalkOrder,
};
