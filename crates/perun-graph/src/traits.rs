//! Structural traits of a graph.
//!
//! [`Traits`] is a small configuration record fixed at construction and
//! inspected by the algorithms: directed or undirected, cycle prevention,
//! and weighting. The two weighting flags may also be promoted automatically
//! by the store the first time a non-zero weight is added.

use serde::{Deserialize, Serialize};

/// Structural properties of a graph.
///
/// Built with chainable setters and passed to
/// [`MemoryGraph::with_traits`](crate::MemoryGraph::with_traits):
///
/// ```rust,ignore
/// let traits = Traits::default().directed().prevent_cycles();
/// let g: MemoryGraph<i64, i64, ()> = MemoryGraph::with_traits(int_hash, traits);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traits {
    /// Edges are directed; `(A, B)` and `(B, A)` are distinct edges.
    pub is_directed: bool,
    /// Reject edges that would close a directed cycle.
    pub prevent_cycles: bool,
    /// Vertices carry meaningful weights.
    pub is_vertices_weighted: bool,
    /// Edges carry meaningful weights.
    pub is_edges_weighted: bool,
    /// Suppress already-exists errors from add operations; the existing
    /// entity is left untouched.
    pub allow_duplicate_add: bool,
}

impl Traits {
    /// Marks the graph as directed.
    #[must_use]
    pub const fn directed(mut self) -> Self {
        self.is_directed = true;
        self
    }

    /// Enables cycle detection on edge insertion. Edges that would close a
    /// directed cycle are rejected with
    /// [`ErrorKind::EdgeCausesCycle`](crate::ErrorKind::EdgeCausesCycle).
    #[must_use]
    pub const fn prevent_cycles(mut self) -> Self {
        self.prevent_cycles = true;
        self
    }

    /// Declares the vertices as weighted up front. The store also promotes
    /// this flag automatically when a non-zero vertex weight is added.
    #[must_use]
    pub const fn vertices_weighted(mut self) -> Self {
        self.is_vertices_weighted = true;
        self
    }

    /// Declares the edges as weighted up front. The store also promotes
    /// this flag automatically when a non-zero edge weight is added.
    #[must_use]
    pub const fn edges_weighted(mut self) -> Self {
        self.is_edges_weighted = true;
        self
    }

    /// Makes repeated adds of an existing vertex or edge a no-op instead
    /// of an error.
    #[must_use]
    pub const fn allow_duplicate_add(mut self) -> Self {
        self.allow_duplicate_add = true;
        self
    }

    /// Returns the `(vertices, edges)` weighting flags as a pair.
    #[must_use]
    pub const fn is_weighted(&self) -> (bool, bool) {
        (self.is_vertices_weighted, self.is_edges_weighted)
    }
}
