//! Error types for `PerunGraph`.
//!
//! This module provides a single closed error enum for all graph operations.
//! Every variant carries the keys it relates to, and maps onto a flat
//! [`ErrorKind`] discriminator so callers can react to classes of failure
//! without destructuring:
//!
//! ```rust,ignore
//! match g.add_edge("A".into(), "B".into()) {
//!     Err(e) if e.kind() == ErrorKind::EdgeCausesCycle => retry_later(),
//!     other => other?,
//! }
//! ```

use thiserror::Error;

/// Errors that can occur in graph operations.
///
/// `K` is the vertex key type of the graph the error originated from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error<K: std::fmt::Debug> {
    /// A vertex with the same key is already present.
    #[error("vertex {key:?} already exists")]
    VertexAlreadyExists {
        /// Key derived from the rejected value.
        key: K,
    },

    /// No vertex is stored under the given key.
    #[error("vertex {key:?} not found")]
    VertexNotFound {
        /// The missing key.
        key: K,
    },

    /// An edge between the two vertices is already present.
    ///
    /// For undirected graphs this also covers the reversed pair.
    #[error("edge {source:?} -> {target:?} already exists")]
    EdgeAlreadyExists {
        /// Source key of the rejected edge.
        source: K,
        /// Target key of the rejected edge.
        target: K,
    },

    /// No edge joins the two vertices.
    #[error("edge {source:?} -> {target:?} not found")]
    EdgeNotFound {
        /// Requested source key.
        source: K,
        /// Requested target key.
        target: K,
    },

    /// The vertex still participates in edges and cannot be removed.
    #[error("vertex {key:?} has {count} connected edges")]
    VertexHasEdges {
        /// Key of the still-connected vertex.
        key: K,
        /// Number of edges referencing the vertex.
        count: usize,
    },

    /// Adding the edge would close a directed cycle on a graph with
    /// cycle prevention enabled.
    #[error("edge {source:?} -> {target:?} would create a cycle")]
    EdgeCausesCycle {
        /// Source key of the rejected edge.
        source: K,
        /// Target key of the rejected edge.
        target: K,
    },

    /// A vertex update mutated the value in a way that changed its key.
    /// The vertex is left unchanged.
    #[error("vertex key changed from {old:?} to {new:?} during update")]
    UpdateChangedKey {
        /// Key the vertex is stored under.
        old: K,
        /// Key the mutated value hashes to.
        new: K,
    },

    /// The target vertex is not reachable from the shortest-path source.
    #[error("target vertex not reachable from source")]
    TargetNotReachable,

    /// The graph contains a negative-weight cycle (Bellman-Ford).
    #[error("graph contains a negative-weight cycle")]
    NegativeCycle,

    /// The graph contains a cycle where an acyclic one is required
    /// (topological sort, transitive reduction).
    #[error("graph contains a cycle")]
    GraphHasCycle,

    /// Internal stack invariant violated during path enumeration.
    #[error("internal path stack is empty")]
    EmptyStack,
}

/// Kind-only discriminator for [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::VertexAlreadyExists`].
    VertexAlreadyExists,
    /// See [`Error::VertexNotFound`].
    VertexNotFound,
    /// See [`Error::EdgeAlreadyExists`].
    EdgeAlreadyExists,
    /// See [`Error::EdgeNotFound`].
    EdgeNotFound,
    /// See [`Error::VertexHasEdges`].
    VertexHasEdges,
    /// See [`Error::EdgeCausesCycle`].
    EdgeCausesCycle,
    /// See [`Error::UpdateChangedKey`].
    UpdateChangedKey,
    /// See [`Error::TargetNotReachable`].
    TargetNotReachable,
    /// See [`Error::NegativeCycle`].
    NegativeCycle,
    /// See [`Error::GraphHasCycle`].
    GraphHasCycle,
    /// See [`Error::EmptyStack`].
    EmptyStack,
}

impl<K: std::fmt::Debug> Error<K> {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::VertexAlreadyExists { .. } => ErrorKind::VertexAlreadyExists,
            Self::VertexNotFound { .. } => ErrorKind::VertexNotFound,
            Self::EdgeAlreadyExists { .. } => ErrorKind::EdgeAlreadyExists,
            Self::EdgeNotFound { .. } => ErrorKind::EdgeNotFound,
            Self::VertexHasEdges { .. } => ErrorKind::VertexHasEdges,
            Self::EdgeCausesCycle { .. } => ErrorKind::EdgeCausesCycle,
            Self::UpdateChangedKey { .. } => ErrorKind::UpdateChangedKey,
            Self::TargetNotReachable => ErrorKind::TargetNotReachable,
            Self::NegativeCycle => ErrorKind::NegativeCycle,
            Self::GraphHasCycle => ErrorKind::GraphHasCycle,
            Self::EmptyStack => ErrorKind::EmptyStack,
        }
    }

    /// Returns true if this error is the given kind.
    #[must_use]
    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }
}
