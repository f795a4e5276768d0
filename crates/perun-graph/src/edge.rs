//! Edge entity and its property record.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An edge joining two vertices, referenced by their keys.
///
/// Edges always name a source and a target; whether that distinction is
/// meaningful is determined by the graph's [`Traits`](crate::Traits). For
/// undirected graphs, lookups succeed for either orientation and the
/// returned edge is oriented as requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<K, E> {
    /// Key of the source vertex.
    pub source: K,
    /// Key of the target vertex.
    pub target: K,
    /// Attributes, weight, and payload attached to the edge.
    pub properties: EdgeProperties<E>,
}

impl<K, E> Edge<K, E> {
    /// Creates an edge with zeroed properties.
    #[must_use]
    pub fn new(source: K, target: K) -> Self
    where
        E: Default,
    {
        Self {
            source,
            target,
            properties: EdgeProperties::default(),
        }
    }

    /// Attaches properties to this edge (builder pattern).
    #[must_use]
    pub fn with_properties(mut self, properties: EdgeProperties<E>) -> Self {
        self.properties = properties;
        self
    }
}

/// Properties attached to an edge.
///
/// `E` is an opaque per-edge payload chosen by the caller; the library never
/// inspects it.
///
/// # Example
///
/// ```rust,ignore
/// let props = EdgeProperties::default()
///     .with_weight(2.0)
///     .with_attribute("color", "red");
/// g.add_edge_with("A".to_string(), "B".to_string(), props)?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeProperties<E> {
    /// Free-form string attributes.
    pub attributes: HashMap<String, String>,
    /// Edge weight; 0.0 when the edge is unweighted.
    pub weight: f64,
    /// Opaque per-edge payload.
    pub data: E,
}

impl<E: Default> Default for EdgeProperties<E> {
    fn default() -> Self {
        Self {
            attributes: HashMap::new(),
            weight: 0.0,
            data: E::default(),
        }
    }
}

impl<E> EdgeProperties<E> {
    /// Sets the edge weight (builder pattern).
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Adds a single attribute (builder pattern).
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Replaces the whole attribute map (builder pattern).
    #[must_use]
    pub fn with_attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets the opaque payload (builder pattern).
    #[must_use]
    pub fn with_data(mut self, data: E) -> Self {
        self.data = data;
        self
    }
}
