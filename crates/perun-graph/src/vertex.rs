//! Vertex entity and its property record.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A vertex in the graph: a user value plus its properties.
///
/// The vertex is identified within a graph by the key derived from `value`
/// through the graph's hashing function, never by the value itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex<V> {
    /// The user-supplied value.
    pub value: V,
    /// Attributes and weight attached to the vertex.
    pub properties: VertexProperties,
}

impl<V> Vertex<V> {
    /// Creates a vertex with zeroed properties.
    #[must_use]
    pub fn new(value: V) -> Self {
        Self {
            value,
            properties: VertexProperties::default(),
        }
    }

    /// Attaches properties to this vertex (builder pattern).
    #[must_use]
    pub fn with_properties(mut self, properties: VertexProperties) -> Self {
        self.properties = properties;
        self
    }
}

/// Properties attached to a vertex.
///
/// # Example
///
/// ```rust,ignore
/// let props = VertexProperties::default()
///     .with_weight(4.0)
///     .with_attribute("label", "registry");
/// g.add_vertex_with("A".to_string(), props)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexProperties {
    /// Free-form string attributes.
    pub attributes: HashMap<String, String>,
    /// Vertex weight; 0.0 when the vertex is unweighted.
    pub weight: f64,
}

impl VertexProperties {
    /// Sets the vertex weight (builder pattern).
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
}
