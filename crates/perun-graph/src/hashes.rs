//! Predefined hashing functions for primitive vertex types.
//!
//! A graph derives the key of every vertex from its value through the
//! hashing function supplied at construction. For primitive types where the
//! value can serve as its own key, use one of these identity projections:
//!
//! ```rust,ignore
//! let g: MemoryGraph<String, String, ()> = MemoryGraph::new(string_hash);
//! let g: MemoryGraph<i64, i64, ()> = MemoryGraph::new(int_hash);
//! ```

/// Identity hash for string-valued vertices.
// The parameter must stay `&String` to match the hashing function
// signature `Fn(&V) -> K` with `V = String`.
#[allow(clippy::ptr_arg)]
#[must_use]
pub fn string_hash(value: &String) -> String {
    value.clone()
}

/// Identity hash for integer-valued vertices.
#[must_use]
pub fn int_hash(value: &i64) -> i64 {
    *value
}
