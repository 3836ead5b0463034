//! Insertion-ordered attribute maps for nodes, edges, and graphs.
//!
//! Provides type-safe attribute storage with a builder pattern. Keys keep
//! their insertion position across updates; lookups stay O(1).

use crate::error::{GraphError, Result};
use crate::value::Value;
use std::collections::HashMap;

/// Insertion-ordered mapping from attribute name to [`Value`].
///
/// Enumeration (`keys`, `iter`) follows insertion order; updating an existing
/// key keeps its original position, inserting a new key appends it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrMap {
    data: HashMap<String, Value>,
    order: Vec<String>,
}

impl AttrMap {
    /// Create a new empty attribute map.
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Builder pattern: add an attribute and return self.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or update an attribute value.
    ///
    /// An existing key keeps its insertion position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if !self.data.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.data.insert(key, value.into());
    }

    /// Get an attribute value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Get an attribute value by key, failing if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AttributeNotFound`] if the key is missing.
    pub fn get_required(&self, key: &str) -> Result<&Value> {
        self.data.get(key).ok_or_else(|| GraphError::AttributeNotFound {
            key: key.to_string(),
        })
    }

    /// Remove an attribute by key, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.data.remove(key);
        if removed.is_some() {
            self.order.retain(|k| k != key);
        }
        removed
    }

    /// Check if an attribute exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Get the number of attributes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over attribute names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// Iterate over attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.order
            .iter()
            .filter_map(move |k| self.data.get(k).map(|v| (k, v)))
    }

    /// Apply `other`'s entries onto `self`.
    ///
    /// Later values overwrite earlier ones; keys already present keep their
    /// insertion position, new keys are appended in `other`'s order.
    pub fn merge(&mut self, other: &AttrMap) {
        for (key, value) in other.iter() {
            self.insert(key.clone(), value.clone());
        }
    }

    /// Type-safe getter for string attributes.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.data.get(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Type-safe getter for integer attributes.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.data.get(key) {
            Some(Value::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// Type-safe getter for float attributes.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.data.get(key) {
            Some(Value::Float(f)) => Some(*f),
            _ => None,
        }
    }

    /// Type-safe getter for boolean attributes.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.data.get(key) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Build an attribute map from a JSON object.
    ///
    /// Each member is imported through the host-value bridge; arrays come in
    /// as lists since JSON cannot distinguish lists, tuples, and sets.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidConversion`] if `json` is not an object,
    /// or if a member carries the entity marker key.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        use crate::value::HostValue;

        let serde_json::Value::Object(members) = json else {
            return Err(GraphError::InvalidConversion {
                message: format!("expected a JSON object for an attribute map, got {json}"),
            });
        };

        let mut attrs = AttrMap::new();
        for (key, member) in members {
            attrs.insert(key, Value::from_host(HostValue::from_json(member))?);
        }
        Ok(attrs)
    }
}

impl FromIterator<(String, Value)> for AttrMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut map = AttrMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
