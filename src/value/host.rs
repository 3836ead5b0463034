//! Conversion between [`Value`] and a dynamic host representation.
//!
//! [`HostValue`] models the object graph of a dynamically-typed host
//! environment: scalars, tuples/lists/sets, string-keyed dicts, callables,
//! and entity handles. Import ([`Value::from_host`]) recursively converts
//! containers element by element and distinguishes three dict shapes:
//!
//! - a plain dict becomes a [`Value::Map`];
//! - a dict carrying [`ENTITY_MARKER`] is rejected — entities only enter a
//!   value through the dedicated entity path ([`Value::from`] on a node or
//!   edge handle);
//! - a dict carrying [`CLASS_MARKER`] becomes an opaque [`Value::Foreign`]
//!   that exports back to the same marked mapping.
//!
//! Export ([`Value::to_host`]) is the structural inverse for every variant
//! except [`Value::Entity`], which has no generic host-object form.

use super::{Callable, ForeignObject, Value};
use crate::attrmap::AttrMap;
use crate::error::{GraphError, Result};
use crate::graph::EntityRef;

/// Dict key marking a mapping as the serialized form of an entity.
pub const ENTITY_MARKER: &str = "__entity";

/// Dict key marking a mapping as a serialized foreign class instance.
pub const CLASS_MARKER: &str = "__class";

/// A value as seen by the dynamically-typed host environment.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// Host none/null
    None,
    /// Host boolean
    Bool(bool),
    /// Host integer
    Int(i64),
    /// Host float
    Float(f64),
    /// Host string
    Str(String),
    /// Host tuple (fixed sequence)
    Tuple(Vec<HostValue>),
    /// Host list (mutable sequence)
    List(Vec<HostValue>),
    /// Host set
    Set(Vec<HostValue>),
    /// Host dict; entry order is the host's enumeration order
    Dict(Vec<(String, HostValue)>),
    /// Host callable
    Callable(Callable),
    /// A node or edge handle held by the host
    Entity(EntityRef),
}

impl Value {
    /// Import a dynamic host value, recursively converting containers.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidConversion`] when a dict carries the
    /// entity marker key: entities cannot be reconstructed from their
    /// mapping shape and must come in as live handles.
    pub fn from_host(host: HostValue) -> Result<Value> {
        match host {
            HostValue::None => Ok(Value::None),
            HostValue::Bool(b) => Ok(Value::Bool(b)),
            HostValue::Int(i) => Ok(Value::Int(i)),
            HostValue::Float(f) => Ok(Value::Float(f)),
            HostValue::Str(s) => Ok(Value::String(s)),
            HostValue::Tuple(items) => Ok(Value::Tuple(Self::from_host_seq(items)?)),
            HostValue::List(items) => Ok(Value::List(Self::from_host_seq(items)?)),
            HostValue::Set(items) => Ok(Value::set(Self::from_host_seq(items)?)),
            HostValue::Dict(entries) => Self::from_host_dict(entries),
            HostValue::Callable(callable) => Ok(Value::Callable(callable)),
            HostValue::Entity(entity) => Ok(Value::Entity(entity)),
        }
    }

    fn from_host_seq(items: Vec<HostValue>) -> Result<Vec<Value>> {
        items.into_iter().map(Value::from_host).collect()
    }

    fn from_host_dict(entries: Vec<(String, HostValue)>) -> Result<Value> {
        if entries.iter().any(|(key, _)| key == ENTITY_MARKER) {
            return Err(GraphError::InvalidConversion {
                message: format!(
                    "mapping carries the '{ENTITY_MARKER}' marker; \
                     entities must be imported as live handles, not mappings"
                ),
            });
        }

        let is_foreign = entries.iter().any(|(key, _)| key == CLASS_MARKER);

        let mut map = AttrMap::new();
        for (key, member) in entries {
            map.insert(key, Value::from_host(member)?);
        }

        if is_foreign {
            Ok(Value::Foreign(ForeignObject::new(map)))
        } else {
            Ok(Value::Map(map))
        }
    }

    /// Export to the dynamic host representation.
    ///
    /// Structural inverse of [`Value::from_host`] for every variant except
    /// entities.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnsupportedConversion`] for [`Value::Entity`]:
    /// entity references have no generic host-object form and are handed
    /// back through [`Value::get_entity`] instead.
    pub fn to_host(&self) -> Result<HostValue> {
        match self {
            Value::None => Ok(HostValue::None),
            Value::Bool(b) => Ok(HostValue::Bool(*b)),
            Value::Int(i) => Ok(HostValue::Int(*i)),
            Value::Float(f) => Ok(HostValue::Float(*f)),
            Value::String(s) => Ok(HostValue::Str(s.clone())),
            Value::Tuple(items) => Ok(HostValue::Tuple(Self::to_host_seq(items)?)),
            Value::List(items) => Ok(HostValue::List(Self::to_host_seq(items)?)),
            Value::Set(items) => Ok(HostValue::Set(Self::to_host_seq(items)?)),
            Value::Map(map) => Ok(HostValue::Dict(Self::to_host_dict(map)?)),
            Value::Foreign(foreign) => Ok(HostValue::Dict(Self::to_host_dict(foreign.fields())?)),
            Value::Callable(callable) => Ok(HostValue::Callable(callable.clone())),
            Value::Entity(_) => Err(GraphError::UnsupportedConversion {
                message: "entity references have no generic host form; use get_entity()"
                    .to_string(),
            }),
        }
    }

    fn to_host_seq(items: &[Value]) -> Result<Vec<HostValue>> {
        items.iter().map(Value::to_host).collect()
    }

    fn to_host_dict(map: &AttrMap) -> Result<Vec<(String, HostValue)>> {
        map.iter()
            .map(|(key, value)| Ok((key.clone(), value.to_host()?)))
            .collect()
    }
}

impl HostValue {
    /// Import a JSON value as a host value.
    ///
    /// Total: JSON arrays come in as lists and objects as dicts, since JSON
    /// cannot distinguish lists, tuples, and sets.
    pub fn from_json(json: serde_json::Value) -> HostValue {
        match json {
            serde_json::Value::Null => HostValue::None,
            serde_json::Value::Bool(b) => HostValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    HostValue::Int(i)
                } else {
                    HostValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => HostValue::Str(s),
            serde_json::Value::Array(items) => {
                HostValue::List(items.into_iter().map(HostValue::from_json).collect())
            }
            serde_json::Value::Object(members) => HostValue::Dict(
                members
                    .into_iter()
                    .map(|(key, member)| (key, HostValue::from_json(member)))
                    .collect(),
            ),
        }
    }

    /// Export to a JSON value.
    ///
    /// Lossy on sequence kind: tuples and sets flatten to JSON arrays.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnsupportedConversion`] for callables, entity
    /// handles, and non-finite floats.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            HostValue::None => Ok(serde_json::Value::Null),
            HostValue::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            HostValue::Int(i) => Ok(serde_json::Value::from(*i)),
            HostValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| GraphError::UnsupportedConversion {
                    message: format!("non-finite float {f} has no JSON form"),
                }),
            HostValue::Str(s) => Ok(serde_json::Value::String(s.clone())),
            HostValue::Tuple(items) | HostValue::List(items) | HostValue::Set(items) => {
                let array: Result<Vec<_>> = items.iter().map(HostValue::to_json).collect();
                Ok(serde_json::Value::Array(array?))
            }
            HostValue::Dict(entries) => {
                let mut members = serde_json::Map::new();
                for (key, member) in entries {
                    members.insert(key.clone(), member.to_json()?);
                }
                Ok(serde_json::Value::Object(members))
            }
            HostValue::Callable(_) => Err(GraphError::UnsupportedConversion {
                message: "callables have no JSON form".to_string(),
            }),
            HostValue::Entity(_) => Err(GraphError::UnsupportedConversion {
                message: "entity references have no JSON form".to_string(),
            }),
        }
    }
}
