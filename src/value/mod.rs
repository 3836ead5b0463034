//! Tagged attribute values.
//!
//! [`Value`] is a closed union over every shape an attribute can take:
//! scalars, containers, opaque callables, entity references, and opaque
//! foreign objects. The tag always matches the stored payload, and typed
//! accessors fail with [`GraphError::TypeMismatch`] rather than coerce.
//!
//! Plain JSON cannot represent this model faithfully (it does not
//! distinguish a tuple from a list, and it cannot hold an entity reference),
//! which is why the closed variant set exists at all. The conversion to and
//! from a dynamic host representation lives in [`host`].

mod host;

pub use host::{HostValue, CLASS_MARKER, ENTITY_MARKER};

use crate::attrmap::AttrMap;
use crate::error::{GraphError, Result};
use crate::graph::{EdgeRef, EntityRef, NodeRef};
use std::fmt;
use std::rc::Rc;

/// Tag identifying the variant stored in a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Absence of a value
    None,
    /// Boolean
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// UTF-8 string
    String,
    /// Ordered, mutable-position sequence
    List,
    /// Ordered, fixed sequence
    Tuple,
    /// Unordered collection of distinct values
    Set,
    /// Ordered string-keyed mapping
    Map,
    /// Opaque callable reference
    Callable,
    /// Shared reference to a node or edge
    Entity,
    /// Opaque serialized foreign object
    Foreign,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::None => "none",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::List => "list",
            ValueType::Tuple => "tuple",
            ValueType::Set => "set",
            ValueType::Map => "map",
            ValueType::Callable => "callable",
            ValueType::Entity => "entity",
            ValueType::Foreign => "foreign",
        })
    }
}

/// An opaque, shared callable attribute.
///
/// Callables are cloneable handles; equality is handle identity, not
/// behavioral equivalence.
#[derive(Clone)]
pub struct Callable {
    f: Rc<dyn Fn(&[Value]) -> Value>,
}

impl Callable {
    /// Wrap a function as a callable attribute value.
    pub fn new(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self { f: Rc::new(f) }
    }

    /// Invoke the callable.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.f)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({:p})", Rc::as_ptr(&self.f))
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }
}

/// An opaque foreign object: a mapping carrying the serialized-class marker.
///
/// The marker entry (key [`CLASS_MARKER`]) is stored verbatim so the object
/// round-trips back to the same marked mapping shape on export.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignObject {
    fields: AttrMap,
}

impl ForeignObject {
    /// Wrap a marked mapping as an opaque foreign object.
    pub fn new(fields: AttrMap) -> Self {
        Self { fields }
    }

    /// The class name recorded under the serialized-class marker key.
    pub fn class_name(&self) -> Option<&str> {
        self.fields.get_string(CLASS_MARKER)
    }

    /// The full field mapping, marker entry included.
    pub fn fields(&self) -> &AttrMap {
        &self.fields
    }
}

/// A dynamically-typed attribute value.
///
/// The closed variant set is the whole point: a consumer can rely on every
/// attribute being one of exactly these shapes, and containers nest `Value`
/// recursively. Entity references are shared handles (see
/// [`EntityRef`]); everything else is owned by the containing slot.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absence of a value
    None,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Ordered, mutable-position sequence
    List(Vec<Value>),
    /// Ordered, fixed sequence
    Tuple(Vec<Value>),
    /// Distinct values; order of first insertion is kept for enumeration
    Set(Vec<Value>),
    /// Ordered string-keyed mapping
    Map(AttrMap),
    /// Opaque callable reference
    Callable(Callable),
    /// Shared reference to a node or edge
    Entity(EntityRef),
    /// Opaque serialized foreign object
    Foreign(ForeignObject),
}

impl Value {
    /// Build a set value, deduplicating structurally equal elements.
    ///
    /// Sets are kept as order-preserving vectors: float payloads rule out
    /// hashing, so distinctness is enforced by structural equality instead.
    pub fn set(items: Vec<Value>) -> Value {
        let mut distinct: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            if !distinct.contains(&item) {
                distinct.push(item);
            }
        }
        Value::Set(distinct)
    }

    /// The tag of the stored variant.
    pub fn get_type(&self) -> ValueType {
        match self {
            Value::None => ValueType::None,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::List(_) => ValueType::List,
            Value::Tuple(_) => ValueType::Tuple,
            Value::Set(_) => ValueType::Set,
            Value::Map(_) => ValueType::Map,
            Value::Callable(_) => ValueType::Callable,
            Value::Entity(_) => ValueType::Entity,
            Value::Foreign(_) => ValueType::Foreign,
        }
    }

    /// The tag name, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self.get_type() {
            ValueType::None => "none",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::List => "list",
            ValueType::Tuple => "tuple",
            ValueType::Set => "set",
            ValueType::Map => "map",
            ValueType::Callable => "callable",
            ValueType::Entity => "entity",
            ValueType::Foreign => "foreign",
        }
    }

    /// Check if this value is the none variant.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    fn mismatch(&self, expected: &'static str) -> GraphError {
        GraphError::TypeMismatch {
            expected,
            actual: self.type_name(),
        }
    }

    /// Get the boolean payload.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TypeMismatch`] if the stored tag differs.
    pub fn get_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.mismatch("bool")),
        }
    }

    /// Get the integer payload.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TypeMismatch`] if the stored tag differs.
    pub fn get_int(&self) -> Result<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            _ => Err(self.mismatch("int")),
        }
    }

    /// Get the float payload.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TypeMismatch`] if the stored tag differs.
    pub fn get_float(&self) -> Result<f64> {
        match self {
            Value::Float(f) => Ok(*f),
            _ => Err(self.mismatch("float")),
        }
    }

    /// Get the string payload.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TypeMismatch`] if the stored tag differs.
    pub fn get_string(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch("string")),
        }
    }

    /// Get the list elements.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TypeMismatch`] if the stored tag differs.
    pub fn get_list(&self) -> Result<&[Value]> {
        match self {
            Value::List(items) => Ok(items),
            _ => Err(self.mismatch("list")),
        }
    }

    /// Get the tuple elements.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TypeMismatch`] if the stored tag differs.
    pub fn get_tuple(&self) -> Result<&[Value]> {
        match self {
            Value::Tuple(items) => Ok(items),
            _ => Err(self.mismatch("tuple")),
        }
    }

    /// Get the set elements.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TypeMismatch`] if the stored tag differs.
    pub fn get_set(&self) -> Result<&[Value]> {
        match self {
            Value::Set(items) => Ok(items),
            _ => Err(self.mismatch("set")),
        }
    }

    /// Get the mapping payload.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TypeMismatch`] if the stored tag differs.
    pub fn get_map(&self) -> Result<&AttrMap> {
        match self {
            Value::Map(map) => Ok(map),
            _ => Err(self.mismatch("map")),
        }
    }

    /// Get the callable handle.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TypeMismatch`] if the stored tag differs.
    pub fn get_callable(&self) -> Result<&Callable> {
        match self {
            Value::Callable(callable) => Ok(callable),
            _ => Err(self.mismatch("callable")),
        }
    }

    /// Get the shared entity reference.
    ///
    /// This is the dedicated export path for entities: the generic
    /// [`Value::to_host`] refuses them.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TypeMismatch`] if the stored tag differs.
    pub fn get_entity(&self) -> Result<&EntityRef> {
        match self {
            Value::Entity(entity) => Ok(entity),
            _ => Err(self.mismatch("entity")),
        }
    }

    /// Get the opaque foreign object.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TypeMismatch`] if the stored tag differs.
    pub fn get_foreign(&self) -> Result<&ForeignObject> {
        match self {
            Value::Foreign(foreign) => Ok(foreign),
            _ => Err(self.mismatch("foreign")),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a == b,
            (Value::Entity(a), Value::Entity(b)) => a == b,
            (Value::Foreign(a), Value::Foreign(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<AttrMap> for Value {
    fn from(value: AttrMap) -> Self {
        Value::Map(value)
    }
}

impl From<Callable> for Value {
    fn from(value: Callable) -> Self {
        Value::Callable(value)
    }
}

impl From<EntityRef> for Value {
    fn from(value: EntityRef) -> Self {
        Value::Entity(value)
    }
}

impl From<NodeRef> for Value {
    fn from(value: NodeRef) -> Self {
        Value::Entity(EntityRef::Node(value))
    }
}

impl From<EdgeRef> for Value {
    fn from(value: EdgeRef) -> Self {
        Value::Entity(EntityRef::Edge(value))
    }
}

impl From<ForeignObject> for Value {
    fn from(value: ForeignObject) -> Self {
        Value::Foreign(value)
    }
}
