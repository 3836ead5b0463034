//! Addressable entities: the attribute contract shared by nodes and edges.
//!
//! Every entity owns an [`AttrMap`] and a static set of *reserved* attribute
//! names. Reserved attributes are computed from identity the owning graph
//! assigned at creation; they are readable through the generic getter but
//! never writable through the generic setter.

use crate::attrmap::AttrMap;
use crate::error::{GraphError, Result};
use crate::value::Value;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Unique identifier for a node (monotonic counter).
pub type NodeId = u64;

/// Unique identifier for an edge (monotonic counter).
pub type EdgeId = u64;

/// Reserved attribute name carrying a node's identifier.
pub const NODE_ID_ATTR: &str = "node-id";

/// Reserved attribute name carrying an edge's identifier.
pub const EDGE_ID_ATTR: &str = "edge-id";

/// Reserved attribute name carrying an edge's source node identifier.
pub const SOURCE_ID_ATTR: &str = "source-id";

/// Reserved attribute name carrying an edge's target node identifier.
pub const TARGET_ID_ATTR: &str = "target-id";

const NODE_RESERVED: &[&str] = &[NODE_ID_ATTR];
const EDGE_RESERVED: &[&str] = &[EDGE_ID_ATTR, SOURCE_ID_ATTR, TARGET_ID_ATTR];

/// Attribute behavior shared by every addressable entity kind.
///
/// Implementors supply storage and their reserved-name capability table; the
/// generic accessors are provided on top and consult that table before any
/// mutation, independent of the concrete kind.
pub trait Entity {
    /// The stored (non-reserved) attributes.
    fn attr_map(&self) -> &AttrMap;

    /// Mutable access to the stored attributes.
    fn attr_map_mut(&mut self) -> &mut AttrMap;

    /// The fixed set of reserved attribute names for this entity kind.
    fn reserved_names(&self) -> &'static [&'static str];

    /// Synthesize the value of a reserved attribute, if `key` is reserved.
    fn reserved_attr(&self, key: &str) -> Option<Value>;

    /// Check whether `key` is a reserved attribute name.
    fn is_reserved(&self, key: &str) -> bool {
        self.reserved_names().contains(&key)
    }

    /// Check whether the entity carries `key`, stored or reserved.
    fn has_attr(&self, key: &str) -> bool {
        self.is_reserved(key) || self.attr_map().contains_key(key)
    }

    /// Get an attribute value, synthesizing reserved ones.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AttributeNotFound`] if the key is neither
    /// stored nor reserved.
    fn get_attr(&self, key: &str) -> Result<Value> {
        if let Some(value) = self.reserved_attr(key) {
            return Ok(value);
        }
        self.attr_map().get_required(key).map(Value::clone)
    }

    /// Set a non-reserved attribute.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ReservedAttribute`] if `key` is reserved;
    /// reserved attributes are assigned only by the owning graph.
    fn set_attr(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        if self.is_reserved(&key) {
            return Err(GraphError::ReservedAttribute { key });
        }
        self.attr_map_mut().insert(key, value);
        Ok(())
    }

    /// Enumerate attribute names.
    ///
    /// Reserved names are synthesized, not stored, so a uniform enumeration
    /// merges both sources: reserved names first, then stored keys in
    /// insertion order.
    fn attr_names(&self, with_reserved: bool) -> Vec<String> {
        let mut names: Vec<String> = if with_reserved {
            self.reserved_names().iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };
        names.extend(self.attr_map().keys().cloned());
        names
    }
}

/// A node in the graph.
///
/// Nodes are created only through [`Graph::add_node`](crate::Graph::add_node)
/// and friends, which assign the identifier; there is no public constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    attrs: AttrMap,
}

impl Node {
    /// Crate-private construction is the privileged path for identity
    /// assignment. Reserved keys in the seed map are dropped.
    pub(crate) fn new(id: NodeId, attrs: AttrMap) -> Self {
        let mut filtered = AttrMap::new();
        for (key, value) in attrs.iter() {
            if !NODE_RESERVED.contains(&key.as_str()) {
                filtered.insert(key.clone(), value.clone());
            }
        }
        Self { id, attrs: filtered }
    }

    /// The identifier assigned by the owning graph.
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl Entity for Node {
    fn attr_map(&self) -> &AttrMap {
        &self.attrs
    }

    fn attr_map_mut(&mut self) -> &mut AttrMap {
        &mut self.attrs
    }

    fn reserved_names(&self) -> &'static [&'static str] {
        NODE_RESERVED
    }

    fn reserved_attr(&self, key: &str) -> Option<Value> {
        (key == NODE_ID_ATTR).then(|| Value::Int(self.id as i64))
    }
}

/// A directed edge in the graph.
///
/// Identity (edge id and both endpoint ids) is assigned by the owning graph
/// at creation and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    attrs: AttrMap,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, source: NodeId, target: NodeId, attrs: AttrMap) -> Self {
        let mut filtered = AttrMap::new();
        for (key, value) in attrs.iter() {
            if !EDGE_RESERVED.contains(&key.as_str()) {
                filtered.insert(key.clone(), value.clone());
            }
        }
        Self {
            id,
            source,
            target,
            attrs: filtered,
        }
    }

    /// The identifier assigned by the owning graph.
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// The source node identifier.
    pub fn source_id(&self) -> NodeId {
        self.source
    }

    /// The target node identifier.
    pub fn target_id(&self) -> NodeId {
        self.target
    }
}

impl Entity for Edge {
    fn attr_map(&self) -> &AttrMap {
        &self.attrs
    }

    fn attr_map_mut(&mut self) -> &mut AttrMap {
        &mut self.attrs
    }

    fn reserved_names(&self) -> &'static [&'static str] {
        EDGE_RESERVED
    }

    fn reserved_attr(&self, key: &str) -> Option<Value> {
        match key {
            EDGE_ID_ATTR => Some(Value::Int(self.id as i64)),
            SOURCE_ID_ATTR => Some(Value::Int(self.source as i64)),
            TARGET_ID_ATTR => Some(Value::Int(self.target as i64)),
            _ => None,
        }
    }
}

/// Shared, reference-counted handle to a [`Node`].
///
/// The graph's id-map, attribute values, and external callers may all hold
/// clones; the node lives as long as its longest holder and stays readable
/// even after removal from the graph. Equality is handle identity.
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<Node>>);

impl NodeRef {
    pub(crate) fn new(node: Node) -> Self {
        Self(Rc::new(RefCell::new(node)))
    }

    /// The identifier assigned by the owning graph.
    pub fn id(&self) -> NodeId {
        self.0.borrow().id()
    }

    /// Check whether the node carries `key`, stored or reserved.
    pub fn has_attr(&self, key: &str) -> bool {
        self.0.borrow().has_attr(key)
    }

    /// Get an attribute value, synthesizing reserved ones.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AttributeNotFound`] if the key is absent.
    pub fn get_attr(&self, key: &str) -> Result<Value> {
        self.0.borrow().get_attr(key)
    }

    /// Set a non-reserved attribute.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ReservedAttribute`] if `key` is reserved.
    pub fn set_attr(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.0.borrow_mut().set_attr(key, value)
    }

    /// Check whether `key` is reserved for nodes.
    pub fn is_reserved(&self, key: &str) -> bool {
        self.0.borrow().is_reserved(key)
    }

    /// Enumerate attribute names (see [`Entity::attr_names`]).
    pub fn attr_names(&self, with_reserved: bool) -> Vec<String> {
        self.0.borrow().attr_names(with_reserved)
    }

    /// Borrow the underlying node for direct [`Entity`] access.
    pub fn borrow(&self) -> Ref<'_, Node> {
        self.0.borrow()
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({})", self.id())
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Shared, reference-counted handle to an [`Edge`].
///
/// Same ownership model as [`NodeRef`]; equality is handle identity.
#[derive(Clone)]
pub struct EdgeRef(Rc<RefCell<Edge>>);

impl EdgeRef {
    pub(crate) fn new(edge: Edge) -> Self {
        Self(Rc::new(RefCell::new(edge)))
    }

    /// The identifier assigned by the owning graph.
    pub fn id(&self) -> EdgeId {
        self.0.borrow().id()
    }

    /// The source node identifier.
    pub fn source_id(&self) -> NodeId {
        self.0.borrow().source_id()
    }

    /// The target node identifier.
    pub fn target_id(&self) -> NodeId {
        self.0.borrow().target_id()
    }

    /// Check whether the edge carries `key`, stored or reserved.
    pub fn has_attr(&self, key: &str) -> bool {
        self.0.borrow().has_attr(key)
    }

    /// Get an attribute value, synthesizing reserved ones.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AttributeNotFound`] if the key is absent.
    pub fn get_attr(&self, key: &str) -> Result<Value> {
        self.0.borrow().get_attr(key)
    }

    /// Set a non-reserved attribute.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ReservedAttribute`] if `key` is reserved.
    pub fn set_attr(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.0.borrow_mut().set_attr(key, value)
    }

    /// Check whether `key` is reserved for edges.
    pub fn is_reserved(&self, key: &str) -> bool {
        self.0.borrow().is_reserved(key)
    }

    /// Enumerate attribute names (see [`Entity::attr_names`]).
    pub fn attr_names(&self, with_reserved: bool) -> Vec<String> {
        self.0.borrow().attr_names(with_reserved)
    }

    /// Borrow the underlying edge for direct [`Entity`] access.
    pub fn borrow(&self) -> Ref<'_, Edge> {
        self.0.borrow()
    }
}

impl fmt::Debug for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = self.0.borrow();
        write!(
            f,
            "EdgeRef({}: {} -> {})",
            edge.id(),
            edge.source_id(),
            edge.target_id()
        )
    }
}

impl PartialEq for EdgeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Shared reference to some entity, closed over the entity kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityRef {
    /// A node handle
    Node(NodeRef),
    /// An edge handle
    Edge(EdgeRef),
}

impl EntityRef {
    /// The node handle, if this references a node.
    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            EntityRef::Node(node) => Some(node),
            EntityRef::Edge(_) => None,
        }
    }

    /// The edge handle, if this references an edge.
    pub fn as_edge(&self) -> Option<&EdgeRef> {
        match self {
            EntityRef::Edge(edge) => Some(edge),
            EntityRef::Node(_) => None,
        }
    }

    /// Check whether the referenced entity carries `key`.
    pub fn has_attr(&self, key: &str) -> bool {
        match self {
            EntityRef::Node(node) => node.has_attr(key),
            EntityRef::Edge(edge) => edge.has_attr(key),
        }
    }

    /// Get an attribute of the referenced entity.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AttributeNotFound`] if the key is absent.
    pub fn get_attr(&self, key: &str) -> Result<Value> {
        match self {
            EntityRef::Node(node) => node.get_attr(key),
            EntityRef::Edge(edge) => edge.get_attr(key),
        }
    }

    /// Set a non-reserved attribute of the referenced entity.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ReservedAttribute`] if `key` is reserved.
    pub fn set_attr(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        match self {
            EntityRef::Node(node) => node.set_attr(key, value),
            EntityRef::Edge(edge) => edge.set_attr(key, value),
        }
    }

    /// Enumerate attribute names of the referenced entity.
    pub fn attr_names(&self, with_reserved: bool) -> Vec<String> {
        match self {
            EntityRef::Node(node) => node.attr_names(with_reserved),
            EntityRef::Edge(edge) => edge.attr_names(with_reserved),
        }
    }
}
