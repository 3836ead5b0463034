//! The directed multigraph engine.
//!
//! [`Graph`] keeps two views of the same topology: id-keyed maps of node and
//! edge handles, and per-node adjacency lists of incident edge ids. Every
//! mutation updates both views before returning, so callers can mix id
//! lookups and traversal freely.
//!
//! Identifiers come from monotonic per-kind counters and are never recycled
//! by removal; a stale id simply misses. Parallel edges and self-loops are
//! ordinary edges.

use crate::attrmap::AttrMap;
use crate::error::{GraphError, Result};
use std::collections::HashMap;

use log::{debug, trace};

use super::entity::{Edge, EdgeId, EdgeRef, Node, NodeId, NodeRef};

/// Anything that names a node: a raw id or a node handle.
pub trait NodeKey {
    /// The node id this key designates.
    fn node_id(&self) -> NodeId;
}

impl NodeKey for NodeId {
    fn node_id(&self) -> NodeId {
        *self
    }
}

impl NodeKey for NodeRef {
    fn node_id(&self) -> NodeId {
        self.id()
    }
}

impl NodeKey for &NodeRef {
    fn node_id(&self) -> NodeId {
        self.id()
    }
}

/// Anything that names an edge: a raw id or an edge handle.
pub trait EdgeKey {
    /// The edge id this key designates.
    fn edge_id(&self) -> EdgeId;
}

impl EdgeKey for EdgeId {
    fn edge_id(&self) -> EdgeId {
        *self
    }
}

impl EdgeKey for EdgeRef {
    fn edge_id(&self) -> EdgeId {
        self.id()
    }
}

impl EdgeKey for &EdgeRef {
    fn edge_id(&self) -> EdgeId {
        self.id()
    }
}

/// An attributed directed multigraph with stable entity identities.
///
/// Nodes and edges are handed out as shared handles ([`NodeRef`],
/// [`EdgeRef`]); a handle stays readable after its entity is removed from
/// the graph, it just no longer resolves through the graph.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: HashMap<NodeId, NodeRef>,
    edges: HashMap<EdgeId, EdgeRef>,
    adjacency_out: HashMap<NodeId, Vec<EdgeId>>,
    adjacency_in: HashMap<NodeId, Vec<EdgeId>>,
    node_counter: NodeId,
    edge_counter: EdgeId,
    attrs: AttrMap,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_node_id(&mut self) -> NodeId {
        let id = self.node_counter;
        self.node_counter += 1;
        id
    }

    fn next_edge_id(&mut self) -> EdgeId {
        let id = self.edge_counter;
        self.edge_counter += 1;
        id
    }

    /// Add a node with no attributes, returning its handle.
    pub fn add_node(&mut self) -> NodeRef {
        self.add_node_with(AttrMap::new())
    }

    /// Add a node seeded with `attrs`, returning its handle.
    ///
    /// Reserved keys in the seed map are dropped; identity comes from the
    /// graph's counter alone.
    pub fn add_node_with(&mut self, attrs: AttrMap) -> NodeRef {
        let id = self.next_node_id();
        debug!("Adding node: id={id}");

        let node = NodeRef::new(Node::new(id, attrs));
        self.nodes.insert(id, node.clone());
        self.adjacency_out.insert(id, Vec::new());
        self.adjacency_in.insert(id, Vec::new());
        node
    }

    /// Add a node seeded from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidConversion`] if `json` is not an object
    /// or a member cannot be imported.
    pub fn add_node_from_json(&mut self, json: serde_json::Value) -> Result<NodeRef> {
        let attrs = AttrMap::from_json(json)?;
        Ok(self.add_node_with(attrs))
    }

    /// Add `count` attribute-less nodes, returning their handles in
    /// allocation order.
    pub fn add_nodes_from(&mut self, count: usize) -> Vec<NodeRef> {
        (0..count).map(|_| self.add_node()).collect()
    }

    /// Add one node per seed map, returning handles in allocation order.
    pub fn add_nodes_with(&mut self, seeds: Vec<AttrMap>) -> Vec<NodeRef> {
        seeds.into_iter().map(|attrs| self.add_node_with(attrs)).collect()
    }

    /// Add an edge from `source` to `target` with no attributes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EndpointNotFound`] if either endpoint is not in
    /// the graph. Both endpoints are checked before any id is allocated, so
    /// a failed call leaves the graph unchanged.
    pub fn add_edge(&mut self, source: impl NodeKey, target: impl NodeKey) -> Result<EdgeRef> {
        self.add_edge_with(source, target, AttrMap::new())
    }

    /// Add an edge from `source` to `target` seeded with `attrs`.
    ///
    /// Parallel edges and self-loops are allowed; each call creates a fresh
    /// edge with its own identity.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EndpointNotFound`] if either endpoint is not in
    /// the graph; the graph is left unchanged.
    pub fn add_edge_with(
        &mut self,
        source: impl NodeKey,
        target: impl NodeKey,
        attrs: AttrMap,
    ) -> Result<EdgeRef> {
        let source = source.node_id();
        let target = target.node_id();

        for endpoint in [source, target] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(GraphError::EndpointNotFound { node_id: endpoint });
            }
        }

        let id = self.next_edge_id();
        debug!("Adding edge: id={id}, source={source}, target={target}");

        let edge = EdgeRef::new(Edge::new(id, source, target, attrs));
        self.edges.insert(id, edge.clone());
        self.adjacency_out.entry(source).or_default().push(id);
        self.adjacency_in.entry(target).or_default().push(id);
        Ok(edge)
    }

    /// Add one edge per `(source, target)` pair.
    ///
    /// Eager: edges are created in order and the first failure aborts the
    /// call. Edges created before the failure stay in the graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EndpointNotFound`] from the first pair whose
    /// endpoint is missing.
    pub fn add_edges_from(
        &mut self,
        pairs: impl IntoIterator<Item = (NodeId, NodeId)>,
    ) -> Result<Vec<EdgeRef>> {
        pairs
            .into_iter()
            .map(|(source, target)| self.add_edge(source, target))
            .collect()
    }

    /// Add one edge per `(source, target, attrs)` triple.
    ///
    /// Same eager semantics as [`Graph::add_edges_from`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EndpointNotFound`] from the first triple whose
    /// endpoint is missing.
    pub fn add_edges_with(
        &mut self,
        triples: impl IntoIterator<Item = (NodeId, NodeId, AttrMap)>,
    ) -> Result<Vec<EdgeRef>> {
        triples
            .into_iter()
            .map(|(source, target, attrs)| self.add_edge_with(source, target, attrs))
            .collect()
    }

    /// Remove a node and every edge incident on it.
    ///
    /// Returns `false` without touching anything if the node is absent. The
    /// cascade removes incident edges from both endpoints' adjacency lists,
    /// so the graph is fully consistent on return.
    pub fn rem_node(&mut self, key: impl NodeKey) -> bool {
        let id = key.node_id();
        if !self.nodes.contains_key(&id) {
            return false;
        }
        debug!("Removing node: id={id}");

        let mut incident: Vec<EdgeId> = Vec::new();
        if let Some(out) = self.adjacency_out.get(&id) {
            incident.extend(out.iter().copied());
        }
        if let Some(inc) = self.adjacency_in.get(&id) {
            incident.extend(inc.iter().copied());
        }
        // Self-loops appear in both lists.
        incident.sort_unstable();
        incident.dedup();

        for edge_id in incident {
            self.rem_edge(edge_id);
        }

        self.adjacency_out.remove(&id);
        self.adjacency_in.remove(&id);
        self.nodes.remove(&id);
        true
    }

    /// Remove each named node, returning how many were present.
    pub fn rem_nodes_from(&mut self, keys: impl IntoIterator<Item = NodeId>) -> usize {
        keys.into_iter().filter(|&id| self.rem_node(id)).count()
    }

    /// Remove an edge.
    ///
    /// Returns `false` without touching anything if the edge is absent.
    pub fn rem_edge(&mut self, key: impl EdgeKey) -> bool {
        let id = key.edge_id();
        let Some(edge) = self.edges.remove(&id) else {
            return false;
        };
        trace!("Removing edge: id={id}");

        if let Some(out) = self.adjacency_out.get_mut(&edge.source_id()) {
            out.retain(|&e| e != id);
        }
        if let Some(inc) = self.adjacency_in.get_mut(&edge.target_id()) {
            inc.retain(|&e| e != id);
        }
        true
    }

    /// Remove each named edge, returning how many were present.
    pub fn rem_edges_from(&mut self, keys: impl IntoIterator<Item = EdgeId>) -> usize {
        keys.into_iter().filter(|&id| self.rem_edge(id)).count()
    }

    /// Check whether a node is in the graph.
    pub fn has_node(&self, key: impl NodeKey) -> bool {
        self.nodes.contains_key(&key.node_id())
    }

    /// Check whether an edge is in the graph.
    pub fn has_edge(&self, key: impl EdgeKey) -> bool {
        self.edges.contains_key(&key.edge_id())
    }

    /// Look up a node handle by key.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node is absent.
    pub fn get_node(&self, key: impl NodeKey) -> Result<NodeRef> {
        let id = key.node_id();
        self.nodes
            .get(&id)
            .cloned()
            .ok_or(GraphError::NodeNotFound { node_id: id })
    }

    /// Look up an edge handle by key.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EdgeNotFound`] if the edge is absent.
    pub fn get_edge(&self, key: impl EdgeKey) -> Result<EdgeRef> {
        let id = key.edge_id();
        self.edges
            .get(&id)
            .cloned()
            .ok_or(GraphError::EdgeNotFound { edge_id: id })
    }

    /// All node handles, ordered by id.
    pub fn nodes(&self) -> Vec<NodeRef> {
        let mut nodes: Vec<NodeRef> = self.nodes.values().cloned().collect();
        nodes.sort_unstable_by_key(NodeRef::id);
        nodes
    }

    /// All edge handles, ordered by id.
    pub fn edges(&self) -> Vec<EdgeRef> {
        let mut edges: Vec<EdgeRef> = self.edges.values().cloned().collect();
        edges.sort_unstable_by_key(EdgeRef::id);
        edges
    }

    /// Edges leaving `key`, in per-node insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node is absent.
    pub fn out_edges(&self, key: impl NodeKey) -> Result<Vec<EdgeRef>> {
        let id = key.node_id();
        let out = self
            .adjacency_out
            .get(&id)
            .ok_or(GraphError::NodeNotFound { node_id: id })?;
        Ok(self.resolve_edges(out))
    }

    /// Edges arriving at `key`, in per-node insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node is absent.
    pub fn in_edges(&self, key: impl NodeKey) -> Result<Vec<EdgeRef>> {
        let id = key.node_id();
        let inc = self
            .adjacency_in
            .get(&id)
            .ok_or(GraphError::NodeNotFound { node_id: id })?;
        Ok(self.resolve_edges(inc))
    }

    fn resolve_edges(&self, ids: &[EdgeId]) -> Vec<EdgeRef> {
        ids.iter()
            .filter_map(|id| self.edges.get(id).cloned())
            .collect()
    }

    /// Distinct nodes reachable from `key` along one outgoing edge, in
    /// first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node is absent.
    pub fn successors(&self, key: impl NodeKey) -> Result<Vec<NodeRef>> {
        let edges = self.out_edges(key)?;
        Ok(self.collect_endpoints(edges.iter().map(|edge| edge.target_id())))
    }

    /// Distinct nodes with an edge into `key`, in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node is absent.
    pub fn predecessors(&self, key: impl NodeKey) -> Result<Vec<NodeRef>> {
        let edges = self.in_edges(key)?;
        Ok(self.collect_endpoints(edges.iter().map(|edge| edge.source_id())))
    }

    fn collect_endpoints(&self, ids: impl Iterator<Item = NodeId>) -> Vec<NodeRef> {
        let mut seen: Vec<NodeId> = Vec::new();
        let mut neighbors: Vec<NodeRef> = Vec::new();
        for id in ids {
            if !seen.contains(&id) {
                seen.push(id);
                if let Some(node) = self.nodes.get(&id) {
                    neighbors.push(node.clone());
                }
            }
        }
        neighbors
    }

    /// The number of nodes in the graph.
    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The number of edges in the graph.
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// Total entity count, nodes plus edges.
    pub fn size(&self) -> u64 {
        self.nodes.len() as u64 + self.edges.len() as u64
    }

    /// Remove every node and edge and reset both id counters.
    ///
    /// Graph-level attributes are kept. Handles held by callers stay
    /// readable but no longer resolve through the graph.
    pub fn clear(&mut self) {
        debug!(
            "Clearing graph: {} nodes, {} edges",
            self.nodes.len(),
            self.edges.len()
        );
        self.nodes.clear();
        self.edges.clear();
        self.adjacency_out.clear();
        self.adjacency_in.clear();
        self.node_counter = 0;
        self.edge_counter = 0;
    }

    /// Pre-size internal storage for at least `num_nodes` nodes and
    /// `num_edges` edges. A pure capacity hint; observable state is
    /// unchanged.
    pub fn reserve(&mut self, num_nodes: usize, num_edges: usize) {
        self.nodes.reserve(num_nodes);
        self.edges.reserve(num_edges);
        self.adjacency_out.reserve(num_nodes);
        self.adjacency_in.reserve(num_nodes);
    }

    /// Graph-level attributes.
    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }

    /// Mutable graph-level attributes.
    pub fn attrs_mut(&mut self) -> &mut AttrMap {
        &mut self.attrs
    }
}
