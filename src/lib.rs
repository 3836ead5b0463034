//! # gamegraph
//!
//! An attributed, identity-stable directed multigraph engine for game and
//! automata models.
//!
//! ## Core Principles
//!
//! - **Stable Identity**: ids are monotonic and never recycled by removal
//! - **Multigraph First**: parallel edges and self-loops are ordinary edges
//! - **Typed Attributes**: a closed tagged union with fail-fast accessors
//! - **Zero Magic**: explicit over implicit, always
//!
//! ## Architecture
//!
//! gamegraph is organized in layers:
//!
//! ```text
//! Host Bridge (HostValue, JSON seeding)
//!     ↓
//! Values (tagged union, callables, foreign objects)
//!     ↓
//! Entities (nodes, edges, reserved attributes)
//!     ↓
//! Core Graph (adjacency, id maps, cascade removal)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gamegraph::{AttrMap, Graph};
//!
//! let mut graph = Graph::new();
//!
//! // Nodes get their ids from the graph, never from the caller
//! let s0 = graph.add_node_with(AttrMap::new().with("turn", 1i64));
//! let s1 = graph.add_node();
//!
//! // Edges validate both endpoints before anything is allocated
//! let action = graph.add_edge(&s0, &s1).unwrap();
//! assert_eq!(action.source_id(), s0.id());
//!
//! // Removing a node cascades over its incident edges
//! graph.rem_node(&s1);
//! assert_eq!(graph.number_of_edges(), 0);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod attrmap;
pub mod error;
pub mod graph;
pub mod value;

// Re-export main types
pub use attrmap::AttrMap;
pub use error::{GraphError, Result};
pub use graph::{
    Edge, EdgeId, EdgeKey, EdgeRef, Entity, EntityRef, Graph, Node, NodeId, NodeKey, NodeRef,
};
pub use value::{Callable, ForeignObject, HostValue, Value, ValueType};
