//! Graph engine: entities, handles, and the multigraph itself.

mod entity;
mod multigraph;

pub use entity::{
    Edge, EdgeId, EdgeRef, Entity, EntityRef, Node, NodeId, NodeRef, EDGE_ID_ATTR, NODE_ID_ATTR,
    SOURCE_ID_ATTR, TARGET_ID_ATTR,
};
pub use multigraph::{EdgeKey, Graph, NodeKey};
