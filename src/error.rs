//! Error types for gamegraph operations.
//!
//! All fallible operations return [`Result<T>`] with context-rich error messages.

use crate::graph::{EdgeId, NodeId};
use thiserror::Error;

/// Result type alias for gamegraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Comprehensive error type for all graph and value operations.
///
/// Every failure is local and synchronous: nothing here is transient, and no
/// operation is retried internally.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A typed value accessor was called with the wrong expected tag
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Type the accessor asked for
        expected: &'static str,
        /// Type actually stored in the value
        actual: &'static str,
    },

    /// A host value cannot be imported through the generic conversion path
    #[error("Invalid conversion: {message}")]
    InvalidConversion {
        /// Description of the unrepresentable shape
        message: String,
    },

    /// A value cannot be exported through the generic conversion path
    #[error("Unsupported conversion: {message}")]
    UnsupportedConversion {
        /// Description of what went wrong
        message: String,
    },

    /// Attribute lookup missed
    #[error("Attribute not found: {key}")]
    AttributeNotFound {
        /// Attribute name that was missing
        key: String,
    },

    /// Attempted write to a reserved attribute through the generic setter
    #[error("Attribute '{key}' is reserved; use the owning graph's specialized accessors")]
    ReservedAttribute {
        /// Reserved attribute name
        key: String,
    },

    /// Edge creation referenced a node that is not in the graph
    #[error("Edge endpoint not found: node {node_id}")]
    EndpointNotFound {
        /// ID of the missing endpoint node
        node_id: NodeId,
    },

    /// Node not found in the graph
    #[error("Node not found: {node_id}")]
    NodeNotFound {
        /// ID of the missing node
        node_id: NodeId,
    },

    /// Edge not found in the graph
    #[error("Edge not found: {edge_id}")]
    EdgeNotFound {
        /// ID of the missing edge
        edge_id: EdgeId,
    },
}
