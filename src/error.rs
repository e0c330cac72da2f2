//! `HypergraphError`: unified error type for dihypergraph public APIs
//!
//! Every fallible operation in this crate returns [`HypergraphError`] through
//! the crate-wide [`Result`] alias. Non-fatal findings travel separately as
//! [`Warning`] values so callers can proceed past them (see
//! [`DiHypergraph::take_warnings`](crate::hypergraph::DiHypergraph::take_warnings)).

use thiserror::Error;

use crate::ids::{EdgeId, NodeId};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, HypergraphError>;

/// Unified error type for dihypergraph operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HypergraphError {
    /// A hyperedge was given with both its tail and its head empty.
    #[error("hyperedge must have at least one tail or head member")]
    EmptyEdge,
    /// A bulk edge item did not match any accepted shape.
    #[error("malformed hyperedge item: {0}")]
    MalformedEdgeItem(String),
    /// A bulk node item did not match any accepted shape.
    #[error("malformed node item: {0}")]
    MalformedNodeItem(String),
    /// Constructor input was neither an edge sequence nor an id-to-edge mapping.
    #[error("unsupported hypergraph input: {0}")]
    UnsupportedInput(String),
    /// Lookup or removal of a node id that is not in the hypergraph.
    #[error("node {0} is not in the hypergraph")]
    NodeNotFound(NodeId),
    /// Lookup or removal of a hyperedge id that is not in the hypergraph.
    #[error("hyperedge {0} is not in the hypergraph")]
    EdgeNotFound(EdgeId),
    /// A hypergraph-level attribute key that has never been set.
    #[error("attribute `{0}` is not set")]
    AttrNotFound(String),
    /// A value used in identifier position cannot act as an identifier.
    #[error("expected {expected} as an identifier, found {found}")]
    IdTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The dual index failed a consistency check; indicates a bug in this crate.
    #[error("incidence index corrupted: {0}")]
    CorruptIndex(String),
}

/// Non-fatal diagnostic emitted alongside a successful operation.
///
/// Warnings are buffered on the owning [`DiHypergraph`](crate::hypergraph::DiHypergraph)
/// and mirrored to [`log::warn!`]; they never abort the operation that raised
/// them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Warning {
    /// An explicit edge id collided with a live edge; members and attributes
    /// were replaced.
    EdgeOverwritten { edge: EdgeId },
    /// A node id collided with a live node; attributes were merged into it.
    NodeMerged { node: NodeId },
    /// A bulk removal named ids that were not in the hypergraph; they were
    /// skipped.
    MissingNodes { nodes: Vec<NodeId> },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use itertools::Itertools;
        match self {
            Warning::EdgeOverwritten { edge } => {
                write!(f, "hyperedge {edge} already exists; replacing members and attributes")
            }
            Warning::NodeMerged { node } => {
                write!(f, "node {node} already exists; merging attributes")
            }
            Warning::MissingNodes { nodes } => {
                write!(
                    f,
                    "skipping {} node id(s) not in the hypergraph: {}",
                    nodes.len(),
                    nodes.iter().join(", ")
                )
            }
        }
    }
}
