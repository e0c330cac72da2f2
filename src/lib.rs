//! # dihypergraph
//!
//! dihypergraph is an in-memory directed hypergraph library. A directed
//! hyperedge relates a *tail* set of nodes to a *head* set of nodes, so one
//! edge can connect any number of participants on either side; the same node
//! may even appear on both. The structure keeps a bidirectional incidence
//! index, so edge membership and node incidence are both single lookups, and
//! every mutation keeps the two directions consistent.
//!
//! ## Features
//! - Integer and string identifiers in independent node and edge namespaces
//! - Auto-assigned edge ids that never collide with ids seen before
//! - Attribute maps (arbitrary JSON values) on nodes, hyperedges, and the
//!   hypergraph itself
//! - Weak and strong node removal with cascading edge cleanup
//! - Bulk ingestion from typed items or loose `serde_json::Value` data
//! - Read-only node/edge views with subset restriction
//! - Serde round-trip of the whole structure, id counters included
//!
//! ## Usage
//! ```rust
//! use dihypergraph::prelude::*;
//! use serde_json::json;
//!
//! let mut h = DiHypergraph::new();
//! let e = h.add_edge([1u64, 2], [3u64])?;
//! h.add_edge_with_id("loop", [3u64], [1u64, 2])?;
//! h.set_attr("name", json!("toy"));
//!
//! assert_eq!(h.num_nodes(), 3);
//! assert!(h.edges().members(&e)?.contains(&NodeId::from(3u64)));
//! let (tail_roles, head_roles) = h.nodes().dimemberships(&NodeId::from(3u64))?;
//! assert_eq!(tail_roles.len(), 1);
//! assert_eq!(head_roles.len(), 1);
//!
//! let dead = h.remove_node(3u64, RemovalMode::Weak)?;
//! assert!(dead.is_empty()); // both edges survive with one side shrunk
//! # Ok::<(), dihypergraph::HypergraphError>(())
//! ```

pub mod attrs;
pub mod error;
pub mod hypergraph;
pub mod ids;
pub mod incidence;
pub mod input;
pub mod views;

pub use attrs::Attrs;
pub use error::{HypergraphError, Result, Warning};
pub use hypergraph::DiHypergraph;
pub use ids::{EdgeId, Id, NodeId};
pub use incidence::RemovalMode;

/// A convenient prelude to import the most-used types:
pub mod prelude {
    pub use crate::attrs::{AIndexMap, AIndexSet, Attrs};
    pub use crate::error::{HypergraphError, Result, Warning};
    pub use crate::hypergraph::DiHypergraph;
    pub use crate::ids::{EdgeId, Id, IdAllocator, NodeId};
    pub use crate::incidence::{IncidenceIndex, RemovalMode};
    pub use crate::input::{EdgeInput, NodeInput};
    pub use crate::views::{EdgeView, NodeView};
}
