//! Read-only views over the nodes and hyperedges of a hypergraph.
//!
//! [`NodeView`] and [`EdgeView`] borrow the structure and expose containment,
//! insertion-order iteration, attribute lookup, and membership queries
//! without mutating anything. [`NodeView::restrict`]/[`EdgeView::restrict`]
//! produce filtered views over a subset of ids.
//!
//! Single-id queries return borrowed data and fail with a not-found error for
//! ids outside the view; the whole-view `_map`/`_list` forms return owned
//! collections covering every id in the view.

use std::fmt;

use itertools::Itertools;
use serde_json::Value;

use crate::attrs::{AIndexMap, AIndexSet, Attrs};
use crate::error::{HypergraphError, Result};
use crate::hypergraph::DiHypergraph;
use crate::ids::{EdgeId, Id, NodeId};

/// Read-only view over nodes, optionally restricted to a subset.
#[derive(Debug, Clone)]
pub struct NodeView<'a> {
    graph: &'a DiHypergraph,
    ids: Option<AIndexSet<NodeId>>,
}

impl<'a> NodeView<'a> {
    pub(crate) fn new(graph: &'a DiHypergraph) -> Self {
        NodeView { graph, ids: None }
    }

    /// Number of nodes in the view.
    pub fn len(&self) -> usize {
        match &self.ids {
            Some(subset) => subset.len(),
            None => self.graph.incidence.num_nodes(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        match &self.ids {
            Some(subset) => subset.contains(id),
            None => self.graph.incidence.contains_node(id),
        }
    }

    /// Node ids in insertion order (restricted views keep the order the
    /// subset was given in).
    pub fn iter(&self) -> Box<dyn Iterator<Item = &NodeId> + '_> {
        match &self.ids {
            Some(subset) => Box::new(subset.iter()),
            None => Box::new(self.graph.incidence.node_ids()),
        }
    }

    fn ensure(&self, id: &NodeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(HypergraphError::NodeNotFound(id.clone()))
        }
    }

    /// Restricts the view to `ids`. Unknown ids fail with a not-found error.
    pub fn restrict<I>(&self, ids: I) -> Result<NodeView<'a>>
    where
        I: IntoIterator,
        I::Item: Into<NodeId>,
    {
        let mut subset: AIndexSet<NodeId> = AIndexSet::default();
        for id in ids {
            let id = id.into();
            self.ensure(&id)?;
            subset.insert(id);
        }
        Ok(NodeView {
            graph: self.graph,
            ids: Some(subset),
        })
    }

    /// Attribute map of one node.
    pub fn attrs(&self, id: &NodeId) -> Result<&'a Attrs> {
        self.ensure(id)?;
        self.graph
            .node_attrs
            .get(id)
            .ok_or_else(|| HypergraphError::NodeNotFound(id.clone()))
    }

    /// Attribute lookup keyed by loose JSON data. A value that cannot act as
    /// an identifier fails with a type-mismatch error, distinct from the
    /// not-found error for unknown ids.
    pub fn attrs_value(&self, key: &Value) -> Result<&'a Attrs> {
        let id = Id::try_from(key)?;
        self.attrs(&NodeId::from(id))
    }

    /// All hyperedges incident to a node, in either role.
    pub fn memberships(&self, id: &NodeId) -> Result<AIndexSet<EdgeId>> {
        let (tail_roles, head_roles) = self.dimemberships(id)?;
        Ok(tail_roles.iter().chain(head_roles.iter()).cloned().collect())
    }

    /// Incident hyperedges of a node split by role, as
    /// `(tail-role edges, head-role edges)`.
    pub fn dimemberships(
        &self,
        id: &NodeId,
    ) -> Result<(&'a AIndexSet<EdgeId>, &'a AIndexSet<EdgeId>)> {
        self.ensure(id)?;
        let tail_roles = self
            .graph
            .incidence
            .tail_memberships(id)
            .ok_or_else(|| HypergraphError::NodeNotFound(id.clone()))?;
        let head_roles = self
            .graph
            .incidence
            .head_memberships(id)
            .ok_or_else(|| HypergraphError::NodeNotFound(id.clone()))?;
        Ok((tail_roles, head_roles))
    }

    /// Incidence for every node in the view.
    pub fn memberships_map(&self) -> AIndexMap<NodeId, AIndexSet<EdgeId>> {
        self.iter()
            .filter_map(|id| {
                let tail_roles = self.graph.incidence.tail_memberships(id)?;
                let head_roles = self.graph.incidence.head_memberships(id)?;
                let all = tail_roles.iter().chain(head_roles.iter()).cloned().collect();
                Some((id.clone(), all))
            })
            .collect()
    }

    /// Role-split incidence for every node in the view.
    pub fn dimemberships_map(
        &self,
    ) -> AIndexMap<NodeId, (AIndexSet<EdgeId>, AIndexSet<EdgeId>)> {
        self.iter()
            .filter_map(|id| {
                let tail_roles = self.graph.incidence.tail_memberships(id)?.clone();
                let head_roles = self.graph.incidence.head_memberships(id)?.clone();
                Some((id.clone(), (tail_roles, head_roles)))
            })
            .collect()
    }
}

impl fmt::Display for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeView({})", self.iter().join(", "))
    }
}

/// Read-only view over hyperedges, optionally restricted to a subset.
#[derive(Debug, Clone)]
pub struct EdgeView<'a> {
    graph: &'a DiHypergraph,
    ids: Option<AIndexSet<EdgeId>>,
}

impl<'a> EdgeView<'a> {
    pub(crate) fn new(graph: &'a DiHypergraph) -> Self {
        EdgeView { graph, ids: None }
    }

    /// Number of hyperedges in the view.
    pub fn len(&self) -> usize {
        match &self.ids {
            Some(subset) => subset.len(),
            None => self.graph.incidence.num_edges(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &EdgeId) -> bool {
        match &self.ids {
            Some(subset) => subset.contains(id),
            None => self.graph.incidence.contains_edge(id),
        }
    }

    /// Hyperedge ids in insertion order (restricted views keep the order the
    /// subset was given in).
    pub fn iter(&self) -> Box<dyn Iterator<Item = &EdgeId> + '_> {
        match &self.ids {
            Some(subset) => Box::new(subset.iter()),
            None => Box::new(self.graph.incidence.edge_ids()),
        }
    }

    fn ensure(&self, id: &EdgeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(HypergraphError::EdgeNotFound(id.clone()))
        }
    }

    /// Restricts the view to `ids`. Unknown ids fail with a not-found error.
    pub fn restrict<I>(&self, ids: I) -> Result<EdgeView<'a>>
    where
        I: IntoIterator,
        I::Item: Into<EdgeId>,
    {
        let mut subset: AIndexSet<EdgeId> = AIndexSet::default();
        for id in ids {
            let id = id.into();
            self.ensure(&id)?;
            subset.insert(id);
        }
        Ok(EdgeView {
            graph: self.graph,
            ids: Some(subset),
        })
    }

    /// Attribute map of one hyperedge.
    pub fn attrs(&self, id: &EdgeId) -> Result<&'a Attrs> {
        self.ensure(id)?;
        self.graph
            .edge_attrs
            .get(id)
            .ok_or_else(|| HypergraphError::EdgeNotFound(id.clone()))
    }

    /// Attribute lookup keyed by loose JSON data; see
    /// [`NodeView::attrs_value`].
    pub fn attrs_value(&self, key: &Value) -> Result<&'a Attrs> {
        let id = Id::try_from(key)?;
        self.attrs(&EdgeId::from(id))
    }

    /// Tail node set of one hyperedge.
    pub fn tail(&self, id: &EdgeId) -> Result<&'a AIndexSet<NodeId>> {
        self.ensure(id)?;
        self.graph
            .incidence
            .tail(id)
            .ok_or_else(|| HypergraphError::EdgeNotFound(id.clone()))
    }

    /// Head node set of one hyperedge.
    pub fn head(&self, id: &EdgeId) -> Result<&'a AIndexSet<NodeId>> {
        self.ensure(id)?;
        self.graph
            .incidence
            .head(id)
            .ok_or_else(|| HypergraphError::EdgeNotFound(id.clone()))
    }

    /// Tail and head of one hyperedge as a `(tail, head)` pair.
    pub fn dimembers(
        &self,
        id: &EdgeId,
    ) -> Result<(&'a AIndexSet<NodeId>, &'a AIndexSet<NodeId>)> {
        Ok((self.tail(id)?, self.head(id)?))
    }

    /// All members of one hyperedge; always equals tail union head.
    pub fn members(&self, id: &EdgeId) -> Result<AIndexSet<NodeId>> {
        let (tail, head) = self.dimembers(id)?;
        Ok(tail.iter().chain(head.iter()).cloned().collect())
    }

    /// Member union per hyperedge, in view order.
    pub fn members_list(&self) -> Vec<AIndexSet<NodeId>> {
        self.iter()
            .filter_map(|id| {
                let tail = self.graph.incidence.tail(id)?;
                let head = self.graph.incidence.head(id)?;
                Some(tail.iter().chain(head.iter()).cloned().collect())
            })
            .collect()
    }

    /// Member union keyed by hyperedge id.
    pub fn members_map(&self) -> AIndexMap<EdgeId, AIndexSet<NodeId>> {
        self.iter()
            .filter_map(|id| {
                let tail = self.graph.incidence.tail(id)?;
                let head = self.graph.incidence.head(id)?;
                let all = tail.iter().chain(head.iter()).cloned().collect();
                Some((id.clone(), all))
            })
            .collect()
    }

    /// `(tail, head)` pairs per hyperedge, in view order.
    pub fn dimembers_list(&self) -> Vec<(AIndexSet<NodeId>, AIndexSet<NodeId>)> {
        self.iter()
            .filter_map(|id| {
                let tail = self.graph.incidence.tail(id)?.clone();
                let head = self.graph.incidence.head(id)?.clone();
                Some((tail, head))
            })
            .collect()
    }

    /// `(tail, head)` pairs keyed by hyperedge id.
    pub fn dimembers_map(&self) -> AIndexMap<EdgeId, (AIndexSet<NodeId>, AIndexSet<NodeId>)> {
        self.iter()
            .filter_map(|id| {
                let tail = self.graph.incidence.tail(id)?.clone();
                let head = self.graph.incidence.head(id)?.clone();
                Some((id.clone(), (tail, head)))
            })
            .collect()
    }

    /// Tail sets keyed by hyperedge id.
    pub fn tail_map(&self) -> AIndexMap<EdgeId, AIndexSet<NodeId>> {
        self.iter()
            .filter_map(|id| Some((id.clone(), self.graph.incidence.tail(id)?.clone())))
            .collect()
    }

    /// Head sets keyed by hyperedge id.
    pub fn head_map(&self) -> AIndexMap<EdgeId, AIndexSet<NodeId>> {
        self.iter()
            .filter_map(|id| Some((id.clone(), self.graph.incidence.head(id)?.clone())))
            .collect()
    }
}

impl fmt::Display for EdgeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeView({})", self.iter().join(", "))
    }
}
