//! Bidirectional incidence index for directed hyperedges.
//!
//! [`IncidenceIndex`] keeps four insertion-ordered maps: the forward maps
//! `tails`/`heads` (hyperedge to node set, one per side) and the reverse maps
//! `tail_incidence`/`head_incidence` (node to the hyperedges where it plays
//! that role). Every mutation maintains both directions together, so edge
//! membership and node incidence are each a single map lookup.
//!
//! The maps never hold direct references to one another; all cross-links are
//! by id, so removal is a pure map update.

use crate::attrs::{AIndexMap, AIndexSet};
use crate::error::{HypergraphError, Result};
use crate::ids::{EdgeId, NodeId};

/// How incident hyperedges are handled when a node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalMode {
    /// Drop the node from each incident hyperedge; a hyperedge left with both
    /// sides empty is removed as well.
    #[default]
    Weak,
    /// Remove every incident hyperedge outright.
    Strong,
}

/// Dual index between hyperedges and their member nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidenceIndex {
    /// Forward: hyperedge to tail node set.
    tails: AIndexMap<EdgeId, AIndexSet<NodeId>>,
    /// Forward: hyperedge to head node set.
    heads: AIndexMap<EdgeId, AIndexSet<NodeId>>,
    /// Reverse: node to hyperedges containing it in the tail.
    tail_incidence: AIndexMap<NodeId, AIndexSet<EdgeId>>,
    /// Reverse: node to hyperedges containing it in the head.
    head_incidence: AIndexMap<NodeId, AIndexSet<EdgeId>>,
}

impl IncidenceIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes, incident or isolated.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.tail_incidence.len()
    }

    /// Number of live hyperedges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.tails.len()
    }

    #[inline]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.tail_incidence.contains_key(id)
    }

    #[inline]
    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.tails.contains_key(id)
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.tail_incidence.keys()
    }

    /// Hyperedge ids in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = &EdgeId> {
        self.tails.keys()
    }

    /// Tail node set of a hyperedge.
    pub fn tail(&self, id: &EdgeId) -> Option<&AIndexSet<NodeId>> {
        self.tails.get(id)
    }

    /// Head node set of a hyperedge.
    pub fn head(&self, id: &EdgeId) -> Option<&AIndexSet<NodeId>> {
        self.heads.get(id)
    }

    /// Hyperedges containing `id` in their tail.
    pub fn tail_memberships(&self, id: &NodeId) -> Option<&AIndexSet<EdgeId>> {
        self.tail_incidence.get(id)
    }

    /// Hyperedges containing `id` in their head.
    pub fn head_memberships(&self, id: &NodeId) -> Option<&AIndexSet<EdgeId>> {
        self.head_incidence.get(id)
    }

    /// Registers a node, creating empty incidence sets for it. Returns
    /// whether the node was new.
    pub fn add_node(&mut self, id: NodeId) -> bool {
        let fresh = !self.tail_incidence.contains_key(&id);
        if fresh {
            self.tail_incidence.insert(id.clone(), AIndexSet::default());
            self.head_incidence.insert(id, AIndexSet::default());
        }
        fresh
    }

    #[inline]
    fn ensure_node(&mut self, id: &NodeId) {
        if !self.tail_incidence.contains_key(id) {
            self.tail_incidence.insert(id.clone(), AIndexSet::default());
            self.head_incidence.insert(id.clone(), AIndexSet::default());
        }
    }

    /// Installs a hyperedge under `id`, creating any member nodes that do not
    /// exist yet.
    ///
    /// When `id` already names a live hyperedge, the old membership is fully
    /// unlinked from the reverse maps and the new one installed in its place;
    /// the edge keeps its position in iteration order. Returns whether such a
    /// replacement happened, so the caller can surface the overwrite.
    ///
    /// Duplicate ids within one side collapse. A hyperedge with both sides
    /// empty is rejected with [`HypergraphError::EmptyEdge`] and the index is
    /// left untouched; a single empty side is legal.
    pub fn insert_edge(
        &mut self,
        id: EdgeId,
        tail: impl IntoIterator<Item = NodeId>,
        head: impl IntoIterator<Item = NodeId>,
    ) -> Result<bool> {
        let tail: AIndexSet<NodeId> = tail.into_iter().collect();
        let head: AIndexSet<NodeId> = head.into_iter().collect();
        if tail.is_empty() && head.is_empty() {
            return Err(HypergraphError::EmptyEdge);
        }

        let replaced = self.tails.contains_key(&id);
        if replaced {
            // Old members forget this edge before the new sets go in.
            self.scrub_edge(&id);
        }

        for node in tail.iter().chain(head.iter()) {
            self.ensure_node(node);
        }
        for node in &tail {
            self.tail_incidence
                .entry(node.clone())
                .or_default()
                .insert(id.clone());
        }
        for node in &head {
            self.head_incidence
                .entry(node.clone())
                .or_default()
                .insert(id.clone());
        }
        self.tails.insert(id.clone(), tail);
        self.heads.insert(id, head);

        self.debug_assert_consistent();
        Ok(replaced)
    }

    /// Removes the reverse entries for a hyperedge, leaving empty forward
    /// slots behind.
    fn scrub_edge(&mut self, id: &EdgeId) {
        if let Some(old_tail) = self.tails.get_mut(id).map(std::mem::take) {
            for node in &old_tail {
                if let Some(edges) = self.tail_incidence.get_mut(node) {
                    edges.shift_remove(id);
                }
            }
        }
        if let Some(old_head) = self.heads.get_mut(id).map(std::mem::take) {
            for node in &old_head {
                if let Some(edges) = self.head_incidence.get_mut(node) {
                    edges.shift_remove(id);
                }
            }
        }
    }

    /// Unlinks and drops a hyperedge without consistency checks, for use
    /// inside compound mutations.
    fn drop_edge(&mut self, id: &EdgeId) {
        self.scrub_edge(id);
        self.tails.shift_remove(id);
        self.heads.shift_remove(id);
    }

    /// Removes a hyperedge. Member nodes are never removed, only their
    /// incidence entries for this edge.
    pub fn remove_edge(&mut self, id: &EdgeId) -> Result<()> {
        if !self.tails.contains_key(id) {
            return Err(HypergraphError::EdgeNotFound(id.clone()));
        }
        self.drop_edge(id);
        self.debug_assert_consistent();
        Ok(())
    }

    /// Removes a node and applies `mode` to its incident hyperedges.
    ///
    /// Returns the ids of hyperedges that were removed along with the node,
    /// in the order they were dropped, so the caller can release anything
    /// keyed by them.
    pub fn remove_node(&mut self, id: &NodeId, mode: RemovalMode) -> Result<Vec<EdgeId>> {
        if !self.tail_incidence.contains_key(id) {
            return Err(HypergraphError::NodeNotFound(id.clone()));
        }

        let incident: Vec<EdgeId> = {
            let mut seen: AIndexSet<EdgeId> = AIndexSet::default();
            if let Some(edges) = self.tail_incidence.get(id) {
                seen.extend(edges.iter().cloned());
            }
            if let Some(edges) = self.head_incidence.get(id) {
                seen.extend(edges.iter().cloned());
            }
            seen.into_iter().collect()
        };

        let mut dead = Vec::new();
        for edge in incident {
            let dead_now = match mode {
                RemovalMode::Strong => true,
                RemovalMode::Weak => {
                    if let Some(tail) = self.tails.get_mut(&edge) {
                        tail.shift_remove(id);
                    }
                    if let Some(head) = self.heads.get_mut(&edge) {
                        head.shift_remove(id);
                    }
                    // An edge emptied on both sides no longer relates anything.
                    self.tails.get(&edge).map_or(true, |s| s.is_empty())
                        && self.heads.get(&edge).map_or(true, |s| s.is_empty())
                }
            };
            if dead_now {
                self.drop_edge(&edge);
                dead.push(edge);
            }
        }

        self.tail_incidence.shift_remove(id);
        self.head_incidence.shift_remove(id);
        self.debug_assert_consistent();
        Ok(dead)
    }

    /// Drops every node and hyperedge.
    pub fn clear(&mut self) {
        self.tails.clear();
        self.heads.clear();
        self.tail_incidence.clear();
        self.head_incidence.clear();
    }

    /// Checks every cross-map invariant, returning the first violation.
    ///
    /// This is the always-compiled form of the debug assertions run after
    /// each mutation; property tests drive it directly.
    pub fn validate(&self) -> Result<()> {
        let corrupt = |msg: String| Err(HypergraphError::CorruptIndex(msg));

        for id in self.tails.keys() {
            if !self.heads.contains_key(id) {
                return corrupt(format!("hyperedge {id} has a tail slot but no head slot"));
            }
        }
        for id in self.heads.keys() {
            if !self.tails.contains_key(id) {
                return corrupt(format!("hyperedge {id} has a head slot but no tail slot"));
            }
        }
        for node in self.tail_incidence.keys() {
            if !self.head_incidence.contains_key(node) {
                return corrupt(format!("node {node} is missing its head incidence slot"));
            }
        }
        for node in self.head_incidence.keys() {
            if !self.tail_incidence.contains_key(node) {
                return corrupt(format!("node {node} is missing its tail incidence slot"));
            }
        }

        for (edge, members) in &self.tails {
            if members.is_empty() && self.heads.get(edge).map_or(true, |h| h.is_empty()) {
                return corrupt(format!("hyperedge {edge} has no members on either side"));
            }
            for node in members {
                let mirrored = self
                    .tail_incidence
                    .get(node)
                    .map_or(false, |edges| edges.contains(edge));
                if !mirrored {
                    return corrupt(format!(
                        "missing mirror: node {node} is in the tail of {edge} but not registered"
                    ));
                }
            }
        }
        for (edge, members) in &self.heads {
            for node in members {
                let mirrored = self
                    .head_incidence
                    .get(node)
                    .map_or(false, |edges| edges.contains(edge));
                if !mirrored {
                    return corrupt(format!(
                        "missing mirror: node {node} is in the head of {edge} but not registered"
                    ));
                }
            }
        }

        for (node, edges) in &self.tail_incidence {
            for edge in edges {
                let live = self
                    .tails
                    .get(edge)
                    .map_or(false, |members| members.contains(node));
                if !live {
                    return corrupt(format!(
                        "dangling entry: node {node} claims a tail role in {edge}"
                    ));
                }
            }
        }
        for (node, edges) in &self.head_incidence {
            for edge in edges {
                let live = self
                    .heads
                    .get(edge)
                    .map_or(false, |members| members.contains(node));
                if !live {
                    return corrupt(format!(
                        "dangling entry: node {node} claims a head role in {edge}"
                    ));
                }
            }
        }

        Ok(())
    }

    pub(crate) fn debug_assert_consistent(&self) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.validate() {
            panic!("{err}");
        }
    }
}

#[cfg(test)]
mod index_tests {
    use super::*;

    fn nodes(ids: &[u64]) -> Vec<NodeId> {
        ids.iter().map(|&n| NodeId::from(n)).collect()
    }

    #[test]
    fn insert_creates_member_nodes_in_first_seen_order() {
        let mut ix = IncidenceIndex::new();
        ix.insert_edge(EdgeId::from(0u64), nodes(&[1, 2, 3]), nodes(&[4]))
            .unwrap();
        ix.insert_edge(EdgeId::from(1u64), nodes(&[5, 6]), nodes(&[6, 7, 8]))
            .unwrap();
        let order: Vec<_> = ix.node_ids().cloned().collect();
        assert_eq!(order, nodes(&[1, 2, 3, 4, 5, 6, 7, 8]));
        assert_eq!(ix.num_nodes(), 8);
        assert_eq!(ix.num_edges(), 2);
    }

    #[test]
    fn duplicate_members_collapse_within_a_side() {
        let mut ix = IncidenceIndex::new();
        ix.insert_edge(EdgeId::from(0u64), nodes(&[1, 1, 2]), nodes(&[2]))
            .unwrap();
        assert_eq!(ix.tail(&EdgeId::from(0u64)).unwrap().len(), 2);
        // The same node on both sides is two roles, not a conflict.
        assert!(ix.tail(&EdgeId::from(0u64)).unwrap().contains(&NodeId::from(2u64)));
        assert!(ix.head(&EdgeId::from(0u64)).unwrap().contains(&NodeId::from(2u64)));
    }

    #[test]
    fn both_sides_empty_rejected_without_effect() {
        let mut ix = IncidenceIndex::new();
        let err = ix
            .insert_edge(EdgeId::from(0u64), nodes(&[]), nodes(&[]))
            .unwrap_err();
        assert_eq!(err, HypergraphError::EmptyEdge);
        assert_eq!(ix.num_nodes(), 0);
        assert_eq!(ix.num_edges(), 0);
    }

    #[test]
    fn one_empty_side_is_legal() {
        let mut ix = IncidenceIndex::new();
        ix.insert_edge(EdgeId::from(0u64), nodes(&[]), nodes(&[1]))
            .unwrap();
        assert!(ix.tail(&EdgeId::from(0u64)).unwrap().is_empty());
        assert_eq!(ix.head(&EdgeId::from(0u64)).unwrap().len(), 1);
    }

    #[test]
    fn replacement_scrubs_stale_incidence() {
        let mut ix = IncidenceIndex::new();
        let e = EdgeId::from(0u64);
        ix.insert_edge(e.clone(), nodes(&[1, 2]), nodes(&[3])).unwrap();
        let replaced = ix.insert_edge(e.clone(), nodes(&[4]), nodes(&[5])).unwrap();
        assert!(replaced);
        // Old members keep existing but no longer reference the edge.
        for old in nodes(&[1, 2]) {
            assert!(ix.contains_node(&old));
            assert!(ix.tail_memberships(&old).unwrap().is_empty());
        }
        assert!(ix.head_memberships(&NodeId::from(3u64)).unwrap().is_empty());
        let expected: AIndexSet<NodeId> = nodes(&[4]).into_iter().collect();
        assert_eq!(ix.tail(&e).unwrap(), &expected);
        ix.validate().unwrap();
    }

    #[test]
    fn replaced_edge_keeps_its_position() {
        let mut ix = IncidenceIndex::new();
        ix.insert_edge(EdgeId::from(0u64), nodes(&[1]), nodes(&[2])).unwrap();
        ix.insert_edge(EdgeId::from(1u64), nodes(&[2]), nodes(&[3])).unwrap();
        ix.insert_edge(EdgeId::from(0u64), nodes(&[3]), nodes(&[4])).unwrap();
        let order: Vec<_> = ix.edge_ids().cloned().collect();
        assert_eq!(order, vec![EdgeId::from(0u64), EdgeId::from(1u64)]);
    }

    #[test]
    fn remove_edge_keeps_nodes() {
        let mut ix = IncidenceIndex::new();
        let e = EdgeId::from(0u64);
        ix.insert_edge(e.clone(), nodes(&[1]), nodes(&[2])).unwrap();
        ix.remove_edge(&e).unwrap();
        assert_eq!(ix.num_edges(), 0);
        assert_eq!(ix.num_nodes(), 2);
        assert!(ix.tail_memberships(&NodeId::from(1u64)).unwrap().is_empty());
        assert_eq!(
            ix.remove_edge(&e).unwrap_err(),
            HypergraphError::EdgeNotFound(e)
        );
    }

    #[test]
    fn weak_removal_cascades_only_fully_emptied_edges() {
        let mut ix = IncidenceIndex::new();
        // Self-referential edge on node 10 and a second edge 10 -> 11.
        ix.insert_edge(EdgeId::from(0u64), nodes(&[10]), nodes(&[10])).unwrap();
        ix.insert_edge(EdgeId::from(1u64), nodes(&[10]), nodes(&[11])).unwrap();

        let dead = ix
            .remove_node(&NodeId::from(10u64), RemovalMode::Weak)
            .unwrap();
        assert_eq!(dead, vec![EdgeId::from(0u64)]);
        assert!(!ix.contains_node(&NodeId::from(10u64)));
        // The surviving edge shrank to an empty tail.
        assert!(ix.tail(&EdgeId::from(1u64)).unwrap().is_empty());
        assert_eq!(ix.head(&EdgeId::from(1u64)).unwrap().len(), 1);
        ix.validate().unwrap();
    }

    #[test]
    fn strong_removal_drops_every_incident_edge() {
        let mut ix = IncidenceIndex::new();
        ix.insert_edge(EdgeId::from(0u64), nodes(&[10]), nodes(&[10])).unwrap();
        ix.insert_edge(EdgeId::from(1u64), nodes(&[10]), nodes(&[11])).unwrap();

        let dead = ix
            .remove_node(&NodeId::from(10u64), RemovalMode::Strong)
            .unwrap();
        assert_eq!(dead, vec![EdgeId::from(0u64), EdgeId::from(1u64)]);
        assert_eq!(ix.num_edges(), 0);
        assert!(ix.contains_node(&NodeId::from(11u64)));
        assert!(ix.tail_memberships(&NodeId::from(11u64)).unwrap().is_empty());
        assert!(ix.head_memberships(&NodeId::from(11u64)).unwrap().is_empty());
    }

    #[test]
    fn removing_unknown_node_fails() {
        let mut ix = IncidenceIndex::new();
        let ghost = NodeId::from(99u64);
        assert_eq!(
            ix.remove_node(&ghost, RemovalMode::Weak).unwrap_err(),
            HypergraphError::NodeNotFound(ghost)
        );
    }

    #[test]
    fn isolated_node_removal() {
        let mut ix = IncidenceIndex::new();
        assert!(ix.add_node(NodeId::from(1u64)));
        assert!(!ix.add_node(NodeId::from(1u64)));
        let dead = ix
            .remove_node(&NodeId::from(1u64), RemovalMode::Weak)
            .unwrap();
        assert!(dead.is_empty());
        assert_eq!(ix.num_nodes(), 0);
    }

    #[test]
    fn clear_empties_everything() {
        let mut ix = IncidenceIndex::new();
        ix.insert_edge(EdgeId::from(0u64), nodes(&[1]), nodes(&[2])).unwrap();
        ix.clear();
        assert_eq!(ix.num_nodes(), 0);
        assert_eq!(ix.num_edges(), 0);
        ix.validate().unwrap();
    }

    #[test]
    fn validate_reports_dangling_incidence() {
        let mut ix = IncidenceIndex::new();
        ix.insert_edge(EdgeId::from(0u64), nodes(&[1]), nodes(&[2])).unwrap();
        // Forge a reverse entry with no forward counterpart.
        ix.tail_incidence
            .get_mut(&NodeId::from(2u64))
            .unwrap()
            .insert(EdgeId::from(0u64));
        assert!(matches!(
            ix.validate(),
            Err(HypergraphError::CorruptIndex(_))
        ));
    }
}
