//! The directed hypergraph itself.
//!
//! [`DiHypergraph`] composes the dual incidence index, the per-node and
//! per-edge attribute stores, the structure-level attribute map, and one id
//! allocator per namespace. Every public mutation funnels through a single
//! commit path so the index, the attribute slots, and the counters can never
//! drift apart.

use std::fmt;
use std::mem;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::attrs::{AttrStore, Attrs};
use crate::error::{HypergraphError, Result, Warning};
use crate::ids::{EdgeId, Id, IdAllocator, NodeId};
use crate::incidence::{IncidenceIndex, RemovalMode};
use crate::input::{EdgeInput, NodeInput, collect_ids, parse_pair, value_kind};
use crate::views::{EdgeView, NodeView};

/// In-memory directed hypergraph.
///
/// Nodes and hyperedges live in independent id namespaces and both carry
/// attribute maps. Each hyperedge is a (tail, head) pair of node sets; the
/// same node may sit on both sides. Iteration order everywhere is insertion
/// order.
///
/// Hyperedges added without an explicit id draw from an integer counter that
/// stays ahead of every integer edge id ever seen, so ids are never reused,
/// not even after removals or [`clear`](DiHypergraph::clear).
///
/// # Example
/// ```rust
/// use dihypergraph::DiHypergraph;
///
/// let mut h = DiHypergraph::new();
/// let e = h.add_edge([1u64, 2], [3u64])?;
/// h.add_edge_with_id("flow", [3u64], [1u64])?;
///
/// assert_eq!(h.num_nodes(), 3);
/// assert_eq!(h.num_edges(), 2);
/// assert_eq!(h.edges().tail(&e)?.len(), 2);
/// # Ok::<(), dihypergraph::HypergraphError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiHypergraph {
    pub(crate) incidence: IncidenceIndex,
    pub(crate) node_attrs: AttrStore<NodeId>,
    pub(crate) edge_attrs: AttrStore<EdgeId>,
    /// Attributes of the hypergraph itself; the `"name"` key feeds [`fmt::Display`].
    attrs: Attrs,
    node_counter: IdAllocator,
    edge_counter: IdAllocator,
    warnings: Vec<Warning>,
}

impl DiHypergraph {
    /// Creates an empty hypergraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a hypergraph from a sequence of `(tail, head)` pairs, assigning
    /// edge ids `0, 1, 2, ...` in order.
    pub fn from_edge_list<T, H>(pairs: impl IntoIterator<Item = (T, H)>) -> Result<Self>
    where
        T: IntoIterator,
        T::Item: Into<NodeId>,
        H: IntoIterator,
        H::Item: Into<NodeId>,
    {
        let mut graph = Self::new();
        for (tail, head) in pairs {
            graph.add_edge(tail, head)?;
        }
        Ok(graph)
    }

    /// Builds a hypergraph from `(id, (tail, head))` entries, keeping the
    /// entry order.
    pub fn from_edge_map<K, T, H>(entries: impl IntoIterator<Item = (K, (T, H))>) -> Result<Self>
    where
        K: Into<EdgeId>,
        T: IntoIterator,
        T::Item: Into<NodeId>,
        H: IntoIterator,
        H::Item: Into<NodeId>,
    {
        let mut graph = Self::new();
        for (id, (tail, head)) in entries {
            graph.add_edge_with_id(id, tail, head)?;
        }
        Ok(graph)
    }

    /// Builds a hypergraph from loose JSON data: an array of edge items (see
    /// [`EdgeInput::from_value`]) or an object mapping edge ids to
    /// `(tail, head)` pairs. Anything else, a bare scalar in particular, is
    /// rejected as unsupported input.
    pub fn from_value(data: &Value) -> Result<Self> {
        let mut graph = Self::new();
        graph.add_edges_value(data)?;
        Ok(graph)
    }

    /// Deep copy; nodes, hyperedges, attributes, and counters all carry over,
    /// and the copy shares no state with the original.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Number of nodes, isolated ones included.
    pub fn num_nodes(&self) -> usize {
        self.incidence.num_nodes()
    }

    /// Number of hyperedges.
    pub fn num_edges(&self) -> usize {
        self.incidence.num_edges()
    }

    pub fn is_empty(&self) -> bool {
        self.incidence.num_nodes() == 0
    }

    pub fn contains_node(&self, id: impl Into<NodeId>) -> bool {
        self.incidence.contains_node(&id.into())
    }

    /// Containment test for loose data. A value that cannot act as an
    /// identifier is simply not a node, so this returns `false` rather than
    /// an error.
    pub fn contains_value(&self, value: &Value) -> bool {
        Id::try_from(value)
            .map_or(false, |id| self.incidence.contains_node(&NodeId::from(id)))
    }

    /// Read-only view of the nodes.
    pub fn nodes(&self) -> NodeView<'_> {
        NodeView::new(self)
    }

    /// Read-only view of the hyperedges.
    pub fn edges(&self) -> EdgeView<'_> {
        EdgeView::new(self)
    }

    /// The integer id the next auto-assigned hyperedge would get.
    pub fn next_edge_id(&self) -> u64 {
        self.edge_counter.peek()
    }

    /// One past the highest integer node id ever inserted.
    pub fn next_node_id(&self) -> u64 {
        self.node_counter.peek()
    }

    /// Attributes of the hypergraph itself.
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: Value) {
        self.attrs.insert(key.into(), value);
    }

    pub fn get_attr(&self, key: &str) -> Result<&Value> {
        self.attrs
            .get(key)
            .ok_or_else(|| HypergraphError::AttrNotFound(key.to_owned()))
    }

    /// Warnings raised since the last drain, oldest first.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Drains the warning buffer.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        mem::take(&mut self.warnings)
    }

    fn warn(&mut self, warning: Warning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Adds a node without attributes. Re-adding a live node leaves it in
    /// place and records a [`Warning::NodeMerged`].
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> NodeId {
        self.add_node_with_attrs(id, Attrs::default())
    }

    /// Adds a node carrying attributes. For a live node the attributes are
    /// merged on top of the existing ones, key by key.
    pub fn add_node_with_attrs(&mut self, id: impl Into<NodeId>, attrs: Attrs) -> NodeId {
        let id = id.into();
        let fresh = self.incidence.add_node(id.clone());
        self.node_counter.observe(id.id());
        if fresh {
            self.node_attrs.set(id.clone(), attrs);
        } else {
            self.node_attrs.merge(id.clone(), attrs);
            self.warn(Warning::NodeMerged { node: id.clone() });
        }
        id
    }

    /// Adds typed node items; returns the ids in input order.
    pub fn add_nodes_from<I>(&mut self, items: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = NodeInput>,
    {
        self.add_nodes_from_with(items, &Attrs::default())
    }

    /// Adds typed node items with a broadcast attribute map. Each node ends
    /// up with the broadcast attributes overlaid by its own, so per-item keys
    /// win.
    pub fn add_nodes_from_with<I>(&mut self, items: I, broadcast: &Attrs) -> Vec<NodeId>
    where
        I: IntoIterator<Item = NodeInput>,
    {
        items
            .into_iter()
            .map(|item| {
                let (id, own) = item.into_parts();
                let mut attrs = broadcast.clone();
                attrs.extend(own);
                self.add_node_with_attrs(id, attrs)
            })
            .collect()
    }

    /// Adds nodes from a loose JSON array of node items (bare ids, `[id]`,
    /// or `[id, attrs]`). Not transactional; items before the first malformed
    /// one stay added.
    pub fn add_nodes_value(&mut self, data: &Value) -> Result<Vec<NodeId>> {
        let Value::Array(items) = data else {
            return Err(HypergraphError::UnsupportedInput(format!(
                "expected an array of node items, found {}",
                value_kind(data)
            )));
        };
        let mut added = Vec::new();
        for item in items {
            let item = NodeInput::from_value(item)?;
            let (id, attrs) = item.into_parts();
            added.push(self.add_node_with_attrs(id, attrs));
        }
        Ok(added)
    }

    /// Adds a hyperedge under an auto-assigned integer id and returns that id.
    ///
    /// Member nodes that do not exist yet are created with empty attributes,
    /// preserving first-seen order. Fails with
    /// [`HypergraphError::EmptyEdge`] when both sides are empty; one empty
    /// side is legal.
    pub fn add_edge<T, H>(&mut self, tail: T, head: H) -> Result<EdgeId>
    where
        T: IntoIterator,
        T::Item: Into<NodeId>,
        H: IntoIterator,
        H::Item: Into<NodeId>,
    {
        self.commit_edge(collect_ids(tail), collect_ids(head), None, Attrs::default())
    }

    /// Adds a hyperedge under an explicit id.
    ///
    /// If the id already names a live hyperedge, its members and attributes
    /// are replaced, the stale incidence entries are scrubbed, and a
    /// [`Warning::EdgeOverwritten`] is recorded.
    pub fn add_edge_with_id<T, H>(
        &mut self,
        id: impl Into<EdgeId>,
        tail: T,
        head: H,
    ) -> Result<EdgeId>
    where
        T: IntoIterator,
        T::Item: Into<NodeId>,
        H: IntoIterator,
        H::Item: Into<NodeId>,
    {
        self.commit_edge(
            collect_ids(tail),
            collect_ids(head),
            Some(id.into()),
            Attrs::default(),
        )
    }

    /// Adds one tagged edge item under a broadcast attribute map; the item's
    /// own attributes win key by key.
    pub fn add_edge_input(&mut self, item: EdgeInput, broadcast: &Attrs) -> Result<EdgeId> {
        let (tail, head, id, own) = item.into_parts();
        let mut attrs = broadcast.clone();
        attrs.extend(own);
        self.commit_edge(tail, head, id, attrs)
    }

    /// Adds typed edge items; returns the committed ids in input order.
    ///
    /// Not transactional: items before the first failing one stay committed.
    pub fn add_edges_from<I>(&mut self, items: I) -> Result<Vec<EdgeId>>
    where
        I: IntoIterator<Item = EdgeInput>,
    {
        self.add_edges_from_with(items, &Attrs::default())
    }

    /// Adds typed edge items with a broadcast attribute map.
    ///
    /// # Example
    /// ```rust
    /// use dihypergraph::input::EdgeInput;
    /// use dihypergraph::{Attrs, DiHypergraph};
    /// use serde_json::json;
    ///
    /// let mut h = DiHypergraph::new();
    /// let shared: Attrs = [("lang".to_owned(), json!("en"))].into_iter().collect();
    /// let own: Attrs = [("lang".to_owned(), json!("fr"))].into_iter().collect();
    /// let ids = h.add_edges_from_with(
    ///     vec![
    ///         EdgeInput::members([0u64], [1u64]),
    ///         EdgeInput::with_attrs([1u64], [2u64], own),
    ///     ],
    ///     &shared,
    /// )?;
    /// assert_eq!(h.edges().attrs(&ids[0])?["lang"], json!("en"));
    /// assert_eq!(h.edges().attrs(&ids[1])?["lang"], json!("fr"));
    /// # Ok::<(), dihypergraph::HypergraphError>(())
    /// ```
    pub fn add_edges_from_with<I>(&mut self, items: I, broadcast: &Attrs) -> Result<Vec<EdgeId>>
    where
        I: IntoIterator<Item = EdgeInput>,
    {
        let mut added = Vec::new();
        for item in items {
            added.push(self.add_edge_input(item, broadcast)?);
        }
        Ok(added)
    }

    /// Adds hyperedges from `(id, (tail, head))` entries in entry order.
    pub fn add_edge_map<K, T, H>(
        &mut self,
        entries: impl IntoIterator<Item = (K, (T, H))>,
    ) -> Result<Vec<EdgeId>>
    where
        K: Into<EdgeId>,
        T: IntoIterator,
        T::Item: Into<NodeId>,
        H: IntoIterator,
        H::Item: Into<NodeId>,
    {
        let mut added = Vec::new();
        for (id, (tail, head)) in entries {
            added.push(self.add_edge_with_id(id, tail, head)?);
        }
        Ok(added)
    }

    /// Adds hyperedges from loose JSON data: an array of edge items, or an
    /// object whose keys are edge ids (canonical integer strings become
    /// integer ids) and whose values are `(tail, head)` pairs. Not
    /// transactional.
    pub fn add_edges_value(&mut self, data: &Value) -> Result<Vec<EdgeId>> {
        match data {
            Value::Array(items) => {
                let mut added = Vec::new();
                for item in items {
                    let item = EdgeInput::from_value(item)?;
                    added.push(self.add_edge_input(item, &Attrs::default())?);
                }
                Ok(added)
            }
            Value::Object(entries) => {
                let mut added = Vec::new();
                for (key, pair) in entries {
                    let id = EdgeId::from(Id::from_object_key(key));
                    let (tail, head) = parse_pair(pair)?;
                    added.push(self.commit_edge(tail, head, Some(id), Attrs::default())?);
                }
                Ok(added)
            }
            other => Err(HypergraphError::UnsupportedInput(format!(
                "expected an edge sequence or an id-to-edge mapping, found {}",
                value_kind(other)
            ))),
        }
    }

    /// Single funnel for hyperedge insertion: resolves the id, updates the
    /// index, keeps both counters ahead of what was seen, gives auto-created
    /// member nodes their attribute slots, and surfaces overwrites.
    fn commit_edge(
        &mut self,
        tail: Vec<NodeId>,
        head: Vec<NodeId>,
        id: Option<EdgeId>,
        attrs: Attrs,
    ) -> Result<EdgeId> {
        let id = id.unwrap_or_else(|| EdgeId::from(self.edge_counter.peek()));
        let members: Vec<NodeId> = tail.iter().chain(head.iter()).cloned().collect();
        let replaced = self.incidence.insert_edge(id.clone(), tail, head)?;
        self.edge_counter.observe(id.id());
        for node in members {
            self.node_counter.observe(node.id());
            self.node_attrs.entry(node);
        }
        if replaced {
            self.warn(Warning::EdgeOverwritten { edge: id.clone() });
        }
        self.edge_attrs.set(id.clone(), attrs);
        Ok(id)
    }

    /// Removes a node.
    ///
    /// Under [`RemovalMode::Weak`] the node is dropped from each incident
    /// hyperedge, and any hyperedge left with both sides empty is removed
    /// with it. Under [`RemovalMode::Strong`] every incident hyperedge is
    /// removed outright. Returns the ids of the hyperedges that died, whose
    /// attributes are dropped as well.
    pub fn remove_node(&mut self, id: impl Into<NodeId>, mode: RemovalMode) -> Result<Vec<EdgeId>> {
        let id = id.into();
        let dead = self.incidence.remove_node(&id, mode)?;
        self.node_attrs.remove(&id);
        for edge in &dead {
            self.edge_attrs.remove(edge);
        }
        Ok(dead)
    }

    /// Removes many nodes. Ids not in the hypergraph never abort the batch;
    /// they are collected into one [`Warning::MissingNodes`] after the known
    /// ones are processed. Returns every hyperedge that died in the batch.
    pub fn remove_nodes_from<I>(&mut self, ids: I, mode: RemovalMode) -> Vec<EdgeId>
    where
        I: IntoIterator,
        I::Item: Into<NodeId>,
    {
        let mut dead = Vec::new();
        let mut missing = Vec::new();
        for id in ids {
            let id = id.into();
            match self.remove_node(id.clone(), mode) {
                Ok(mut gone) => dead.append(&mut gone),
                Err(_) => missing.push(id),
            }
        }
        if !missing.is_empty() {
            self.warn(Warning::MissingNodes { nodes: missing });
        }
        dead
    }

    /// Removes a hyperedge and its attributes. Member nodes stay, isolated
    /// or not.
    pub fn remove_edge(&mut self, id: impl Into<EdgeId>) -> Result<()> {
        let id = id.into();
        self.incidence.remove_edge(&id)?;
        self.edge_attrs.remove(&id);
        Ok(())
    }

    /// Removes many hyperedges. Unlike node batches an unknown edge id is an
    /// error; removals before the failing id stay applied.
    pub fn remove_edges_from<I>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<EdgeId>,
    {
        for id in ids {
            self.remove_edge(id)?;
        }
        Ok(())
    }

    /// Drops every node, hyperedge, and attribute map. The id counters
    /// survive, so ids are never reused across a clear.
    pub fn clear(&mut self) {
        self.incidence.clear();
        self.node_attrs.clear();
        self.edge_attrs.clear();
        self.attrs.clear();
    }

    /// Checks the dual index plus the attribute-slot bookkeeping, returning
    /// the first violation found.
    pub fn validate(&self) -> Result<()> {
        self.incidence.validate()?;
        for id in self.incidence.node_ids() {
            if !self.node_attrs.contains(id) {
                return Err(HypergraphError::CorruptIndex(format!(
                    "node {id} has no attribute slot"
                )));
            }
        }
        for id in self.node_attrs.keys() {
            if !self.incidence.contains_node(id) {
                return Err(HypergraphError::CorruptIndex(format!(
                    "attribute slot for unknown node {id}"
                )));
            }
        }
        for id in self.incidence.edge_ids() {
            if !self.edge_attrs.contains(id) {
                return Err(HypergraphError::CorruptIndex(format!(
                    "hyperedge {id} has no attribute slot"
                )));
            }
        }
        for id in self.edge_attrs.keys() {
            if !self.incidence.contains_edge(id) {
                return Err(HypergraphError::CorruptIndex(format!(
                    "attribute slot for unknown hyperedge {id}"
                )));
            }
        }
        Ok(())
    }
}

/// `DiHypergraph named {name} with {n} nodes and {m} hyperedges` when the
/// `"name"` attribute holds a string, the `Unnamed` form otherwise.
impl fmt::Display for DiHypergraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attrs.get("name").and_then(Value::as_str) {
            Some(name) => write!(
                f,
                "DiHypergraph named {name} with {} nodes and {} hyperedges",
                self.num_nodes(),
                self.num_edges()
            ),
            None => write!(
                f,
                "Unnamed DiHypergraph with {} nodes and {} hyperedges",
                self.num_nodes(),
                self.num_edges()
            ),
        }
    }
}

/// Structural equality: node set and attributes, hyperedge set with tail and
/// head memberships and attributes, and the hypergraph attributes. The id
/// counters and any pending warnings are bookkeeping, not structure, and are
/// ignored.
impl PartialEq for DiHypergraph {
    fn eq(&self, other: &Self) -> bool {
        self.incidence == other.incidence
            && self.node_attrs == other.node_attrs
            && self.edge_attrs == other.edge_attrs
            && self.attrs == other.attrs
    }
}

#[derive(Serialize, Deserialize)]
struct NodeRecord {
    id: NodeId,
    #[serde(default)]
    attrs: Attrs,
}

#[derive(Serialize, Deserialize)]
struct EdgeRecord {
    id: EdgeId,
    tail: Vec<NodeId>,
    head: Vec<NodeId>,
    #[serde(default)]
    attrs: Attrs,
}

/// Flat wire shape: explicit node and edge records in insertion order.
/// Typed ids do not make stable JSON object keys, so the maps are spelled
/// out as record lists instead.
#[derive(Serialize, Deserialize)]
struct GraphRecord {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
    #[serde(default)]
    attrs: Attrs,
    #[serde(default)]
    node_counter: u64,
    #[serde(default)]
    edge_counter: u64,
}

impl Serialize for DiHypergraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let nodes: Vec<NodeRecord> = self
            .incidence
            .node_ids()
            .map(|id| NodeRecord {
                id: id.clone(),
                attrs: self.node_attrs.get(id).cloned().unwrap_or_default(),
            })
            .collect();
        let edges: Vec<EdgeRecord> = self
            .incidence
            .edge_ids()
            .filter_map(|id| {
                let tail = self.incidence.tail(id)?;
                let head = self.incidence.head(id)?;
                Some(EdgeRecord {
                    id: id.clone(),
                    tail: tail.iter().cloned().collect(),
                    head: head.iter().cloned().collect(),
                    attrs: self.edge_attrs.get(id).cloned().unwrap_or_default(),
                })
            })
            .collect();
        GraphRecord {
            nodes,
            edges,
            attrs: self.attrs.clone(),
            node_counter: self.node_counter.peek(),
            edge_counter: self.edge_counter.peek(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DiHypergraph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = GraphRecord::deserialize(deserializer)?;
        let mut graph = DiHypergraph::new();
        // Stored counters win unless the records hold something higher; the
        // commit path below only ever advances them.
        graph.node_counter = IdAllocator::starting_at(record.node_counter);
        graph.edge_counter = IdAllocator::starting_at(record.edge_counter);
        graph.attrs = record.attrs;
        for node in record.nodes {
            graph.add_node_with_attrs(node.id, node.attrs);
        }
        for edge in record.edges {
            graph
                .commit_edge(edge.tail, edge.head, Some(edge.id), edge.attrs)
                .map_err(serde::de::Error::custom)?;
        }
        // A faithful record replays without collisions; anything buffered
        // here came from malformed input, not from the source structure.
        graph.warnings.clear();
        Ok(graph)
    }
}
