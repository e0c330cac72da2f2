use dihypergraph::prelude::*;
use serde_json::json;

fn attrs(pairs: &[(&str, serde_json::Value)]) -> Attrs {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect()
}

/// Edge 0 is a self-relation on node 10; edge 1 runs 10 -> 11.
fn two_edge_sample() -> DiHypergraph {
    let mut h = DiHypergraph::new();
    h.add_edge([10u64], [10u64]).unwrap();
    h.add_edge([10u64], [11u64]).unwrap();
    h
}

#[test]
fn weak_removal_cascades_only_fully_emptied_edges() {
    let mut h = two_edge_sample();
    let dead = h.remove_node(10u64, RemovalMode::Weak).unwrap();
    assert_eq!(dead, vec![EdgeId::from(0u64)]);
    assert!(!h.contains_node(10u64));
    assert_eq!(h.num_edges(), 1);
    let (tail, head) = h.edges().dimembers(&EdgeId::from(1u64)).unwrap();
    assert!(tail.is_empty());
    assert_eq!(head.len(), 1);
    h.validate().unwrap();
}

#[test]
fn strong_removal_drops_every_incident_edge() {
    let mut h = two_edge_sample();
    let dead = h.remove_node(10u64, RemovalMode::Strong).unwrap();
    assert_eq!(dead, vec![EdgeId::from(0u64), EdgeId::from(1u64)]);
    assert_eq!(h.num_edges(), 0);
    // Node 11 survives, fully disconnected.
    assert!(h.contains_node(11u64));
    assert!(h.nodes().memberships(&NodeId::from(11u64)).unwrap().is_empty());
    h.validate().unwrap();
}

#[test]
fn removal_drops_attributes_with_their_owners() {
    let mut h = DiHypergraph::new();
    h.add_node_with_attrs(10u64, attrs(&[("role", json!("source"))]));
    h.add_edge_input(
        EdgeInput::full([10u64], [10u64], 0u64, attrs(&[("w", json!(1))])),
        &Attrs::default(),
    )
    .unwrap();
    let dead = h.remove_node(10u64, RemovalMode::Weak).unwrap();
    assert_eq!(dead, vec![EdgeId::from(0u64)]);
    // Re-adding the ids shows clean slates, not leftovers.
    h.add_node(10u64);
    assert!(h.nodes().attrs(&NodeId::from(10u64)).unwrap().is_empty());
    h.add_edge_with_id(0u64, [10u64], [10u64]).unwrap();
    assert!(h.edges().attrs(&EdgeId::from(0u64)).unwrap().is_empty());
    assert!(h.take_warnings().is_empty());
}

#[test]
fn removing_a_missing_node_is_an_error() {
    let mut h = DiHypergraph::new();
    assert_eq!(
        h.remove_node(5u64, RemovalMode::Weak).unwrap_err(),
        HypergraphError::NodeNotFound(NodeId::from(5u64))
    );
}

#[test]
fn bulk_node_removal_warns_once_about_missing_ids() {
    let mut h = two_edge_sample();
    h.add_node("spare");
    let dead = h.remove_nodes_from(
        vec![
            NodeId::from(99u64),
            NodeId::from(10u64),
            NodeId::from("ghost"),
        ],
        RemovalMode::Strong,
    );
    assert_eq!(dead, vec![EdgeId::from(0u64), EdgeId::from(1u64)]);
    assert!(!h.contains_node(10u64));
    assert!(h.contains_node("spare"));
    assert_eq!(
        h.take_warnings(),
        vec![Warning::MissingNodes {
            nodes: vec![NodeId::from(99u64), NodeId::from("ghost")],
        }]
    );
    h.validate().unwrap();
}

#[test]
fn bulk_node_removal_of_known_ids_warns_nothing() {
    let mut h = two_edge_sample();
    let dead = h.remove_nodes_from([10u64, 11], RemovalMode::Weak);
    // Removing 10 kills edge 0; removing 11 then empties edge 1 entirely.
    assert_eq!(dead, vec![EdgeId::from(0u64), EdgeId::from(1u64)]);
    assert!(h.is_empty());
    assert!(h.warnings().is_empty());
}

#[test]
fn remove_edge_keeps_members() {
    let mut h = DiHypergraph::new();
    let e = h.add_edge([1u64], [2u64]).unwrap();
    h.remove_edge(e.clone()).unwrap();
    assert_eq!(h.num_edges(), 0);
    assert_eq!(h.num_nodes(), 2);
    assert_eq!(
        h.remove_edge(e.clone()).unwrap_err(),
        HypergraphError::EdgeNotFound(e)
    );
}

#[test]
fn bulk_edge_removal_propagates_the_first_miss() {
    let mut h = DiHypergraph::from_edge_list(vec![
        (vec![1u64], vec![2u64]),
        (vec![2u64], vec![3u64]),
        (vec![3u64], vec![1u64]),
    ])
    .unwrap();
    let err = h
        .remove_edges_from([EdgeId::from(0u64), EdgeId::from(9u64), EdgeId::from(2u64)])
        .unwrap_err();
    assert_eq!(err, HypergraphError::EdgeNotFound(EdgeId::from(9u64)));
    // Removals before the miss stay applied; the rest never ran.
    assert!(!h.edges().contains(&EdgeId::from(0u64)));
    assert!(h.edges().contains(&EdgeId::from(2u64)));
}

#[test]
fn ids_are_not_reused_after_removal() {
    let mut h = DiHypergraph::new();
    let first = h.add_edge([1u64], [2u64]).unwrap();
    h.remove_edge(first.clone()).unwrap();
    let second = h.add_edge([1u64], [2u64]).unwrap();
    assert_ne!(second, first);
    assert_eq!(second, EdgeId::from(1u64));
}

#[test]
fn weak_removal_can_leave_single_sided_edges_alive() {
    let mut h = DiHypergraph::new();
    h.add_edge([1u64, 2], [3u64]).unwrap();
    h.remove_node(3u64, RemovalMode::Weak).unwrap();
    // The edge lost its whole head but still relates the tail pair.
    let (tail, head) = h.edges().dimembers(&EdgeId::from(0u64)).unwrap();
    assert_eq!(tail.len(), 2);
    assert!(head.is_empty());
    // Dropping the remaining members one by one finally kills it.
    h.remove_node(1u64, RemovalMode::Weak).unwrap();
    let dead = h.remove_node(2u64, RemovalMode::Weak).unwrap();
    assert_eq!(dead, vec![EdgeId::from(0u64)]);
    assert!(h.is_empty());
    h.validate().unwrap();
}

#[test]
fn clear_resets_structure_but_not_counters() {
    let mut h = two_edge_sample();
    h.set_attr("name", json!("scratch"));
    h.clear();
    assert!(h.is_empty());
    assert!(h.attrs().is_empty());
    assert_eq!(h.next_edge_id(), 2);
    assert_eq!(h.next_node_id(), 12);
    let e = h.add_edge([1u64], [2u64]).unwrap();
    assert_eq!(e, EdgeId::from(2u64));
}
