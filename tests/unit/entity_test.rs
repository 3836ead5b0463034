//! Unit tests for entity attribute access and reserved-name protection.

use gamegraph::{AttrMap, Graph, GraphError, Value};

#[test]
fn test_node_reserved_id_is_readable_not_writable() {
    let mut graph = Graph::new();
    let node = graph.add_node();

    assert!(node.is_reserved("node-id"));
    assert_eq!(node.get_attr("node-id").unwrap(), Value::Int(node.id() as i64));

    let err = node.set_attr("node-id", 99i64).unwrap_err();
    assert!(matches!(err, GraphError::ReservedAttribute { .. }));
    assert_eq!(node.get_attr("node-id").unwrap(), Value::Int(node.id() as i64));
}

#[test]
fn test_edge_reserved_identity_attrs() {
    let mut graph = Graph::new();
    let a = graph.add_node();
    let b = graph.add_node();
    let edge = graph.add_edge(&a, &b).unwrap();

    assert_eq!(edge.get_attr("edge-id").unwrap(), Value::Int(edge.id() as i64));
    assert_eq!(edge.get_attr("source-id").unwrap(), Value::Int(a.id() as i64));
    assert_eq!(edge.get_attr("target-id").unwrap(), Value::Int(b.id() as i64));

    for key in ["edge-id", "source-id", "target-id"] {
        assert!(matches!(
            edge.set_attr(key, 0i64),
            Err(GraphError::ReservedAttribute { .. })
        ));
    }
}

#[test]
fn test_reserved_seed_keys_silently_dropped() {
    let mut graph = Graph::new();
    let node = graph.add_node_with(AttrMap::new().with("node-id", 999i64).with("label", "s0"));

    // Identity comes from the graph, never from the seed map.
    assert_eq!(node.id(), 0);
    assert_eq!(node.get_attr("node-id").unwrap(), Value::Int(0));
    assert_eq!(node.get_attr("label").unwrap(), Value::from("s0"));
}

#[test]
fn test_ordinary_attributes_read_write() {
    let mut graph = Graph::new();
    let node = graph.add_node();

    node.set_attr("turn", 1i64).unwrap();
    node.set_attr("labels", Value::set(vec![Value::from("p")])).unwrap();

    assert!(node.has_attr("turn"));
    assert_eq!(node.get_attr("turn").unwrap(), Value::Int(1));

    node.set_attr("turn", 2i64).unwrap();
    assert_eq!(node.get_attr("turn").unwrap(), Value::Int(2));
}

#[test]
fn test_missing_attribute_error() {
    let mut graph = Graph::new();
    let node = graph.add_node();

    assert!(!node.has_attr("absent"));
    let err = node.get_attr("absent").unwrap_err();
    assert_eq!(err.to_string(), "Attribute not found: absent");
}

#[test]
fn test_attr_names_with_and_without_reserved() {
    let mut graph = Graph::new();
    let node = graph.add_node_with(AttrMap::new().with("turn", 1i64).with("label", "s0"));

    assert_eq!(node.attr_names(false), vec!["turn", "label"]);
    assert_eq!(node.attr_names(true), vec!["node-id", "turn", "label"]);
}

#[test]
fn test_shared_handle_sees_mutations() {
    let mut graph = Graph::new();
    let node = graph.add_node();
    let alias = graph.get_node(node.id()).unwrap();

    node.set_attr("marked", true).unwrap();
    assert_eq!(alias.get_attr("marked").unwrap(), Value::Bool(true));
    assert_eq!(node, alias);
}

#[test]
fn test_entity_ref_stored_as_attribute() {
    let mut graph = Graph::new();
    let a = graph.add_node();
    let b = graph.add_node();
    let edge = graph.add_edge(&a, &b).unwrap();

    a.set_attr("via", edge.clone()).unwrap();

    let value = a.get_attr("via").unwrap();
    let entity = value.get_entity().unwrap().clone();
    assert_eq!(entity.as_edge().unwrap().id(), edge.id());
    assert_eq!(entity.get_attr("source-id").unwrap(), Value::Int(a.id() as i64));
}
