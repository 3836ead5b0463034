//! Unit tests for the tagged value union and its accessors.

use gamegraph::value::{Callable, ValueType, CLASS_MARKER};
use gamegraph::{AttrMap, Graph, GraphError, Value};

#[test]
fn test_every_accessor_rejects_wrong_tag() {
    let value = Value::Int(7);

    assert!(value.get_int().is_ok());
    assert!(matches!(value.get_bool(), Err(GraphError::TypeMismatch { .. })));
    assert!(matches!(value.get_float(), Err(GraphError::TypeMismatch { .. })));
    assert!(matches!(value.get_string(), Err(GraphError::TypeMismatch { .. })));
    assert!(matches!(value.get_list(), Err(GraphError::TypeMismatch { .. })));
    assert!(matches!(value.get_tuple(), Err(GraphError::TypeMismatch { .. })));
    assert!(matches!(value.get_set(), Err(GraphError::TypeMismatch { .. })));
    assert!(matches!(value.get_map(), Err(GraphError::TypeMismatch { .. })));
    assert!(matches!(value.get_callable(), Err(GraphError::TypeMismatch { .. })));
    assert!(matches!(value.get_entity(), Err(GraphError::TypeMismatch { .. })));
    assert!(matches!(value.get_foreign(), Err(GraphError::TypeMismatch { .. })));
}

#[test]
fn test_mismatch_message_names_both_tags() {
    let err = Value::from("s0").get_int().unwrap_err();
    assert_eq!(err.to_string(), "Type mismatch: expected int, got string");
}

#[test]
fn test_no_numeric_coercion() {
    // Int and Float are distinct tags; accessors never widen.
    assert!(Value::Int(1).get_float().is_err());
    assert!(Value::Float(1.0).get_int().is_err());
    assert_ne!(Value::Int(1), Value::Float(1.0));
}

#[test]
fn test_sequence_kinds_are_distinct() {
    let items = vec![Value::Int(1), Value::Int(2)];
    let list = Value::List(items.clone());
    let tuple = Value::Tuple(items.clone());
    let set = Value::set(items);

    assert_eq!(list.get_type(), ValueType::List);
    assert_eq!(tuple.get_type(), ValueType::Tuple);
    assert_eq!(set.get_type(), ValueType::Set);
    assert_ne!(list, tuple);
}

#[test]
fn test_set_construction_deduplicates() {
    let set = Value::set(vec![
        Value::from("p"),
        Value::from("q"),
        Value::from("p"),
        Value::Tuple(vec![Value::Int(1)]),
        Value::Tuple(vec![Value::Int(1)]),
    ]);
    assert_eq!(set.get_set().unwrap().len(), 3);
}

#[test]
fn test_callable_is_invocable_and_identity_equal() {
    let negate = Callable::new(|args| match args.first() {
        Some(Value::Bool(b)) => Value::Bool(!b),
        _ => Value::None,
    });

    assert_eq!(negate.call(&[Value::Bool(true)]), Value::Bool(false));
    assert_eq!(Value::from(negate.clone()), Value::from(negate.clone()));
    assert_ne!(
        Value::from(negate),
        Value::from(Callable::new(|_| Value::None))
    );
}

#[test]
fn test_entity_value_compares_by_handle() {
    let mut graph = Graph::new();
    let node = graph.add_node();

    let a = Value::from(node.clone());
    let b = Value::from(node);
    let c = Value::from(graph.add_node());

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_entity_value_dedicated_accessor() {
    let mut graph = Graph::new();
    let node = graph.add_node();
    let value = Value::from(node.clone());

    let entity = value.get_entity().unwrap();
    assert_eq!(entity.as_node().unwrap().id(), node.id());
}

#[test]
fn test_foreign_object_round_trips_marker() {
    let fields = AttrMap::new()
        .with(CLASS_MARKER, "SpotAutomaton")
        .with("acc", "Buchi");
    let value = Value::from(gamegraph::value::ForeignObject::new(fields));

    let foreign = value.get_foreign().unwrap();
    assert_eq!(foreign.class_name(), Some("SpotAutomaton"));
    assert_eq!(foreign.fields().get_string("acc"), Some("Buchi"));
}

#[test]
fn test_nested_values_in_containers() {
    let value = Value::List(vec![
        Value::Tuple(vec![Value::Int(0), Value::from("a")]),
        Value::Map(AttrMap::new().with("guard", true)),
    ]);

    let items = value.get_list().unwrap();
    assert_eq!(items[0].get_tuple().unwrap()[1], Value::from("a"));
    assert_eq!(items[1].get_map().unwrap().get_bool("guard"), Some(true));
}
