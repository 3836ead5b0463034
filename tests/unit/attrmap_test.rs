//! Unit tests for attribute map ordering, merging, and typed access.

use gamegraph::{AttrMap, GraphError, Value};

#[test]
fn test_builder_and_typed_getters() {
    let attrs = AttrMap::new()
        .with("name", "s0")
        .with("turn", 1i64)
        .with("weight", 0.5f64)
        .with("is_final", false);

    assert_eq!(attrs.get_string("name"), Some("s0"));
    assert_eq!(attrs.get_int("turn"), Some(1));
    assert_eq!(attrs.get_float("weight"), Some(0.5));
    assert_eq!(attrs.get_bool("is_final"), Some(false));
    assert_eq!(attrs.len(), 4);
}

#[test]
fn test_enumeration_follows_insertion_order() {
    let mut attrs = AttrMap::new();
    attrs.insert("z", 1i64);
    attrs.insert("a", 2i64);
    attrs.insert("m", 3i64);

    let keys: Vec<_> = attrs.keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);

    let pairs: Vec<_> = attrs.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    assert_eq!(pairs[0], ("z".to_string(), Value::Int(1)));
    assert_eq!(pairs[2], ("m".to_string(), Value::Int(3)));
}

#[test]
fn test_update_keeps_position_remove_frees_it() {
    let mut attrs = AttrMap::new().with("a", 1i64).with("b", 2i64).with("c", 3i64);

    attrs.insert("a", 10i64);
    let keys: Vec<_> = attrs.keys().cloned().collect();
    assert_eq!(keys, vec!["a", "b", "c"]);

    attrs.remove("b");
    attrs.insert("b", 20i64);
    let keys: Vec<_> = attrs.keys().cloned().collect();
    assert_eq!(keys, vec!["a", "c", "b"]);
}

#[test]
fn test_merge_semantics() {
    let mut base = AttrMap::new().with("keep", 1i64).with("clash", 2i64);
    let overlay = AttrMap::new().with("clash", 20i64).with("new", 30i64);

    base.merge(&overlay);

    assert_eq!(base.get_int("keep"), Some(1));
    assert_eq!(base.get_int("clash"), Some(20));
    assert_eq!(base.get_int("new"), Some(30));
    let keys: Vec<_> = base.keys().cloned().collect();
    assert_eq!(keys, vec!["keep", "clash", "new"]);
}

#[test]
fn test_get_required_reports_key() {
    let attrs = AttrMap::new();
    let err = attrs.get_required("player").unwrap_err();
    assert_eq!(err.to_string(), "Attribute not found: player");
}

#[test]
fn test_nested_containers() {
    let inner = AttrMap::new().with("p", true).with("q", false);
    let attrs = AttrMap::new()
        .with("labels", Value::List(vec![Value::from("p"), Value::from("q")]))
        .with("valuation", inner.clone());

    assert_eq!(attrs.get("valuation"), Some(&Value::Map(inner)));
    assert!(matches!(attrs.get("labels"), Some(Value::List(items)) if items.len() == 2));
}

#[test]
fn test_from_json_seeding() {
    let attrs = AttrMap::from_json(serde_json::json!({
        "name": "arena",
        "turn": 2,
        "labels": ["p", "q"],
        "meta": {"depth": 3}
    }))
    .unwrap();

    assert_eq!(attrs.get_string("name"), Some("arena"));
    assert_eq!(attrs.get_int("turn"), Some(2));
    assert!(matches!(attrs.get("labels"), Some(Value::List(_))));
    let meta = attrs.get("meta").unwrap().get_map().unwrap();
    assert_eq!(meta.get_int("depth"), Some(3));
}

#[test]
fn test_from_json_rejects_scalars_and_entity_markers() {
    assert!(matches!(
        AttrMap::from_json(serde_json::json!(42)),
        Err(GraphError::InvalidConversion { .. })
    ));
    assert!(matches!(
        AttrMap::from_json(serde_json::json!({"ref": {"__entity": "Node"}})),
        Err(GraphError::InvalidConversion { .. })
    ));
}
