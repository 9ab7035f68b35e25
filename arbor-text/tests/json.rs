use arbor_graph::{Expression, NodeGraph, Value};
use arbor_text::{TextError, from_json, to_json};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::json;

#[test]
fn nodes_map_to_name_value_children_objects() {
    let mut g = NodeGraph::new();
    let root = g.node("config");
    let port = g.node_with("port", 8080i64);
    let verbose = g.node_with("verbose", true);
    g.add(root, port).unwrap();
    g.add(root, verbose).unwrap();

    let mapped = to_json(&g, root).unwrap();
    assert_eq!(
        mapped,
        json!({
            "name": "config",
            "children": [
                { "name": "port", "value": 8080 },
                { "name": "verbose", "value": true },
            ]
        })
    );
}

#[test]
fn non_native_scalars_are_tagged() {
    let mut g = NodeGraph::new();
    let n = g.node_with("d", "1.5".parse::<Decimal>().unwrap());
    assert_eq!(to_json(&g, n).unwrap(), json!({"name": "d", "value": {"dec": "1.5"}}));

    let e = g.node_with("e", Expression::compile("*/x").unwrap());
    assert_eq!(to_json(&g, e).unwrap(), json!({"name": "e", "value": {"expr": "*/x"}}));
}

#[test]
fn json_round_trips_structurally() {
    let mut g = NodeGraph::new();
    let root = g.node("root");
    let scalars = [
        Value::Bool(false),
        Value::Int(-1),
        Value::Float(0.25),
        Value::Str("text".into()),
        Value::Dec(Decimal::from(7)),
        Value::Date(Utc.with_ymd_and_hms(2029, 6, 1, 0, 0, 0).unwrap()),
        Value::Blob(vec![9, 8, 7]),
        Value::List(vec![Value::Int(1), Value::Nothing, Value::Str("x".into())]),
    ];
    for (i, value) in scalars.into_iter().enumerate() {
        let child = g.node_with(format!("c{i}"), value);
        g.add(root, child).unwrap();
    }

    let mapped = to_json(&g, root).unwrap();
    let mut back = NodeGraph::new();
    let copy = from_json(&mut back, &mapped).unwrap();

    assert_eq!(back.name(copy), "root");
    assert_eq!(back.children(copy).len(), g.children(root).len());
    for (&orig, &twin) in g.children(root).iter().zip(back.children(copy)) {
        assert_eq!(g.name(orig), back.name(twin));
        assert_eq!(g.value(orig), back.value(twin));
    }
}

#[test]
fn node_typed_values_nest_through_the_bridge() {
    let mut g = NodeGraph::new();
    let inner = g.node_with("inner", 3i64);
    let holder = g.node_with("holder", Value::Node(inner));

    let mapped = to_json(&g, holder).unwrap();
    let mut back = NodeGraph::new();
    let copy = from_json(&mut back, &mapped).unwrap();

    let copied = match back.value(copy) {
        Value::Node(id) => *id,
        other => panic!("node-typed value lost: {other:?}"),
    };
    assert_eq!(back.name(copied), "inner");
    assert_eq!(back.value(copied), &Value::Int(3));
}

#[test]
fn dynamic_values_do_not_map() {
    use std::sync::Arc;
    let mut g = NodeGraph::new();
    let n = g.node_with("n", Value::Dynamic(Arc::new(5u8)));
    assert!(matches!(
        to_json(&g, n),
        Err(TextError::Unprintable { kind: "dynamic" })
    ));
}

#[test]
fn unknown_tags_are_rejected() {
    let mut g = NodeGraph::new();
    let err = from_json(&mut g, &json!({"name": "n", "value": {"mystery": 1}})).unwrap_err();
    assert!(matches!(err, TextError::UnknownKind(tag) if tag == "mystery"));
}
