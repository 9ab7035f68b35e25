use arbor_graph::{Expression, NodeGraph, NodeId, Value};
use arbor_text::{TextError, parse, print};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Structural equality between two subtrees, possibly in different graphs.
fn equal(a: &NodeGraph, an: NodeId, b: &NodeGraph, bn: NodeId) -> bool {
    if a.name(an) != b.name(bn) || a.value(an) != b.value(bn) {
        return false;
    }
    let (ac, bc) = (a.children(an), b.children(bn));
    ac.len() == bc.len()
        && ac
            .iter()
            .zip(bc.iter())
            .all(|(&x, &y)| equal(a, x, b, y))
}

fn roundtrip(graph: &NodeGraph, roots: &[NodeId]) {
    let text = print(graph, roots).unwrap();
    let mut reparsed = NodeGraph::new();
    let back = parse(&mut reparsed, &text).unwrap();
    assert_eq!(back.len(), roots.len(), "top-level count changed:\n{text}");
    for (&orig, &copy) in roots.iter().zip(back.iter()) {
        assert!(
            equal(graph, orig, &reparsed, copy),
            "round-trip changed the tree:\n{text}"
        );
    }
}

#[test]
fn every_scalar_kind_round_trips() {
    let mut g = NodeGraph::new();
    let root = g.node("scalars");
    let values: Vec<Value> = vec![
        Value::Nothing,
        Value::Bool(true),
        Value::Int(-42),
        Value::Float(2.5),
        Value::Dec("123.456".parse::<Decimal>().unwrap()),
        Value::Date(Utc.with_ymd_and_hms(2031, 1, 2, 3, 4, 5).unwrap()),
        Value::Str("plain".into()),
        Value::Blob(vec![0, 1, 2, 254, 255]),
        Value::Expr(Expression::compile("*/config/=on").unwrap()),
    ];
    for (i, value) in values.into_iter().enumerate() {
        let child = g.node_with(format!("v{i}"), value);
        g.add(root, child).unwrap();
    }
    roundtrip(&g, &[root]);
}

#[test]
fn structure_and_order_survive() {
    let mut g = NodeGraph::new();
    let text = "\
a:1
  b:2
    c:3
  d
e:str-value
";
    let roots = parse(&mut g, text).unwrap();
    assert_eq!(roots.len(), 2);
    let a = roots[0];
    assert_eq!(g.name(a), "a");
    assert_eq!(g.children(a).len(), 2);
    let b = g.children(a)[0];
    assert_eq!(g.value(b), &Value::Str("2".into()));
    assert_eq!(g.children(b).len(), 1);
    assert_eq!(print(&g, &roots).unwrap(), text);
}

#[test]
fn awkward_names_and_values_are_quoted() {
    let mut g = NodeGraph::new();
    let root = g.node_with("needs:quoting", "int:5");
    let child = g.node_with("", "say \"hi\"\nplease");
    let spaced = g.node_with(" padded ", " value ");
    g.add(root, child).unwrap();
    g.add(root, spaced).unwrap();
    roundtrip(&g, &[root]);

    let text = print(&g, &[root]).unwrap();
    // The string value "int:5" must not come back as a typed int.
    assert!(text.contains("\"int:5\""));
}

#[test]
fn empty_string_values_stay_distinct_from_no_value() {
    let mut g = NodeGraph::new();
    let bare = g.node("bare");
    let empty = g.node_with("empty", "");
    roundtrip(&g, &[bare, empty]);

    let text = print(&g, &[bare, empty]).unwrap();
    assert_eq!(text, "bare\nempty:\n");
}

#[test]
fn blank_lines_are_skipped() {
    let mut g = NodeGraph::new();
    let roots = parse(&mut g, "a\n\n   \nb\n").unwrap();
    assert_eq!(roots.len(), 2);
}

#[test]
fn bad_indentation_is_a_syntax_error() {
    let mut g = NodeGraph::new();
    assert!(matches!(
        parse(&mut g, "a\n   b\n"),
        Err(TextError::Syntax { line: 2, .. })
    ));
    assert!(matches!(
        parse(&mut g, "a\n    b\n"),
        Err(TextError::Syntax { line: 2, .. })
    ));
    assert!(matches!(
        parse(&mut g, "  a\n"),
        Err(TextError::Syntax { line: 1, .. })
    ));
}

#[test]
fn malformed_typed_values_are_syntax_errors() {
    let mut g = NodeGraph::new();
    assert!(parse(&mut g, "n:int:abc\n").is_err());
    assert!(parse(&mut g, "n:date:not-a-date\n").is_err());
    // An unknown prefix is just a string.
    let roots = parse(&mut g, "n:custom:payload\n").unwrap();
    assert_eq!(g.value(roots[0]), &Value::Str("custom:payload".into()));
}

#[test]
fn node_typed_values_have_no_textual_form() {
    let mut g = NodeGraph::new();
    let inner = g.node("inner");
    let holder = g.node_with("holder", Value::Node(inner));
    assert!(matches!(
        print(&g, &[holder]),
        Err(TextError::Unprintable { kind: "node" })
    ));
}

fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nothing),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e9f64..1.0e9).prop_map(Value::Float),
        any::<i64>().prop_map(|i| Value::Dec(Decimal::from(i))),
        (0i64..4_102_444_800, 0u32..1_000_000_000).prop_map(|(secs, nanos)| {
            Value::Date(Utc.timestamp_opt(secs, nanos).unwrap())
        }),
        "[ -~]{0,24}".prop_map(Value::Str),
        proptest::collection::vec(any::<u8>(), 0..32).prop_map(Value::Blob),
    ]
}

proptest! {
    #[test]
    fn arbitrary_two_level_trees_round_trip(
        entries in proptest::collection::vec(("[ -~]{0,16}", scalar_value()), 1..8),
        root_name in "[ -~]{0,16}",
    ) {
        let mut g = NodeGraph::new();
        let root = g.node(root_name);
        for (name, value) in entries {
            let child = g.node_with(name, value);
            g.add(root, child).unwrap();
        }
        roundtrip(&g, &[root]);
    }
}
