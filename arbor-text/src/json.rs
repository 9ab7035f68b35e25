//! Structural bridge between subtrees and `serde_json::Value`.
//!
//! A node maps to `{"name": ..., "value": ..., "children": [...]}` with the
//! `value` and `children` fields omitted when empty. Scalars that JSON has a
//! native shape for map directly; the rest (`dec`, `date`, `blob`, `expr`,
//! `node`) become one-field tagged objects so the mapping inverts.

use arbor_graph::{Expression, NodeGraph, NodeId, Value};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value as Json, json};

use crate::error::TextError;

/// Map a subtree to JSON.
///
/// Fails with [`TextError::Unprintable`] for `dynamic` values and
/// non-finite floats, neither of which JSON can carry.
pub fn to_json(graph: &NodeGraph, id: NodeId) -> Result<Json, TextError> {
    let mut object = Map::new();
    object.insert("name".to_owned(), Json::String(graph.name(id).to_owned()));

    let value = graph.value(id);
    if !value.is_nothing() {
        object.insert("value".to_owned(), value_to_json(graph, value)?);
    }

    let children = graph.children(id);
    if !children.is_empty() {
        let mapped = children
            .iter()
            .map(|&child| to_json(graph, child))
            .collect::<Result<Vec<_>, _>>()?;
        object.insert("children".to_owned(), Json::Array(mapped));
    }

    Ok(Json::Object(object))
}

fn value_to_json(graph: &NodeGraph, value: &Value) -> Result<Json, TextError> {
    match value {
        Value::Nothing => Ok(Json::Null),
        Value::Bool(b) => Ok(Json::Bool(*b)),
        Value::Int(i) => Ok(Json::Number((*i).into())),
        Value::Float(f) => Number::from_f64(*f)
            .map(Json::Number)
            .ok_or(TextError::Unprintable { kind: "float" }),
        Value::Str(s) => Ok(Json::String(s.clone())),
        Value::Dec(d) => Ok(json!({ "dec": d.to_string() })),
        Value::Date(d) => Ok(json!({ "date": d.to_rfc3339() })),
        Value::Blob(b) => Ok(json!({ "blob": BASE64.encode(b) })),
        Value::Expr(e) => Ok(json!({ "expr": e.text() })),
        Value::Node(inner) => Ok(json!({ "node": to_json(graph, *inner)? })),
        Value::List(items) => items
            .iter()
            .map(|item| value_to_json(graph, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Json::Array),
        Value::Dynamic(_) => Err(TextError::Unprintable { kind: "dynamic" }),
    }
}

/// Build a detached subtree from JSON produced by [`to_json`].
pub fn from_json(graph: &mut NodeGraph, json: &Json) -> Result<NodeId, TextError> {
    let object = json
        .as_object()
        .ok_or_else(|| TextError::Json(format!("expected an object, found {json}")))?;
    let name = match object.get("name") {
        Some(Json::String(name)) => name.clone(),
        Some(other) => return Err(TextError::Json(format!("non-string name {other}"))),
        None => String::new(),
    };
    let value = match object.get("value") {
        Some(value) => json_to_value(graph, value)?,
        None => Value::Nothing,
    };
    let node = graph.node_with(name, value);

    if let Some(children) = object.get("children") {
        let children = children
            .as_array()
            .ok_or_else(|| TextError::Json("children is not an array".to_owned()))?;
        for child in children {
            let built = from_json(graph, child)?;
            graph
                .add(node, built)
                .expect("freshly created node has no ancestors");
        }
    }
    Ok(node)
}

fn json_to_value(graph: &mut NodeGraph, json: &Json) -> Result<Value, TextError> {
    match json {
        Json::Null => Ok(Value::Nothing),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(TextError::Json(format!("unrepresentable number {n}")))
            }
        }
        Json::String(s) => Ok(Value::Str(s.clone())),
        Json::Array(items) => items
            .iter()
            .map(|item| json_to_value(graph, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        Json::Object(object) => {
            let mut fields = object.iter();
            let (tag, payload) = fields
                .next()
                .ok_or_else(|| TextError::Json("empty value object".to_owned()))?;
            if fields.next().is_some() {
                return Err(TextError::Json("tagged value with extra fields".to_owned()));
            }
            tagged_value(graph, tag, payload)
        }
    }
}

fn tagged_value(graph: &mut NodeGraph, tag: &str, payload: &Json) -> Result<Value, TextError> {
    let text = || {
        payload
            .as_str()
            .ok_or_else(|| TextError::Json(format!("non-string {tag} payload")))
    };
    match tag {
        "dec" => text()?
            .parse()
            .map(Value::Dec)
            .map_err(|_| TextError::Json(format!("invalid dec payload {payload}"))),
        "date" => DateTime::parse_from_rfc3339(text()?)
            .map(|d| Value::Date(d.with_timezone(&Utc)))
            .map_err(|_| TextError::Json(format!("invalid date payload {payload}"))),
        "blob" => BASE64
            .decode(text()?)
            .map(Value::Blob)
            .map_err(|_| TextError::Json(format!("invalid blob payload {payload}"))),
        "expr" => Expression::compile(text()?)
            .map(Value::Expr)
            .map_err(|e| TextError::Json(e.to_string())),
        "node" => from_json(graph, payload).map(Value::Node),
        other => Err(TextError::UnknownKind(other.to_owned())),
    }
}
