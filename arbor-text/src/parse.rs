//! Parsing the line-oriented textual form.

use arbor_graph::{Expression, NodeGraph, NodeId, Value};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};

use crate::error::TextError;
use crate::quoting::unquote;

/// Parse the textual form into `graph`, returning the top-level nodes in
/// document order.
///
/// Indentation is two spaces per level; blank lines are skipped; a child may
/// only be indented one level past its parent.
pub fn parse(graph: &mut NodeGraph, text: &str) -> Result<Vec<NodeId>, TextError> {
    let mut roots = Vec::new();
    let mut trail: Vec<(usize, NodeId)> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let body = raw.trim_start_matches(' ');
        let indent = raw.len() - body.len();
        if indent % 2 != 0 {
            return Err(TextError::Syntax {
                line,
                message: "indentation must be a multiple of two spaces".to_owned(),
            });
        }
        let depth = indent / 2;
        let (name, value) = split_line(body).map_err(|message| TextError::Syntax { line, message })?;
        let node = graph.node_with(name, value);

        while trail.last().is_some_and(|&(d, _)| d >= depth) {
            trail.pop();
        }
        match trail.last() {
            None => {
                if depth != 0 {
                    return Err(TextError::Syntax {
                        line,
                        message: "indented line has no parent".to_owned(),
                    });
                }
                roots.push(node);
            }
            Some(&(parent_depth, parent)) => {
                if depth != parent_depth + 1 {
                    return Err(TextError::Syntax {
                        line,
                        message: "indentation jumps more than one level".to_owned(),
                    });
                }
                graph
                    .add(parent, node)
                    .expect("freshly created node has no ancestors");
            }
        }
        trail.push((depth, node));
    }

    Ok(roots)
}

fn split_line(body: &str) -> Result<(String, Value), String> {
    let (name, rest) = if body.starts_with('"') {
        let (name, rest) = unquote(body)?;
        match rest.strip_prefix(':') {
            Some(rest) => (name, rest),
            None if rest.is_empty() => return Ok((name, Value::Nothing)),
            None => return Err("unexpected text after quoted name".to_owned()),
        }
    } else {
        match body.split_once(':') {
            Some((name, rest)) => (name.to_owned(), rest),
            None => return Ok((body.to_owned(), Value::Nothing)),
        }
    };
    Ok((name, split_value(rest)?))
}

fn split_value(rest: &str) -> Result<Value, String> {
    if rest.starts_with('"') {
        let (text, tail) = unquote(rest)?;
        if !tail.is_empty() {
            return Err("unexpected text after quoted value".to_owned());
        }
        return Ok(Value::Str(text));
    }
    if let Some((kind, payload)) = rest.split_once(':') {
        if let Some(value) = typed_value(kind, payload)? {
            return Ok(value);
        }
    }
    Ok(Value::Str(rest.to_owned()))
}

/// Parse a `kind:payload` pair; `Ok(None)` means the prefix is not a kind
/// tag and the whole fragment is a plain string.
fn typed_value(kind: &str, payload: &str) -> Result<Option<Value>, String> {
    let value = match kind {
        "bool" => Value::Bool(
            payload
                .parse()
                .map_err(|_| format!("invalid bool value {payload:?}"))?,
        ),
        "int" => Value::Int(
            payload
                .parse()
                .map_err(|_| format!("invalid int value {payload:?}"))?,
        ),
        "float" => Value::Float(
            payload
                .parse()
                .map_err(|_| format!("invalid float value {payload:?}"))?,
        ),
        "dec" => Value::Dec(
            payload
                .parse()
                .map_err(|_| format!("invalid dec value {payload:?}"))?,
        ),
        "date" => Value::Date(
            DateTime::parse_from_rfc3339(payload)
                .map(|d| d.with_timezone(&Utc))
                .map_err(|_| format!("invalid date value {payload:?}"))?,
        ),
        "blob" => Value::Blob(
            BASE64
                .decode(payload)
                .map_err(|_| format!("invalid blob value {payload:?}"))?,
        ),
        "expr" => Value::Expr(Expression::compile(payload).map_err(|e| e.to_string())?),
        _ => return Ok(None),
    };
    Ok(Some(value))
}
