//! Printing node trees back into the line-oriented textual form.

use arbor_graph::{NodeGraph, NodeId, Value};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::TextError;
use crate::quoting::{needs_quoting, quote};

/// Print the given top-level nodes and their subtrees.
///
/// The output parses back into an equal tree; values without a textual form
/// (`node`, `list`, `dynamic`) fail with [`TextError::Unprintable`].
pub fn print(graph: &NodeGraph, roots: &[NodeId]) -> Result<String, TextError> {
    let mut out = String::new();
    for &root in roots {
        print_node(graph, root, 0, &mut out)?;
    }
    Ok(out)
}

fn print_node(
    graph: &NodeGraph,
    id: NodeId,
    depth: usize,
    out: &mut String,
) -> Result<(), TextError> {
    for _ in 0..depth {
        out.push_str("  ");
    }

    let name = graph.name(id);
    if needs_quoting(name, true) {
        out.push_str(&quote(name));
    } else {
        out.push_str(name);
    }

    match graph.value(id) {
        Value::Nothing => {}
        Value::Str(s) => {
            // Quoting covers the typed-value ambiguity too: any string
            // containing a colon is quoted, so "int:5" stays a string.
            out.push(':');
            if needs_quoting(s, false) {
                out.push_str(&quote(s));
            } else {
                out.push_str(s);
            }
        }
        Value::Bool(b) => push_typed(out, "bool", &b.to_string()),
        Value::Int(i) => push_typed(out, "int", &i.to_string()),
        Value::Float(f) => push_typed(out, "float", &f.to_string()),
        Value::Dec(d) => push_typed(out, "dec", &d.to_string()),
        Value::Date(d) => push_typed(out, "date", &d.to_rfc3339()),
        Value::Blob(b) => push_typed(out, "blob", &BASE64.encode(b)),
        Value::Expr(e) => {
            if e.text().contains('\n') || e.text().contains('\r') {
                return Err(TextError::Unprintable { kind: "expr" });
            }
            push_typed(out, "expr", e.text());
        }
        other @ (Value::List(_) | Value::Node(_) | Value::Dynamic(_)) => {
            return Err(TextError::Unprintable { kind: other.kind() });
        }
    }
    out.push('\n');

    for &child in graph.children(id) {
        print_node(graph, child, depth + 1, out)?;
    }
    Ok(())
}

fn push_typed(out: &mut String, kind: &str, payload: &str) {
    out.push(':');
    out.push_str(kind);
    out.push(':');
    out.push_str(payload);
}
