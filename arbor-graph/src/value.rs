//! The one value slot every node carries.
//!
//! Open-ended dynamic typing is replaced by an exhaustive tagged variant:
//! each supported scalar kind gets a case, plus "nested tree", "compiled
//! expression", and an opaque escape hatch for host objects the core never
//! inspects.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::expr::Expression;
use crate::graph::NodeId;

/// The value held by a node. `Nothing` means "no value".
#[derive(Clone, Default)]
pub enum Value {
    /// No value.
    #[default]
    Nothing,
    /// Boolean.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Exact decimal.
    Dec(Decimal),
    /// UTC timestamp.
    Date(DateTime<Utc>),
    /// String.
    Str(String),
    /// Raw bytes.
    Blob(Vec<u8>),
    /// A sequence of values. Elements may be `Nothing`; list reads map those
    /// to the target type's default instead of failing.
    List(Vec<Value>),
    /// A nested tree: the id of another node in the same graph, owned by the
    /// holding node for cloning purposes.
    Node(NodeId),
    /// A compiled query, marking the value as computed rather than literal.
    Expr(Expression),
    /// An opaque host object. Cloned by reference, never inspected.
    Dynamic(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Short tag naming this value's kind, used in error payloads and the
    /// textual serialization format.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nothing => "nothing",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Dec(_) => "dec",
            Value::Date(_) => "date",
            Value::Str(_) => "str",
            Value::Blob(_) => "blob",
            Value::List(_) => "list",
            Value::Node(_) => "node",
            Value::Expr(_) => "expr",
            Value::Dynamic(_) => "dynamic",
        }
    }

    /// True when this value is [`Value::Nothing`].
    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }

    /// The culture-invariant string form used by value filters (`=VALUE`),
    /// indirect name lookups (`{N}`), and stringifying conversions.
    ///
    /// `Nothing` and the non-scalar cases render as the empty string; blobs
    /// render as standard base64; dates as RFC 3339.
    pub fn display_string(&self) -> String {
        match self {
            Value::Nothing => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Dec(d) => d.to_string(),
            Value::Date(d) => d.to_rfc3339(),
            Value::Str(s) => s.clone(),
            Value::Blob(b) => BASE64.encode(b),
            Value::Expr(e) => e.text().to_owned(),
            Value::List(_) | Value::Node(_) | Value::Dynamic(_) => String::new(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => f.write_str("Nothing"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Dec(d) => f.debug_tuple("Dec").field(d).finish(),
            Value::Date(d) => f.debug_tuple("Date").field(d).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Blob(b) => write!(f, "Blob({} bytes)", b.len()),
            Value::List(v) => f.debug_tuple("List").field(v).finish(),
            Value::Node(n) => f.debug_tuple("Node").field(n).finish(),
            Value::Expr(e) => f.debug_tuple("Expr").field(&e.text()).finish(),
            Value::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Structural equality; `Dynamic` compares by allocation identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nothing, Value::Nothing) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Dec(a), Value::Dec(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Blob(a), Value::Blob(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a == b,
            (Value::Expr(a), Value::Expr(b)) => a == b,
            (Value::Dynamic(a), Value::Dynamic(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Dec(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Date(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Expression> for Value {
    fn from(v: Expression) -> Self {
        Value::Expr(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Nothing,
        }
    }
}
