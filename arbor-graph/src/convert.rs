//! Locale-invariant conversions between [`Value`] and concrete Rust types.
//!
//! Every conversion either succeeds exactly or fails with
//! [`GraphError::Conversion`]; there is no locale, no rounding surprise, no
//! partial parse. Strings parse with `str::parse`, dates with RFC 3339,
//! blobs with standard base64.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::error::GraphError;
use crate::expr::Expression;
use crate::value::Value;

/// Types a node value can be read as.
pub trait FromValue: Sized {
    /// Convert a borrowed value, failing with [`GraphError::Conversion`]
    /// when the value has no faithful representation in `Self`.
    fn from_value(value: &Value) -> Result<Self, GraphError>;
}

fn mismatch(value: &Value, target: &'static str) -> GraphError {
    GraphError::Conversion {
        value: value.display_string(),
        kind: value.kind(),
        target,
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, GraphError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Str(s) => s.trim().parse().map_err(|_| mismatch(value, "bool")),
            _ => Err(mismatch(value, "bool")),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, GraphError> {
        match value {
            Value::Int(i) => Ok(*i),
            Value::Float(f) if f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 => {
                Ok(*f as i64)
            }
            Value::Dec(d) => d.to_i64().ok_or_else(|| mismatch(value, "i64")),
            Value::Str(s) => s.trim().parse().map_err(|_| mismatch(value, "i64")),
            _ => Err(mismatch(value, "i64")),
        }
    }
}

impl FromValue for u64 {
    fn from_value(value: &Value) -> Result<Self, GraphError> {
        match value {
            Value::Int(i) => u64::try_from(*i).map_err(|_| mismatch(value, "u64")),
            Value::Dec(d) => d.to_u64().ok_or_else(|| mismatch(value, "u64")),
            Value::Str(s) => s.trim().parse().map_err(|_| mismatch(value, "u64")),
            _ => Err(mismatch(value, "u64")),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, GraphError> {
        match value {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            Value::Dec(d) => d.to_f64().ok_or_else(|| mismatch(value, "f64")),
            Value::Str(s) => s.trim().parse().map_err(|_| mismatch(value, "f64")),
            _ => Err(mismatch(value, "f64")),
        }
    }
}

impl FromValue for Decimal {
    fn from_value(value: &Value) -> Result<Self, GraphError> {
        match value {
            Value::Dec(d) => Ok(*d),
            Value::Int(i) => Ok(Decimal::from(*i)),
            Value::Float(f) => Decimal::from_f64(*f).ok_or_else(|| mismatch(value, "Decimal")),
            Value::Str(s) => s.trim().parse().map_err(|_| mismatch(value, "Decimal")),
            _ => Err(mismatch(value, "Decimal")),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Result<Self, GraphError> {
        match value {
            Value::Date(d) => Ok(*d),
            Value::Str(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|d| d.with_timezone(&Utc))
                .map_err(|_| mismatch(value, "DateTime<Utc>")),
            _ => Err(mismatch(value, "DateTime<Utc>")),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, GraphError> {
        match value {
            Value::List(_) | Value::Node(_) | Value::Dynamic(_) => {
                Err(mismatch(value, "String"))
            }
            other => Ok(other.display_string()),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self, GraphError> {
        match value {
            Value::Blob(b) => Ok(b.clone()),
            Value::Str(s) => BASE64
                .decode(s.trim())
                .map_err(|_| mismatch(value, "Vec<u8>")),
            _ => Err(mismatch(value, "Vec<u8>")),
        }
    }
}

impl FromValue for Expression {
    fn from_value(value: &Value) -> Result<Self, GraphError> {
        match value {
            Value::Expr(e) => Ok(e.clone()),
            Value::Str(s) => Expression::compile(s).map_err(|_| mismatch(value, "Expression")),
            _ => Err(mismatch(value, "Expression")),
        }
    }
}

/// Identity conversion: reads the value as-is.
impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, GraphError> {
        Ok(value.clone())
    }
}
