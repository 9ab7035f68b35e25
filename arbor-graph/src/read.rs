//! Typed reads over node values, resolving expression values transparently.

use crate::convert::FromValue;
use crate::error::GraphError;
use crate::graph::{NodeGraph, NodeId};
use crate::value::Value;

impl NodeGraph {
    /// Read a node's value as `T`, resolving expression values.
    ///
    /// A [`Value::Expr`] is evaluated with the node itself as identity:
    /// zero results read as `None`, more than one fails with
    /// [`GraphError::Ambiguous`], and a single result is read recursively,
    /// so an expression pointing at another expression keeps resolving.
    /// Non-expression values convert via [`FromValue`]; a missing value
    /// reads as `None`.
    pub fn get<T: FromValue>(&self, id: NodeId) -> Result<Option<T>, GraphError> {
        match self.value(id) {
            Value::Expr(expr) => {
                let hits = expr.evaluate(self, id);
                match hits.as_slice() {
                    [] => Ok(None),
                    [single] => self.get(*single),
                    _ => Err(GraphError::Ambiguous {
                        expr: expr.text().to_owned(),
                        matches: hits.len(),
                    }),
                }
            }
            Value::Nothing => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    /// Read a node's value as `T` without resolving expressions: an
    /// expression value converts like any other value (to its own textual
    /// form, for instance), instead of being evaluated.
    pub fn get_literal<T: FromValue>(&self, id: NodeId) -> Result<Option<T>, GraphError> {
        match self.value(id) {
            Value::Nothing => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    /// Read a node's value as a sequence of `T`.
    ///
    /// An expression value is evaluated and flattened recursively: a result
    /// node whose own value is an expression expands further, which is what
    /// makes expressions composable. A [`Value::List`] yields each element,
    /// mapping `Nothing` elements to `T::default()`. A missing value yields
    /// nothing, and any other single value yields itself alone.
    pub fn get_list<T: FromValue + Default>(&self, id: NodeId) -> Result<Vec<T>, GraphError> {
        let mut out = Vec::new();
        self.collect(id, self.value(id), &mut out)?;
        Ok(out)
    }

    fn collect<T: FromValue + Default>(
        &self,
        identity: NodeId,
        value: &Value,
        out: &mut Vec<T>,
    ) -> Result<(), GraphError> {
        match value {
            Value::Nothing => Ok(()),
            Value::Expr(expr) => {
                for hit in expr.evaluate(self, identity) {
                    self.collect(hit, self.value(hit), out)?;
                }
                Ok(())
            }
            Value::List(items) => {
                for item in items {
                    if item.is_nothing() {
                        out.push(T::default());
                    } else {
                        out.push(T::from_value(item)?);
                    }
                }
                Ok(())
            }
            other => {
                out.push(T::from_value(other)?);
                Ok(())
            }
        }
    }
}
