//! Error types for tree manipulation, value conversion, and expression
//! compilation.

use thiserror::Error;

/// Errors raised by structural operations and value reads on a
/// [`NodeGraph`](crate::NodeGraph).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphError {
    /// A value could not be converted to the requested type.
    #[error("cannot convert {value:?} ({kind}) to {target}")]
    Conversion {
        /// Invariant string form of the offending value.
        value: String,
        /// The value's kind tag (`"int"`, `"str"`, ...).
        kind: &'static str,
        /// The requested target type.
        target: &'static str,
    },

    /// A single-value read was backed by an expression that selected more
    /// than one node.
    #[error("expression {expr:?} selected {matches} nodes where a single value was required")]
    Ambiguous {
        /// The expression's textual form.
        expr: String,
        /// How many nodes it selected.
        matches: usize,
    },

    /// `insert_before`/`insert_after` was attempted relative to a node with
    /// no parent.
    #[error("node {name:?} has no parent to insert a sibling under")]
    NoParent {
        /// Name of the root node used as the sibling anchor.
        name: String,
    },

    /// An attachment would have made a node its own ancestor.
    #[error("attaching {name:?} here would make it its own ancestor")]
    Cycle {
        /// Name of the node that was being attached.
        name: String,
    },
}

/// Errors raised while compiling an expression's textual form.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ExprError {
    /// An indirection step (`{N}`) whose operand is not a valid index.
    #[error("malformed indirection step {step:?}")]
    BadIndirection {
        /// The offending step text.
        step: String,
    },

    /// A slice step (`[START,COUNT]`) whose operands are not two valid
    /// numbers.
    #[error("malformed slice step {step:?}, expected [start,count]")]
    BadSlice {
        /// The offending step text.
        step: String,
    },

    /// An all-digit step whose number does not fit an index.
    #[error("child index step {step:?} is out of range")]
    BadChildIndex {
        /// The offending step text.
        step: String,
    },
}
