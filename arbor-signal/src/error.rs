//! Error types for registry construction and signal dispatch.

use arbor_graph::{ExprError, GraphError};
use thiserror::Error;

/// Errors detected while building a [`SignalRegistry`](crate::SignalRegistry).
///
/// These are configuration mistakes: they surface once, at startup, never at
/// dispatch time.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A handler declared an empty dispatch name.
    #[error("handler {slot} declares an empty signal name")]
    EmptyName {
        /// Type name of the offending handler.
        slot: &'static str,
    },

    /// Two handlers declared the same dispatch name.
    #[error("signal name {name:?} is already claimed by {first}, also declared by {second}")]
    NameTaken {
        /// The doubly-claimed name.
        name: String,
        /// Type name of the handler that claimed it first.
        first: &'static str,
        /// Type name of the handler that claimed it again.
        second: &'static str,
    },
}

/// Errors raised while dispatching signals or reading scoped frames.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SignalError {
    /// No handler is registered under the dispatched name.
    #[error("no handler registered for signal {0:?}")]
    Unknown(String),

    /// The resolver produced no instance for a registered handler.
    #[error("resolver produced no instance of {slot} for signal {name:?}")]
    Unresolved {
        /// The dispatched name.
        name: String,
        /// Type name of the handler that failed to resolve.
        slot: &'static str,
    },

    /// The resolved handler does not implement the entry point this
    /// dispatch mode requires.
    #[error("handler for signal {name:?} has no {expected} entry point (available: {available})")]
    CapabilityMismatch {
        /// The dispatched name.
        name: String,
        /// The entry point the dispatch mode required.
        expected: &'static str,
        /// The entry point(s) the handler actually has.
        available: &'static str,
    },

    /// `peek` found no frame under the given name anywhere on the stack.
    #[error("no scoped frame named {0:?} on the stack")]
    NoFrame(String),

    /// `peek` found a frame, but its value is of a different type.
    #[error("scoped frame {name:?} does not hold a {expected}")]
    FrameType {
        /// The frame name.
        name: String,
        /// The requested type.
        expected: &'static str,
    },

    /// A tree operation or value read failed inside a handler.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// An expression failed to compile inside a handler.
    #[error(transparent)]
    Expr(#[from] ExprError),

    /// Any other handler failure.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
