#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod convert;
pub mod error;
pub mod expr;
pub mod graph;
pub mod read;
pub mod value;

pub use convert::FromValue;
pub use error::{ExprError, GraphError};
pub use expr::{Expression, Step};
pub use graph::{Descendants, NodeGraph, NodeId};
pub use value::Value;
