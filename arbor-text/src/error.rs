//! Errors for the textual and JSON forms.

use thiserror::Error;

/// Errors raised while parsing or printing node trees.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TextError {
    /// The input text violates the line format.
    #[error("line {line}: {message}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A typed value carries an unrecognized kind tag.
    #[error("unknown value kind {0:?}")]
    UnknownKind(String),

    /// A value of this kind has no textual form.
    #[error("{kind} values have no textual form")]
    Unprintable {
        /// The unrepresentable value's kind tag.
        kind: &'static str,
    },

    /// The JSON input does not describe a node.
    #[error("malformed node JSON: {0}")]
    Json(String),
}
