//! The path expression engine.
//!
//! An [`Expression`] is compiled once from its textual form by splitting on
//! `/`; each non-empty segment becomes one [`Step`]. Evaluation threads a
//! node set through the chain left to right, starting from the single-element
//! set holding the identity node, the node the expression was read from.
//! Steps are pure sequence transforms: no side effects, no lookahead.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::ExprError;
use crate::graph::{NodeGraph, NodeId};
use crate::value::Value;

/// A compiled, reusable query over a node graph.
///
/// Cheap to clone; equality and hashing go by the original text.
#[derive(Clone)]
pub struct Expression {
    text: Arc<str>,
    steps: Arc<[Step]>,
}

impl Expression {
    /// Compile a textual path specification.
    pub fn compile(text: &str) -> Result<Self, ExprError> {
        let mut steps = Vec::new();
        for segment in text.split('/') {
            if segment.is_empty() {
                continue;
            }
            steps.push(Step::parse(segment)?);
        }
        Ok(Self {
            text: text.into(),
            steps: steps.into(),
        })
    }

    /// The original textual form.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The compiled step chain.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Evaluate against `identity`, the expression's fixed reference point.
    ///
    /// Returns the selected nodes in evaluation order. Evaluation cannot
    /// fail; malformed specifications are rejected at compile time.
    pub fn evaluate(&self, graph: &NodeGraph, identity: NodeId) -> Vec<NodeId> {
        let mut set = vec![identity];
        for step in self.steps.iter() {
            if set.is_empty() {
                break;
            }
            set = step.apply(graph, identity, set);
        }
        set
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Expression {}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expression").field(&self.text).finish()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One elementary navigation or filter step of an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// `*`: all direct children of each input node.
    Children,
    /// `#`: replace each input node with the node its value references;
    /// inputs without a node-typed value are dropped.
    Deref,
    /// `-`: elder sibling, wrapping to the last child when there is none.
    /// A detached input yields itself.
    Elder,
    /// `+`: younger sibling, wrapping to the first child when there is
    /// none. A detached input yields itself.
    Younger,
    /// `.`: parent of each input node, deduplicated.
    Parent,
    /// `..`: root ancestor of the first input node only.
    Root,
    /// `**`: every input node and all of its descendants, depth-first,
    /// pre-order.
    Subtree,
    /// Name filter, either a plain segment or the `\NAME` escape form.
    Name(String),
    /// `{N}`: filter by the name held as the value of the identity node's
    /// Nth child.
    IndirectName(usize),
    /// `=VALUE`: keep nodes whose value's invariant string form equals the
    /// operand; an empty operand matches valueless nodes.
    ValueEq(String),
    /// `[START,COUNT]`: positional slice of the input sequence.
    Slice {
        /// Elements to skip.
        start: usize,
        /// Elements to keep.
        count: usize,
    },
    /// `@NAME`: nearest node named NAME found by walking preceding siblings
    /// and then ancestors of the first input node.
    Ancestor(String),
    /// Integer segment: each input node's Nth child, if present.
    ChildAt(usize),
}

impl Step {
    fn parse(segment: &str) -> Result<Self, ExprError> {
        match segment {
            "*" => return Ok(Step::Children),
            "#" => return Ok(Step::Deref),
            "-" => return Ok(Step::Elder),
            "+" => return Ok(Step::Younger),
            "." => return Ok(Step::Parent),
            ".." => return Ok(Step::Root),
            "**" => return Ok(Step::Subtree),
            _ => {}
        }
        if let Some(rest) = segment.strip_prefix('\\') {
            return Ok(Step::Name(rest.to_owned()));
        }
        if let Some(inner) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            let index = inner
                .trim()
                .parse::<usize>()
                .map_err(|_| ExprError::BadIndirection {
                    step: segment.to_owned(),
                })?;
            return Ok(Step::IndirectName(index));
        }
        if let Some(value) = segment.strip_prefix('=') {
            return Ok(Step::ValueEq(value.to_owned()));
        }
        if let Some(inner) = segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            let (start, count) = inner.split_once(',').ok_or_else(|| ExprError::BadSlice {
                step: segment.to_owned(),
            })?;
            let bad = |_| ExprError::BadSlice {
                step: segment.to_owned(),
            };
            return Ok(Step::Slice {
                start: start.trim().parse().map_err(bad)?,
                count: count.trim().parse().map_err(bad)?,
            });
        }
        if let Some(name) = segment.strip_prefix('@') {
            return Ok(Step::Ancestor(name.to_owned()));
        }
        if segment.bytes().all(|b| b.is_ascii_digit()) {
            let index = segment.parse::<usize>().map_err(|_| ExprError::BadChildIndex {
                step: segment.to_owned(),
            })?;
            return Ok(Step::ChildAt(index));
        }
        Ok(Step::Name(segment.to_owned()))
    }

    /// Apply this step to an input set, relative to the fixed identity node.
    pub fn apply(&self, graph: &NodeGraph, identity: NodeId, input: Vec<NodeId>) -> Vec<NodeId> {
        match self {
            Step::Children => input
                .iter()
                .flat_map(|&n| graph.children(n).iter().copied())
                .collect(),
            Step::Deref => input
                .iter()
                .filter_map(|&n| match graph.value(n) {
                    Value::Node(target) => Some(*target),
                    _ => None,
                })
                .collect(),
            Step::Elder => input
                .iter()
                .map(|&n| match graph.previous(n) {
                    Some(prev) => prev,
                    None => match graph.parent(n) {
                        Some(parent) => *graph
                            .children(parent)
                            .last()
                            .expect("parent of an attached node has children"),
                        None => n,
                    },
                })
                .collect(),
            Step::Younger => input
                .iter()
                .map(|&n| match graph.next(n) {
                    Some(next) => next,
                    None => match graph.parent(n) {
                        Some(parent) => graph.children(parent)[0],
                        None => n,
                    },
                })
                .collect(),
            Step::Parent => {
                let mut parents = Vec::new();
                for &n in &input {
                    if let Some(parent) = graph.parent(n) {
                        if !parents.contains(&parent) {
                            parents.push(parent);
                        }
                    }
                }
                parents
            }
            Step::Root => input.first().map(|&n| graph.root(n)).into_iter().collect(),
            Step::Subtree => input
                .iter()
                .flat_map(|&n| graph.descendants(n))
                .collect(),
            Step::Name(want) => input
                .into_iter()
                .filter(|&n| graph.name(n) == want)
                .collect(),
            Step::IndirectName(index) => match graph.children(identity).get(*index) {
                Some(&holder) => {
                    let want = graph.value(holder).display_string();
                    input
                        .into_iter()
                        .filter(|&n| graph.name(n) == want)
                        .collect()
                }
                None => Vec::new(),
            },
            Step::ValueEq(want) => input
                .into_iter()
                .filter(|&n| graph.value(n).display_string() == *want)
                .collect(),
            Step::Slice { start, count } => {
                input.into_iter().skip(*start).take(*count).collect()
            }
            Step::Ancestor(want) => {
                let Some(&first) = input.first() else {
                    return Vec::new();
                };
                let mut current = first;
                loop {
                    if let Some(prev) = graph.previous(current) {
                        current = prev;
                    } else if let Some(parent) = graph.parent(current) {
                        current = parent;
                    } else {
                        return Vec::new();
                    }
                    if graph.name(current) == want {
                        return vec![current];
                    }
                }
            }
            Step::ChildAt(index) => input
                .iter()
                .filter_map(|&n| graph.children(n).get(*index).copied())
                .collect(),
        }
    }
}
