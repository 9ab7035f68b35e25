//! The arena-backed node tree.
//!
//! All nodes live inside a [`NodeGraph`]; callers address them through
//! copyable [`NodeId`] handles. Child lists own their members, parent links
//! are plain back-indices, and structural operations only ever rewrite index
//! lists. Memory is reclaimed when the whole graph is dropped, which is why
//! a graph is meant to live for one logical unit of work.

use crate::error::GraphError;
use crate::value::Value;

/// Stable handle to a node inside a [`NodeGraph`].
///
/// Ids are only meaningful for the graph that minted them; using one against
/// another graph (or after conjuring it out of thin air) is a logic error and
/// panics like an out-of-bounds slice index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(u32);

struct NodeRecord {
    name: String,
    value: Value,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An ordered tree of named, value-carrying nodes.
#[derive(Default)]
pub struct NodeGraph {
    nodes: Vec<NodeRecord>,
}

impl NodeGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever created in this graph, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no node has been created yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a detached node with no value.
    pub fn node(&mut self, name: impl Into<String>) -> NodeId {
        self.node_with(name, Value::Nothing)
    }

    /// Create a detached node carrying a value.
    pub fn node_with(&mut self, name: impl Into<String>, value: impl Into<Value>) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).expect("node count exceeds u32 range"));
        self.nodes.push(NodeRecord {
            name: name.into(),
            value: value.into(),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn rec(&self, id: NodeId) -> &NodeRecord {
        &self.nodes[id.0 as usize]
    }

    fn rec_mut(&mut self, id: NodeId) -> &mut NodeRecord {
        &mut self.nodes[id.0 as usize]
    }

    /// The node's name. Never absent, may be empty, not unique among
    /// siblings.
    pub fn name(&self, id: NodeId) -> &str {
        &self.rec(id).name
    }

    /// Rename a node.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) {
        self.rec_mut(id).name = name.into();
    }

    /// The node's value.
    pub fn value(&self, id: NodeId) -> &Value {
        &self.rec(id).value
    }

    /// Replace the node's value.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<Value>) {
        self.rec_mut(id).value = value.into();
    }

    /// The node's parent, or `None` for a root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.rec(id).parent
    }

    /// The node's children, in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.rec(id).children
    }

    /// The sibling immediately before this node, if any.
    pub fn previous(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = self.position(parent, id);
        if pos == 0 { None } else { Some(siblings[pos - 1]) }
    }

    /// The sibling immediately after this node, if any.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = self.position(parent, id);
        siblings.get(pos + 1).copied()
    }

    /// The topmost ancestor of a node (the node itself when detached).
    pub fn root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    fn position(&self, parent: NodeId, child: NodeId) -> usize {
        self.rec(parent)
            .children
            .iter()
            .position(|&c| c == child)
            .expect("parent/child links out of sync")
    }

    fn is_self_or_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut current = Some(of);
        while let Some(node) = current {
            if node == candidate {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    fn attach(&mut self, parent: NodeId, at: Option<usize>, child: NodeId) -> Result<(), GraphError> {
        if self.is_self_or_ancestor(child, parent) {
            return Err(GraphError::Cycle {
                name: self.name(child).to_owned(),
            });
        }
        self.detach(child);
        let index = at.unwrap_or(self.rec(parent).children.len());
        self.rec_mut(parent).children.insert(index, child);
        self.rec_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Append `child` to the end of `parent`'s child sequence.
    ///
    /// A child that already has a parent is moved, not duplicated. Attaching
    /// a node under itself or one of its own descendants fails with
    /// [`GraphError::Cycle`].
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<(), GraphError> {
        self.attach(parent, None, child)
    }

    /// Insert `child` at `index` in `parent`'s child sequence, with the same
    /// re-parenting rule as [`NodeGraph::add`]. `index` may equal the child
    /// count (append); anything beyond panics.
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<(), GraphError> {
        self.attach(parent, Some(index), child)
    }

    /// Insert `child` immediately before `sibling` under `sibling`'s parent.
    ///
    /// Fails with [`GraphError::NoParent`] when `sibling` is a root.
    pub fn insert_before(&mut self, sibling: NodeId, child: NodeId) -> Result<(), GraphError> {
        self.insert_beside(sibling, child, 0)
    }

    /// Insert `child` immediately after `sibling` under `sibling`'s parent.
    ///
    /// Fails with [`GraphError::NoParent`] when `sibling` is a root.
    pub fn insert_after(&mut self, sibling: NodeId, child: NodeId) -> Result<(), GraphError> {
        self.insert_beside(sibling, child, 1)
    }

    fn insert_beside(&mut self, sibling: NodeId, child: NodeId, offset: usize) -> Result<(), GraphError> {
        let parent = self.parent(sibling).ok_or_else(|| GraphError::NoParent {
            name: self.name(sibling).to_owned(),
        })?;
        if child == sibling {
            return Ok(());
        }
        if self.is_self_or_ancestor(child, parent) {
            return Err(GraphError::Cycle {
                name: self.name(child).to_owned(),
            });
        }
        self.detach(child);
        // The sibling's position is read after the detach: removing the child
        // from this same parent may have shifted it.
        let at = self.position(parent, sibling) + offset;
        self.rec_mut(parent).children.insert(at, child);
        self.rec_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Detach a node from its parent, clearing the back-link and removing it
    /// from the parent's child sequence. A node that is already detached is
    /// left untouched.
    pub fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.rec(child).parent {
            let pos = self.position(parent, child);
            self.rec_mut(parent).children.remove(pos);
            self.rec_mut(child).parent = None;
        }
    }

    /// Detach all children of a node.
    pub fn clear(&mut self, parent: NodeId) {
        let children = std::mem::take(&mut self.rec_mut(parent).children);
        for child in children {
            self.rec_mut(child).parent = None;
        }
    }

    /// Deep-copy a subtree: names, values, and topology, sharing no node
    /// identity with the original. Nested [`Value::Node`] trees are cloned
    /// recursively; [`Value::Dynamic`] payloads are shared by reference.
    /// The copy comes back detached.
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let name = self.rec(id).name.clone();
        let value = self.rec(id).value.clone();
        let value = self.clone_value(value);
        let copy = self.node_with(name, value);
        let children = self.rec(id).children.clone();
        for child in children {
            let child_copy = self.clone_subtree(child);
            self.rec_mut(copy).children.push(child_copy);
            self.rec_mut(child_copy).parent = Some(copy);
        }
        copy
    }

    fn clone_value(&mut self, value: Value) -> Value {
        match value {
            Value::Node(inner) => Value::Node(self.clone_subtree(inner)),
            Value::List(items) => {
                Value::List(items.into_iter().map(|v| self.clone_value(v)).collect())
            }
            other => other,
        }
    }

    /// All nodes of a subtree, depth-first, pre-order, the subtree root
    /// first.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            graph: self,
            stack: vec![id],
        }
    }
}

/// Pre-order iterator over a subtree, produced by
/// [`NodeGraph::descendants`].
pub struct Descendants<'g> {
    graph: &'g NodeGraph,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        for &child in self.graph.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}
