//! Arena storage for the command tree.
//!
//! The host's [`Command`] values are flattened into a vector once, when the
//! dispatcher is created. Nodes refer to each other by [`NodeId`]; the parent
//! link is an optional id that is rewritten on every descent.

use crate::command::{Action, Command};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Handle to a node of a [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

pub(crate) struct Node {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) rank: i32,
    pub(crate) function: Option<Action>,
    pub(crate) pre: Option<Action>,
    pub(crate) post: Option<Action>,
    pub(crate) children: BTreeMap<char, NodeId>,
    pub(crate) parent: Option<NodeId>,
}

pub struct CommandTree {
    nodes: Vec<Node>,
}

impl CommandTree {
    /// Flattens `root` and all its descendants. The root gets no parent.
    pub fn new(root: Command) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.insert(root);
        tree
    }

    fn insert(&mut self, command: Command) -> NodeId {
        let Command {
            title,
            description,
            rank,
            function,
            pre,
            post,
            children,
        } = command;

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            title,
            description,
            rank,
            function,
            pre,
            post,
            children: BTreeMap::new(),
            parent: None,
        });

        for (key, child) in children {
            let child_id = self.insert(child);
            self.nodes[id.0].children.insert(key, child_id);
        }
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn title(&self, id: NodeId) -> &str {
        &self.nodes[id.0].title
    }

    pub fn description(&self, id: NodeId) -> &str {
        &self.nodes[id.0].description
    }

    pub fn rank(&self, id: NodeId) -> i32 {
        self.nodes[id.0].rank
    }

    /// The node this one was last entered from. `None` for the root and for
    /// nodes never entered.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn child(&self, id: NodeId, key: char) -> Option<NodeId> {
        self.nodes[id.0].children.get(&key).copied()
    }

    pub fn has_child(&self, id: NodeId, key: char) -> bool {
        self.nodes[id.0].children.contains_key(&key)
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        !self.nodes[id.0].children.is_empty()
    }

    pub fn has_function(&self, id: NodeId) -> bool {
        self.nodes[id.0].function.is_some()
    }

    /// Child keys of `id` in key order, without any rank sorting.
    pub fn keys(&self, id: NodeId) -> impl Iterator<Item = char> + '_ {
        self.nodes[id.0].children.keys().copied()
    }

    /// Children of `id` in display order, see [`compare_rank`].
    pub fn children(&self, id: NodeId) -> Vec<(char, NodeId)> {
        let mut children: Vec<(char, NodeId)> = self.nodes[id.0]
            .children
            .iter()
            .map(|(k, c)| (*k, *c))
            .collect();
        children.sort_by(|(_, a), (_, b)| compare_rank(self.rank(*a), self.rank(*b)));
        children
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.nodes[id.0].parent = Some(parent);
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

/// Display order of two ranks.
///
/// Non-zero ranks sort ascending. Rank 0 is never less than anything, so
/// unranked commands always come after ranked ones.
pub fn compare_rank(a: i32, b: i32) -> Ordering {
    match (a, b) {
        (0, 0) => Ordering::Equal,
        (0, _) => Ordering::Greater,
        (_, 0) => Ordering::Less,
        _ => a.cmp(&b),
    }
}
