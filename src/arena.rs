use generational_arena::{Arena, Index};
use std::collections::VecDeque;
use std::fmt;
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};

/// Tree node in the arena-based hierarchy structure.
///
/// Stores only the label and the ordered child indices; the parent is
/// passed explicitly where an operation needs it.
#[derive(Debug)]
pub struct TreeNode {
    /// Text label carried by this node, not required to be unique
    pub label: String,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Arena-based n-ary tree of labeled nodes.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Every arena entry is reachable from the root; removing a child frees its
/// whole subtree.
#[derive(Debug)]
pub struct LabelTree {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for LabelTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts a new node with the given label.
    ///
    /// With `parent = None` the node becomes the root; the root is set once
    /// and a second attempt fails with `RootAlreadySet`. With
    /// `parent = Some(idx)` the node is appended to the end of that node's
    /// child sequence.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, label: &str, parent: Option<Index>) -> TreeResult<Index> {
        match parent {
            Some(parent_idx) => {
                if !self.arena.contains(parent_idx) {
                    return Err(TreeError::NodeNotFound(parent_idx));
                }
                let node_idx = self.arena.insert(TreeNode {
                    label: label.to_string(),
                    children: Vec::new(),
                });
                if let Some(parent_node) = self.arena.get_mut(parent_idx) {
                    parent_node.children.push(node_idx);
                }
                Ok(node_idx)
            }
            None => {
                if self.root.is_some() {
                    return Err(TreeError::RootAlreadySet);
                }
                let node_idx = self.arena.insert(TreeNode {
                    label: label.to_string(),
                    children: Vec::new(),
                });
                self.root = Some(node_idx);
                Ok(node_idx)
            }
        }
    }

    /// Removes every direct child of `parent` whose label equals `label`,
    /// freeing each removed child's entire subtree. Surviving children keep
    /// their relative order; grandchildren are never inspected.
    ///
    /// Returns the number of direct children removed (0 is a no-op).
    #[instrument(level = "trace", skip(self))]
    pub fn remove_children(&mut self, parent: Index, label: &str) -> TreeResult<usize> {
        let children = self
            .arena
            .get(parent)
            .ok_or(TreeError::NodeNotFound(parent))?
            .children
            .clone();

        let (matching, surviving): (Vec<Index>, Vec<Index>) = children
            .into_iter()
            .partition(|&child| {
                self.arena
                    .get(child)
                    .map_or(false, |node| node.label == label)
            });

        if matching.is_empty() {
            return Ok(0);
        }

        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children = surviving;
        }

        let removed = matching.len();
        for child in matching {
            self.remove_subtree(child);
        }
        Ok(removed)
    }

    fn remove_subtree(&mut self, node_idx: Index) {
        let mut stack = vec![node_idx];
        while let Some(current_idx) = stack.pop() {
            if let Some(node) = self.arena.remove(current_idx) {
                stack.extend(node.children);
            }
        }
    }

    /// First node whose label equals `label`, in pre-order.
    /// The search halts at the first match.
    #[instrument(level = "debug", skip(self))]
    pub fn find(&self, label: &str) -> Option<Index> {
        self.iter()
            .find(|(_, node)| node.label == label)
            .map(|(idx, _)| idx)
    }

    /// Appends a new child under the first pre-order node labeled
    /// `parent_label`.
    ///
    /// Returns the index of the new node, or `Ok(None)` when no node carries
    /// that label. An empty tree is reported as `TreeError::EmptyTree`.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child_to_parent(
        &mut self,
        child_label: &str,
        parent_label: &str,
    ) -> TreeResult<Option<Index>> {
        if self.root.is_none() {
            return Err(TreeError::EmptyTree);
        }
        match self.find(parent_label) {
            Some(parent_idx) => self.insert_node(child_label, Some(parent_idx)).map(Some),
            None => Ok(None),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order traversal restricted to the subtree under `start`.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_from(&self, start: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, Some(start))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_breadth_first(&self) -> BreadthFirstIterator<'_> {
        BreadthFirstIterator::new(self, self.root)
    }

    /// Level-order traversal restricted to the subtree under `start`.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_breadth_first_from(&self, start: Index) -> BreadthFirstIterator<'_> {
        BreadthFirstIterator::new(self, Some(start))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, self.root)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder_from(&self, start: Index) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, Some(start))
    }

    /// Labels in pre-order visit order. Empty trees return an empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn depth_first_labels(&self) -> Vec<String> {
        self.iter().map(|(_, node)| node.label.clone()).collect()
    }

    /// Labels in level-order visit order. Empty trees return an empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn breadth_first_labels(&self) -> Vec<String> {
        self.iter_breadth_first()
            .map(|(_, node)| node.label.clone())
            .collect()
    }

    /// Number of nodes in the tree, 0 when empty.
    #[instrument(level = "debug", skip(self))]
    pub fn node_count(&self) -> usize {
        if let Some(root) = self.root {
            self.count_subtree(root)
        } else {
            0
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn count_subtree(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.count_subtree(child))
                .sum::<usize>()
        } else {
            0
        }
    }

    /// Longest downward path measured in nodes: an empty tree has depth 0,
    /// a single node has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.depth_from(root)
        } else {
            0
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn depth_from(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.depth_from(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects the labels of all leaf nodes (nodes with no children) in
    /// pre-order.
    ///
    /// Empty trees return an empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_labels(&self) -> Vec<String> {
        let mut leaves = Vec::new();
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    #[instrument(level = "trace", skip(self))]
    fn collect_leaves(&self, node_idx: Index, leaves: &mut Vec<String>) {
        if let Some(node) = self.get_node(node_idx) {
            if node.children.is_empty() {
                leaves.push(node.label.clone());
            } else {
                for &child in &node.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }
}

pub struct TreeIterator<'a> {
    tree: &'a LabelTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a LabelTree, start: Option<Index>) -> Self {
        let mut stack = Vec::new();
        if let Some(start) = start {
            stack.push(start);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct BreadthFirstIterator<'a> {
    tree: &'a LabelTree,
    queue: VecDeque<Index>,
}

impl<'a> BreadthFirstIterator<'a> {
    fn new(tree: &'a LabelTree, start: Option<Index>) -> Self {
        let mut queue = VecDeque::new();
        if let Some(start) = start {
            queue.push_back(start);
        }
        Self { tree, queue }
    }
}

impl<'a> Iterator for BreadthFirstIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.queue.pop_front() {
            if let Some(node) = self.tree.get_node(current_idx) {
                for &child in &node.children {
                    self.queue.push_back(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a LabelTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a LabelTree, start: Option<Index>) -> Self {
        let mut stack = Vec::new();
        if let Some(start) = start {
            stack.push((start, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
