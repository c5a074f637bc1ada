//! Tree builder constructing [`LabelTree`]s from parent-child label
//! relationships.

use std::collections::{HashMap, HashSet};

use tracing::instrument;

use crate::arena::LabelTree;
use crate::errors::{TreeError, TreeResult};

/// Constructs labeled trees from recorded parent-child relationships.
///
/// Relationships are an edge list keyed by parent label; `build` walks them
/// with an explicit stack. A label reached twice during one build means the
/// relationships do not form a tree (single parent per node) and is reported
/// as a cycle.
pub struct TreeBuilder {
    relationships: HashMap<String, Vec<String>>,
    visited_labels: HashSet<String>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            relationships: HashMap::new(),
            visited_labels: HashSet::new(),
        }
    }

    /// Records `child` as the next child of `parent`. Repeated calls with the
    /// same parent preserve insertion order.
    #[instrument(level = "trace", skip(self))]
    pub fn relate(&mut self, parent: &str, child: &str) -> &mut Self {
        self.relationships
            .entry(parent.to_string())
            .or_default()
            .push(child.to_string());
        self
    }

    /// Labels that appear as a parent but never as a child. Order is
    /// unspecified.
    #[instrument(level = "debug", skip(self))]
    pub fn roots(&self) -> Vec<String> {
        let mut root_labels = Vec::new();
        for label in self.relationships.keys() {
            if !self.relationships.values().any(|v| v.contains(label)) {
                root_labels.push(label.clone());
            }
        }
        root_labels
    }

    /// Builds the tree rooted at `root_label` from the recorded
    /// relationships. Labels without recorded children become leaves.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&mut self, root_label: &str) -> TreeResult<LabelTree> {
        self.visited_labels.clear();

        let mut tree = LabelTree::new();
        let mut stack = vec![(root_label.to_string(), None)];

        while let Some((label, parent_idx)) = stack.pop() {
            // Cycle detection: single parent per node
            if !self.visited_labels.insert(label.clone()) {
                return Err(TreeError::CycleDetected(label));
            }

            let current_idx = tree.insert_node(&label, parent_idx)?;

            // Reversed so the stack pops siblings in insertion order
            if let Some(children) = self.relationships.get(&label) {
                for child in children.iter().rev() {
                    stack.push((child.clone(), Some(current_idx)));
                }
            }
        }

        Ok(tree)
    }

    /// Builds one tree per root label.
    #[instrument(level = "debug", skip(self))]
    pub fn build_all(&mut self) -> TreeResult<Vec<LabelTree>> {
        let root_labels = self.roots();

        // Edges with no root at all cannot form a tree
        if root_labels.is_empty() && !self.relationships.is_empty() {
            let cycle_label = self.relationships.keys().next().unwrap().clone();
            return Err(TreeError::CycleDetected(cycle_label));
        }

        let mut trees = Vec::new();
        for root in root_labels {
            trees.push(self.build(&root)?);
        }
        Ok(trees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // root
    // ├── child1
    // │   └── grandchild1
    // └── child2
    #[test]
    fn test_build_from_relationships() {
        let mut builder = TreeBuilder::new();
        builder.relate("root", "child1");
        builder.relate("root", "child2");
        builder.relate("child1", "grandchild1");

        let tree = builder.build("root").unwrap();

        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.depth(), 3);
        assert_eq!(
            tree.depth_first_labels(),
            vec!["root", "child1", "grandchild1", "child2"]
        );

        let root_idx = tree.root().unwrap();
        assert_eq!(tree.get_node(root_idx).unwrap().children.len(), 2);
    }

    #[test]
    fn test_self_edge_is_a_cycle() {
        let mut builder = TreeBuilder::new();
        builder.relate("a", "a");

        let result = builder.build("a");
        assert!(matches!(result, Err(TreeError::CycleDetected(label)) if label == "a"));
    }
}
