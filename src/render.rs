//! Diagram rendering for [`LabelTree`].
//!
//! Pure formatting: the tree is turned into a sequence of lines, one per
//! node in pre-order, and the caller decides where they go.

use generational_arena::Index;
use tracing::instrument;

use crate::arena::LabelTree;
use crate::errors::{TreeError, TreeResult};

/// Horizontal connector drawn between the corner glyph and the label.
const CONNECTOR: &str = "──";
/// Indent contributed per ancestor level.
const SPACES: &str = "    ";

impl LabelTree {
    /// Renders the tree as a box-drawing diagram.
    ///
    /// Lines are joined with a single newline, no trailing newline.
    /// An empty tree is reported as `TreeError::EmptyTree`.
    #[instrument(level = "debug", skip(self))]
    pub fn render(&self) -> TreeResult<String> {
        self.render_lines().map(|lines| lines.join("\n"))
    }

    /// Produces the diagram lines without joining them.
    ///
    /// A node's line is `prefix` + corner + `──` + label, where the corner is
    /// `└` for a last sibling (and the root) and `├` otherwise. Each ancestor
    /// level contributes four spaces when it was a last sibling, or `│` plus
    /// four spaces while siblings still follow beneath it.
    #[instrument(level = "debug", skip(self))]
    pub fn render_lines(&self) -> TreeResult<Vec<String>> {
        let root = self.root().ok_or(TreeError::EmptyTree)?;
        let mut lines = Vec::new();
        self.build_lines(root, "", true, &mut lines);
        Ok(lines)
    }

    fn build_lines(&self, node_idx: Index, prefix: &str, is_last: bool, lines: &mut Vec<String>) {
        if let Some(node) = self.get_node(node_idx) {
            let corner = if is_last { "└" } else { "├" };
            lines.push(format!("{}{}{}{}", prefix, corner, CONNECTOR, node.label));

            let child_prefix = if is_last {
                format!("{}{}", prefix, SPACES)
            } else {
                format!("{}│{}", prefix, SPACES)
            };

            // The last child closes the branch at this level; the ones before
            // it keep the continuation bar.
            if let Some((&last, rest)) = node.children.split_last() {
                for &child in rest {
                    self.build_lines(child, &child_prefix, false, lines);
                }
                self.build_lines(last, &child_prefix, true, lines);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_node() {
        let mut tree = LabelTree::new();
        tree.insert_node("root", None).unwrap();
        assert_eq!(tree.render().unwrap(), "└──root");
    }

    #[test]
    fn test_render_chain_indents_per_level() {
        let mut tree = LabelTree::new();
        let a = tree.insert_node("a", None).unwrap();
        let b = tree.insert_node("b", Some(a)).unwrap();
        tree.insert_node("c", Some(b)).unwrap();

        // Every ancestor was a last sibling, so only spaces accumulate.
        assert_eq!(tree.render().unwrap(), "└──a\n    └──b\n        └──c");
    }

    #[test]
    fn test_render_sibling_keeps_continuation_bar() {
        let mut tree = LabelTree::new();
        let a = tree.insert_node("a", None).unwrap();
        let b = tree.insert_node("b", Some(a)).unwrap();
        tree.insert_node("d", Some(b)).unwrap();
        tree.insert_node("c", Some(a)).unwrap();

        let lines = tree.render_lines().unwrap();
        assert_eq!(lines, vec!["└──a", "    ├──b", "    │    └──d", "    └──c"]);
    }

    #[test]
    fn test_render_empty_tree_is_error() {
        let tree = LabelTree::new();
        assert!(matches!(tree.render(), Err(TreeError::EmptyTree)));
    }
}
