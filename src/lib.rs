//! In-memory, arbitrarily-branching trees of string-labeled nodes.
//!
//! Nodes live in a generational arena and are addressed by [`Index`]; the
//! tree tracks an optional root. On top of that sit mutation by label,
//! pre-order / post-order / breadth-first traversal, structural queries
//! (node count, depth, leaf labels), and a box-drawing diagram renderer.

pub mod arena;
pub mod builder;
pub mod errors;
pub mod render;
pub mod util;

pub use arena::{BreadthFirstIterator, LabelTree, PostOrderIterator, TreeIterator, TreeNode};
pub use builder::TreeBuilder;
pub use errors::{TreeError, TreeResult};

pub use generational_arena::Index;
