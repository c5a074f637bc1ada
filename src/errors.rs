use generational_arena::Index;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("tree is empty")]
    EmptyTree,

    #[error("root is already set")]
    RootAlreadySet,

    #[error("no node at index {0:?}")]
    NodeNotFound(Index),

    #[error("cycle detected in hierarchy starting at: {0}")]
    CycleDetected(String),
}

pub type TreeResult<T> = Result<T, TreeError>;
