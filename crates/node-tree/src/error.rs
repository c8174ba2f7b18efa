use crate::NodeId;
use nodewrangler_layout::LayoutError;
use thiserror::Error;

/// Errors raised by graph stores and operators
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("node {0:?} is not in the tree")]
    UnknownNode(NodeId),

    #[error("a node named {0:?} already exists")]
    DuplicateName(String),

    #[error("node id {0:?} is used more than once")]
    DuplicateId(NodeId),

    #[error("no free node id left")]
    IdsExhausted,

    /// Parenting `node` to `parent` would make a node its own ancestor
    #[error("{node:?} cannot be parented to {parent:?}: parent chain would loop")]
    ParentCycle { node: NodeId, parent: NodeId },

    #[error(transparent)]
    Layout(#[from] LayoutError<NodeId>),

    #[error("invalid RON: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("cannot serialize to RON: {0}")]
    RonEncode(#[from] ron::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
