use super::{commit, snapshot};
use crate::{GraphStore, Node, NodeId, TreeError};
use nodewrangler_layout::{AlignLayout, Axis, LayoutEngine};
use tracing::debug;

/// Line the selected nodes up along `axis`, evenly spaced
///
/// Works in tree space, so nodes inside different frames line up visually.
/// Frames are skipped. Returns the moved nodes; fewer than two selected
/// nodes is a no-op.
pub fn align_selected<S: GraphStore>(store: &mut S, axis: Axis) -> Result<Vec<NodeId>, TreeError> {
    let selected: Vec<Node> = store
        .list_nodes()
        .into_iter()
        .filter(|n| n.select && !n.node_type.is_frame())
        .collect();

    if selected.len() < 2 {
        debug!("Nothing to align");
        return Ok(Vec::new());
    }

    let scene = snapshot(&*store, &selected, std::iter::empty())?;
    let positions = AlignLayout::new(axis).layout(&scene)?;
    commit(store, positions)
}
