use super::{deselect_all, restore_selection, selected_names};
use crate::{Category, GraphStore, Node, TreeError};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Nodes that are useful without feeding anything
fn is_terminal(node: &Node) -> bool {
    matches!(node.node_type.category, Category::Output | Category::Group)
        || node.node_type.is_frame()
}

/// Delete every node whose outputs are not used, repeatedly
///
/// Removing a node can leave the nodes feeding it unused in turn, so rounds
/// repeat until one deletes nothing, at most once per node. Output, group and
/// frame nodes are never deleted. Returns the sorted names of the deleted
/// nodes; the selection of the survivors is kept.
pub fn delete_unused<S: GraphStore>(store: &mut S) -> Result<Vec<String>, TreeError> {
    let selection = selected_names(&*store, |_| true);
    let rounds = store.list_nodes().len();
    let mut deleted = BTreeSet::new();

    for round in 0..rounds {
        deselect_all(store)?;
        let mut removed = 0;

        for node in store.list_nodes() {
            if store.node(node.id).is_none() || is_terminal(&node) {
                continue;
            }

            let feeds_something = store.list_links().iter().any(|l| l.from_node == node.id);
            if feeds_something {
                continue;
            }

            store.set_selection(node.id, true)?;
            store.delete(node.id)?;
            info!("Node {} deleted", node.name);
            deleted.insert(node.name);
            removed += 1;
        }

        debug!("Pruning round {round} deleted {removed} nodes");
        if removed == 0 {
            break;
        }
    }

    match deleted.len() {
        0 => info!("Nothing deleted"),
        1 => info!("Deleted 1 node"),
        n => info!("Deleted {n} nodes"),
    }

    restore_selection(store, &selection)?;
    Ok(deleted.into_iter().collect())
}
