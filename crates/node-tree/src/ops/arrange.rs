use super::{commit, deselect_all, restore_selection, selected_names, snapshot};
use crate::{GraphStore, Node, NodeId, NodeType, PreferencesProvider, TreeError, WorkingSet};
use nodewrangler_layout::{FrameHandling, LayoutEngine};
use tracing::{debug, info};

/// What an [`arrange`] run changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrangeReport {
    /// Nodes of the working set whose location was written, in id order,
    /// including those that ended up where they were
    pub moved: Vec<NodeId>,
    /// Names of the reroutes deleted before layout
    pub removed_reroutes: Vec<String>,
    /// Names of the frames deleted before layout
    pub removed_frames: Vec<String>,
}

#[derive(Clone, Copy)]
enum Removal {
    Reconnect,
    Plain,
}

/// Lay the working set out left to right by dependency
///
/// Depending on the preferences, reroutes and frames of the working set are
/// deleted first; the selection is restored afterwards. An empty tree is left
/// untouched.
pub fn arrange<S, P>(store: &mut S, prefs: &P) -> Result<ArrangeReport, TreeError>
where
    S: GraphStore,
    P: PreferencesProvider + ?Sized,
{
    let prefs = prefs.preferences();
    let mut report = ArrangeReport::default();

    if WorkingSet::collect(&*store).is_empty() {
        debug!("Empty tree, nothing to arrange");
        return Ok(report);
    }

    if prefs.delete_reroutes {
        report.removed_reroutes = remove_matching(store, NodeType::is_reroute, Removal::Reconnect)?;
    }

    if prefs.frame_handling == FrameHandling::Delete {
        report.removed_frames = remove_matching(store, NodeType::is_frame, Removal::Plain)?;
    }

    let working = WorkingSet::collect(&*store);
    let scene = snapshot(
        &*store,
        &working.nodes,
        working.links.iter().map(|l| (l.from_node, l.to_node)),
    )?;

    let positions = prefs.layout().layout(&scene)?;
    report.moved = commit(store, positions)?;

    debug!("Arranged {} nodes", report.moved.len());
    Ok(report)
}

/// Delete the working-set nodes whose type matches, keeping the selection
fn remove_matching<S: GraphStore>(
    store: &mut S,
    matches: fn(&NodeType) -> bool,
    removal: Removal,
) -> Result<Vec<String>, TreeError> {
    let targets: Vec<Node> = WorkingSet::collect(&*store)
        .nodes
        .into_iter()
        .filter(|n| matches(&n.node_type))
        .collect();
    if targets.is_empty() {
        return Ok(Vec::new());
    }

    let selection = selected_names(&*store, |n| !matches(&n.node_type));
    deselect_all(store)?;

    let mut removed = Vec::with_capacity(targets.len());
    for target in targets {
        store.set_selection(target.id, true)?;
        match removal {
            Removal::Reconnect => store.delete_and_reconnect(target.id)?,
            Removal::Plain => store.delete(target.id)?,
        }
        info!("Removed {} {:?}", target.node_type, target.name);
        removed.push(target.name);
    }

    restore_selection(store, &selection)?;
    Ok(removed)
}
