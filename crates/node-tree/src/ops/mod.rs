//! Operators driving the layout engines and cleanups against a [`GraphStore`]

mod align;
mod arrange;
mod prune;

pub use align::align_selected;
pub use arrange::{arrange, ArrangeReport};
pub use prune::delete_unused;

use crate::{resolve_absolute, GraphStore, Node, NodeId, TreeError};
use nodewrangler_layout::{NodeBox, Point, Scene};
use std::collections::HashMap;
use tracing::trace;

fn node_box<S: GraphStore>(store: &S, node: &Node) -> Result<NodeBox, TreeError> {
    let position = store.absolute_location(node.id)?;
    Ok(if node.node_type.is_frame() {
        NodeBox::frame(position, node.size)
    } else {
        NodeBox::new(position, node.size)
    })
}

/// Snapshot `nodes` in tree space, along with every link endpoint of `links`
fn snapshot<'a, S: GraphStore>(
    store: &S,
    nodes: impl IntoIterator<Item = &'a Node>,
    links: impl IntoIterator<Item = (NodeId, NodeId)>,
) -> Result<Scene<NodeId>, TreeError> {
    let mut scene = Scene::new();
    for node in nodes {
        scene.add_node(node.id, node_box(store, node)?);
    }

    for (from, to) in links {
        for id in [from, to] {
            if !scene.boxes.contains_key(&id) {
                let node = store.node(id).ok_or(TreeError::UnknownNode(id))?;
                let geometry = node_box(store, node)?;
                scene.add_fixed(id, geometry);
            }
        }
        scene.add_link(from, to);
    }

    Ok(scene)
}

/// Write absolute positions back as locations relative to each parent
///
/// All locations are resolved before any is written, so a node whose parent
/// moved too is placed relative to the parent's new position. Returns the
/// moved nodes in id order.
fn commit<S: GraphStore>(
    store: &mut S,
    positions: HashMap<NodeId, Point>,
) -> Result<Vec<NodeId>, TreeError> {
    let mut locations = Vec::with_capacity(positions.len());
    for (&id, &absolute) in &positions {
        let node = store.node(id).ok_or(TreeError::UnknownNode(id))?;
        let origin = match node.parent {
            Some(parent) => resolve_absolute(store, parent, &positions)?,
            None => Point::zero(),
        };
        locations.push((id, Point::zero() + (absolute - origin)));
    }

    locations.sort_by_key(|(id, _)| *id);
    for &(id, location) in &locations {
        trace!("Moving {id:?} to {location:?}");
        store.set_location(id, location)?;
    }

    Ok(locations.into_iter().map(|(id, _)| id).collect())
}

/// Remember which nodes are selected, by name
fn selected_names<S: GraphStore>(store: &S, keep: impl Fn(&Node) -> bool) -> Vec<String> {
    store
        .list_nodes()
        .into_iter()
        .filter(|n| n.select && keep(n))
        .map(|n| n.name)
        .collect()
}

fn deselect_all<S: GraphStore>(store: &mut S) -> Result<(), TreeError> {
    for node in store.list_nodes() {
        store.set_selection(node.id, false)?;
    }
    Ok(())
}

/// Select the surviving nodes among `names`
fn restore_selection<S: GraphStore>(store: &mut S, names: &[String]) -> Result<(), TreeError> {
    for node in store.list_nodes() {
        if names.contains(&node.name) {
            store.set_selection(node.id, true)?;
        }
    }
    Ok(())
}
