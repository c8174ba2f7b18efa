use super::Placement;
use crate::Point;
use petgraph::algo::toposort;
use petgraph::Direction;
use std::fmt;
use std::hash::Hash;
use tracing::trace;

/// Assign horizontal positions in topological order
///
/// Each node is placed right of its furthest predecessor and centered
/// against it, which is the fixed point the forward sweeps approach on
/// acyclic graphs. Returns the offending node if the link graph has a cycle,
/// leaving every position untouched.
pub(super) fn longest_path<N>(placement: &mut Placement<'_, N>) -> Result<(), N>
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    let graph = placement.scene.graph();
    let order = toposort(&graph, None).map_err(|cycle| cycle.node_id())?;

    for node in order {
        if !placement.is_member(node) {
            continue;
        }

        if placement.is_parked(node) {
            placement.set(node, Point::zero());
            continue;
        }

        if placement.start_align && placement.is_start(node) {
            let pinned = placement.pinned(node);
            placement.set(node, pinned);
            continue;
        }

        // First predecessor wins ties, in link order
        let mut furthest: Option<(N, f32)> = None;
        for pred in graph.neighbors_directed(node, Direction::Incoming) {
            let right_edge = placement.position(pred).x + placement.extent(pred).x;
            if furthest.map_or(true, |(_, best)| right_edge > best) {
                furthest = Some((pred, right_edge));
            }
        }

        if let Some((pred, _)) = furthest {
            trace!("{node:?} follows {pred:?}");
            placement.place_after(pred, node);
        }
    }

    Ok(())
}
