use super::Placement;
use crate::overlap::overlaps;
use crate::Point;
use std::fmt;
use std::hash::Hash;
use tracing::trace;

/// Snap end nodes that are not also start nodes to the right-most column
pub(super) fn align_ends<N>(placement: &mut Placement<'_, N>)
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    let scene = placement.scene;
    let Some(max_x) = scene
        .nodes
        .iter()
        .map(|&node| placement.position(node).x)
        .reduce(f32::max)
    else {
        return;
    };

    for &node in &scene.nodes {
        if placement.is_end(node) && !placement.is_start(node) {
            let y = placement.position(node).y;
            placement.set(node, Point::new(max_x, y));
        }
    }
}

/// Push overlapping nodes below the node they overlap
///
/// Greedy and order dependent: for every ordered pair of overlapping nodes
/// the first one moves under the second, by the second's height plus half a
/// margin. Repeated `n` times so cascades can settle; nothing guarantees the
/// result is overlap free.
pub(super) fn push_overlaps_down<N>(placement: &mut Placement<'_, N>)
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    let scene = placement.scene;
    let sweeps = scene.nodes.len();
    let gap = 0.5 * placement.margin;

    for sweep in 0..sweeps {
        let mut pushed = 0usize;

        for &node in &scene.nodes {
            if placement.is_parked(node) {
                continue;
            }

            for &other in &scene.nodes {
                if other == node || placement.is_parked(other) {
                    continue;
                }

                if overlaps(&placement.current_box(node), &placement.current_box(other)) {
                    let below = placement.position(other).y - placement.extent(other).y - gap;
                    let x = placement.position(node).x;
                    placement.set(node, Point::new(x, below));
                    pushed += 1;
                }
            }
        }

        trace!("Overlap sweep {sweep}: pushed {pushed} nodes");
    }
}
