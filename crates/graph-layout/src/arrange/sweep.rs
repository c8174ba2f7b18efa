use super::Placement;
use crate::Point;
use std::fmt;
use std::hash::Hash;
use tracing::trace;

/// Push every node right of the nodes feeding it
///
/// Runs `2 × n` sweeps. Links are applied in their given order, so a node
/// fed by several links ends up after the last one processed; repeating the
/// sweep lets positions propagate along chains without a topological sort.
pub(super) fn forward<N>(placement: &mut Placement<'_, N>)
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    let scene = placement.scene;
    let sweeps = scene.nodes.len() * 2;

    for sweep in 0..sweeps {
        trace!("Forward sweep {sweep}/{sweeps}");

        for &node in &scene.nodes {
            if placement.is_parked(node) {
                placement.set(node, Point::zero());
                continue;
            }

            if placement.start_align && placement.is_start(node) {
                let pinned = placement.pinned(node);
                placement.set(node, pinned);
            }

            for &(from, to) in &scene.links {
                if from == node && placement.is_member(to) {
                    placement.place_after(from, to);
                }
            }
        }
    }
}

/// Repair links whose source ends past its destination's left edge
///
/// The forward sweeps can move a source after its destinations were placed.
/// Runs `n` sweeps over all links; only the horizontal position changes.
pub(super) fn backward<N>(placement: &mut Placement<'_, N>)
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    let scene = placement.scene;
    let sweeps = scene.nodes.len();

    for _ in 0..sweeps {
        for &(from, to) in &scene.links {
            if !placement.is_member(to) {
                continue;
            }

            let right_edge = placement.position(from).x + placement.extent(from).x;
            let target = placement.position(to);
            if right_edge >= target.x {
                placement.set(to, Point::new(right_edge + placement.margin, target.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrangeLayout, NodeBox, Scene, Vec2};
    use test_log::test;

    fn scene() -> Scene<u8> {
        let mut scene = Scene::new();
        scene.add_node(0, NodeBox::new(Point::new(0.0, 0.0), Vec2::new(100.0, 40.0)));
        scene.add_node(1, NodeBox::new(Point::new(0.0, 0.0), Vec2::new(50.0, 60.0)));
        scene.add_link(0, 1);
        scene
    }

    #[test]
    fn forward_places_destination_after_source() {
        let scene = scene();
        let layout = ArrangeLayout::default();
        let mut placement = Placement::new(&scene, &layout);

        forward(&mut placement);

        assert_eq!(placement.position(0), Point::new(-50.0, 20.0));
        // 20 - 40 / 2 + 60 / 2
        assert_eq!(placement.position(1), Point::new(130.0, 30.0));
    }

    #[test]
    fn forward_without_start_alignment_keeps_sources() {
        let mut scene = scene();
        scene.boxes.get_mut(&0).unwrap().position = Point::new(10.0, 100.0);
        let layout = ArrangeLayout {
            start_align: false,
            ..Default::default()
        };
        let mut placement = Placement::new(&scene, &layout);

        forward(&mut placement);

        assert_eq!(placement.position(0), Point::new(10.0, 100.0));
        assert_eq!(placement.position(1), Point::new(190.0, 110.0));
    }

    #[test]
    fn backward_only_fixes_inverted_links() {
        let mut scene = scene();
        scene.boxes.get_mut(&1).unwrap().position = Point::new(60.0, 7.0);
        let layout = ArrangeLayout::default();

        let mut placement = Placement::new(&scene, &layout);
        backward(&mut placement);
        assert_eq!(placement.position(1), Point::new(180.0, 7.0));

        // A gap narrower than the margin is left alone
        scene.boxes.get_mut(&1).unwrap().position = Point::new(101.0, 7.0);
        let mut placement = Placement::new(&scene, &layout);
        backward(&mut placement);
        assert_eq!(placement.position(1), Point::new(101.0, 7.0));
    }
}
