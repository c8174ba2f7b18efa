mod columns;
mod relax;
mod sweep;

use crate::overlap::midpoint;
use crate::{LayoutEngine, LayoutError, NodeBox, Point, Scene, Vec2};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use tracing::{debug, warn};

/// What to do with frame nodes found in the working set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FrameHandling {
    /// Frames are parked at the origin and skipped by the flow and overlap passes
    #[default]
    Ignore,
    /// Frames are expected to be deleted before layout and get no special treatment
    Delete,
}

/// How nodes are assigned their horizontal position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ColumnStrategy {
    /// Repeated sweeps over the links in their given order, followed by a
    /// backward correction. Works on any graph, cycles included.
    #[default]
    Sweep,
    /// Single pass in topological order, each node right of its furthest
    /// predecessor. Falls back to [`ColumnStrategy::Sweep`] on cyclic graphs.
    LongestPath,
}

/// Left-to-right dependency layout for node trees
///
/// Sources are placed left of the nodes they feed, overlapping nodes are
/// pushed down, and the result is re-centered on the original midpoint.
/// Iteration counts are heuristics: cyclic graphs get *some* layout rather
/// than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrangeLayout {
    /// Horizontal distance between linked nodes, half of it vertically
    pub margin: f32,

    /// Pin nodes without inputs to a shared column
    pub start_align: bool,

    /// Snap nodes without outputs to the right-most column
    pub end_align: bool,

    pub frames: FrameHandling,

    pub columns: ColumnStrategy,
}

impl Default for ArrangeLayout {
    fn default() -> Self {
        Self {
            margin: 80.0,
            start_align: true,
            end_align: true,
            frames: FrameHandling::default(),
            columns: ColumnStrategy::default(),
        }
    }
}

impl ArrangeLayout {
    /// Create a new arrange layout with the given margin
    pub fn new(margin: f32) -> Self {
        Self {
            margin,
            ..Default::default()
        }
    }

    /// Margin clamped to a non-negative value
    pub fn margin(&self) -> f32 {
        self.margin.max(0.0)
    }
}

impl<N> LayoutEngine<N> for ArrangeLayout
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    type Error = LayoutError<N>;

    fn layout(&self, scene: &Scene<N>) -> Result<HashMap<N, Point>, Self::Error> {
        scene.validate()?;

        let Some(origin) = midpoint(scene.nodes.iter().map(|n| scene.boxes[n].position)) else {
            debug!("Nothing to arrange");
            return Ok(HashMap::new());
        };

        debug!(
            "Arranging {} nodes over {} links around {origin:?}",
            scene.nodes.len(),
            scene.links.len()
        );

        let mut placement = Placement::new(scene, self);

        match self.columns {
            ColumnStrategy::Sweep => {
                sweep::forward(&mut placement);
                sweep::backward(&mut placement);
            }
            ColumnStrategy::LongestPath => {
                if let Err(node) = columns::longest_path(&mut placement) {
                    warn!("Link graph has a cycle at {node:?}, falling back to sweeps");
                    sweep::forward(&mut placement);
                    sweep::backward(&mut placement);
                }
            }
        }

        if self.end_align {
            relax::align_ends(&mut placement);
        }

        relax::push_overlaps_down(&mut placement);

        placement.recenter(origin);

        Ok(placement.into_positions())
    }
}

/// Mutable position table for one layout run
pub(crate) struct Placement<'a, N>
where
    N: Copy + Ord + Hash,
{
    scene: &'a Scene<N>,
    margin: f32,
    start_align: bool,
    ignore_frames: bool,
    positions: HashMap<N, Point>,
    members: HashSet<N>,
    has_input: HashSet<N>,
    has_output: HashSet<N>,
}

impl<'a, N> Placement<'a, N>
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    fn new(scene: &'a Scene<N>, layout: &ArrangeLayout) -> Self {
        let (has_input, has_output) = scene.linked_ends();
        Self {
            scene,
            margin: layout.margin(),
            start_align: layout.start_align,
            ignore_frames: layout.frames == FrameHandling::Ignore,
            positions: scene
                .boxes
                .iter()
                .map(|(&node, geometry)| (node, geometry.position))
                .collect(),
            members: scene.nodes.iter().copied().collect(),
            has_input,
            has_output,
        }
    }

    fn position(&self, node: N) -> Point {
        self.positions[&node]
    }

    fn set(&mut self, node: N, position: Point) {
        self.positions.insert(node, position);
    }

    fn extent(&self, node: N) -> Vec2 {
        self.scene.boxes[&node].extent()
    }

    /// Box of `node` at its current position
    fn current_box(&self, node: N) -> NodeBox {
        self.scene.boxes[&node].at(self.position(node))
    }

    fn is_member(&self, node: N) -> bool {
        self.members.contains(&node)
    }

    fn is_start(&self, node: N) -> bool {
        !self.has_input.contains(&node)
    }

    fn is_end(&self, node: N) -> bool {
        !self.has_output.contains(&node)
    }

    /// Frames that sit out the flow and overlap passes
    fn is_parked(&self, node: N) -> bool {
        self.ignore_frames && self.scene.boxes[&node].frame
    }

    /// Position shared by every start node when start alignment is on
    fn pinned(&self, node: N) -> Point {
        let size = self.extent(node);
        Point::new(size.x / -2.0, size.y / 2.0)
    }

    /// Put `to` right of `from`, vertically centered against it
    fn place_after(&mut self, from: N, to: N) {
        let (source, size) = (self.position(from), self.extent(from));
        let to_size = self.extent(to);
        self.set(
            to,
            Point::new(
                source.x + size.x + self.margin,
                source.y - size.y / 2.0 + to_size.y / 2.0,
            ),
        );
    }

    fn recenter(&mut self, origin: Point) {
        let scene = self.scene;
        let Some(current) = midpoint(scene.nodes.iter().map(|&n| self.position(n))) else {
            return;
        };
        let shift = current - origin;
        for &node in &scene.nodes {
            let moved = self.position(node) - shift;
            self.set(node, moved);
        }
    }

    fn into_positions(self) -> HashMap<N, Point> {
        let members = self.members;
        self.positions
            .into_iter()
            .filter(|(node, _)| members.contains(node))
            .collect()
    }
}
