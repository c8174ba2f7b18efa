use crate::{LayoutEngine, LayoutError, Point, Scene, Vec2};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// Direction in which nodes are lined up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    /// Side by side, sharing a horizontal center line
    Row,
    /// Stacked, sharing a vertical center line
    Column,
}

/// Line nodes up on a row or a column with even gaps
///
/// The extent of the selection along the axis is kept: the first and last
/// nodes stay where they are and the gaps between the others are equalized.
/// Links are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignLayout {
    pub axis: Axis,
}

impl AlignLayout {
    pub fn new(axis: Axis) -> Self {
        Self { axis }
    }
}

struct Entry<N> {
    node: N,
    position: Point,
    size: Vec2,
}

impl<N> Entry<N> {
    fn left_to_right(a: &Self, b: &Self) -> Ordering {
        a.position
            .x
            .total_cmp(&b.position.x)
            .then(b.position.y.total_cmp(&a.position.y))
    }

    fn top_to_bottom(a: &Self, b: &Self) -> Ordering {
        b.position
            .y
            .total_cmp(&a.position.y)
            .then(a.position.x.total_cmp(&b.position.x))
    }

    fn center(&self) -> Point {
        Point::new(
            self.position.x + self.size.x / 2.0,
            self.position.y - self.size.y / 2.0,
        )
    }
}

impl<N> LayoutEngine<N> for AlignLayout
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    type Error = LayoutError<N>;

    fn layout(&self, scene: &Scene<N>) -> Result<HashMap<N, Point>, Self::Error> {
        scene.validate()?;

        if scene.nodes.len() < 2 {
            debug!("Aligning needs at least two nodes");
            return Ok(HashMap::new());
        }

        let mut entries: Vec<Entry<N>> = scene
            .nodes
            .iter()
            .map(|&node| Entry {
                node,
                position: scene.boxes[&node].position,
                size: scene.boxes[&node].extent(),
            })
            .collect();

        debug!("Aligning {} nodes along {:?}", entries.len(), self.axis);

        Ok(match self.axis {
            Axis::Row => row(&mut entries),
            Axis::Column => column(&mut entries),
        })
    }
}

fn row<N>(entries: &mut [Entry<N>]) -> HashMap<N, Point>
where
    N: Copy + Ord + Hash,
{
    let gaps = (entries.len() - 1) as f32;

    entries.sort_by(Entry::top_to_bottom);
    let (top, bottom) = (&entries[0], &entries[entries.len() - 1]);
    let center_y = (top.center().y + bottom.center().y) / 2.0;

    entries.sort_by(Entry::left_to_right);
    let (first, last) = (&entries[0], &entries[entries.len() - 1]);
    let span = last.position.x + last.size.x - first.position.x;
    let total: f32 = entries.iter().map(|e| e.size.x).sum();
    let gap = (span - total) / gaps;

    let mut x = first.position.x;
    let mut positions = HashMap::new();
    for entry in entries.iter() {
        positions.insert(entry.node, Point::new(x, center_y + entry.size.y / 2.0));
        x += entry.size.x + gap;
    }
    positions
}

fn column<N>(entries: &mut [Entry<N>]) -> HashMap<N, Point>
where
    N: Copy + Ord + Hash,
{
    let gaps = (entries.len() - 1) as f32;

    entries.sort_by(Entry::left_to_right);
    let (left, right) = (&entries[0], &entries[entries.len() - 1]);
    let center_x = (left.center().x + right.center().x) / 2.0;

    entries.sort_by(Entry::top_to_bottom);
    let (first, last) = (&entries[0], &entries[entries.len() - 1]);
    let span = first.position.y - (last.position.y - last.size.y);
    let total: f32 = entries.iter().map(|e| e.size.y).sum();
    let gap = (span - total) / gaps;

    let mut y = first.position.y;
    let mut positions = HashMap::new();
    for entry in entries.iter() {
        positions.insert(entry.node, Point::new(center_x - entry.size.x / 2.0, y));
        y -= entry.size.y + gap;
    }
    positions
}
