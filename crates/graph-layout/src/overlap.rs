use crate::{NodeBox, Point};

/// Inclusive containment, `lo` must not exceed `hi`
fn between(lo: f32, value: f32, hi: f32) -> bool {
    lo <= value && value <= hi
}

/// Whether `[a0, a1]` and `[b0, b1]` share at least one point
///
/// Either an edge of `a` lies inside `b`, or `b` sits entirely inside `a`.
fn intervals_meet(a0: f32, a1: f32, b0: f32, b1: f32) -> bool {
    between(b0, a0, b1) || between(b0, a1, b1) || (between(a0, b0, a1) && between(a0, b1, a1))
}

/// Whether two node boxes overlap
///
/// Boxes span `[x, x + w]` horizontally and `[y - h, y]` vertically. Touching
/// edges count as overlapping.
pub fn overlaps(a: &NodeBox, b: &NodeBox) -> bool {
    let (sa, sb) = (a.extent(), b.extent());
    let (pa, pb) = (a.position, b.position);

    intervals_meet(pa.x, pa.x + sa.x, pb.x, pb.x + sb.x)
        && intervals_meet(pa.y - sa.y, pa.y, pb.y - sb.y, pb.y)
}

/// Center of the bounding box of the given node positions
///
/// Only positions are considered, not node sizes. Returns `None` when there
/// is no position at all.
pub fn midpoint(positions: impl IntoIterator<Item = Point>) -> Option<Point> {
    let mut positions = positions.into_iter();
    let first = positions.next()?;

    let (min, max) = positions.fold((first, first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });

    Some(Point::new(
        min.x + (max.x - min.x) / 2.0,
        min.y + (max.y - min.y) / 2.0,
    ))
}
