use crate::{Point, Scene};
use std::collections::HashMap;
use std::hash::Hash;

/// A layout engine that computes new positions for the nodes of a scene
///
/// Engines never mutate the scene: they return the new position of every
/// node of the working set and leave committing them to the caller.
/// - [`ArrangeLayout`](crate::ArrangeLayout) lays nodes out by dependency
/// - [`AlignLayout`](crate::AlignLayout) lines nodes up on a row or column
pub trait LayoutEngine<N>
where
    N: Copy + Ord + Hash,
{
    /// Error returned for scenes the engine cannot handle
    type Error;

    /// Compute node positions for the given scene
    ///
    /// # Errors
    /// Returns an error if the scene is inconsistent, e.g. a link references
    /// a node without geometry
    fn layout(&self, scene: &Scene<N>) -> Result<HashMap<N, Point>, Self::Error>;
}
