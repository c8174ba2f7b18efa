//! Node-graph layout engines
//!
//! This crate positions the nodes of an editor node tree. Engines work on an
//! owned [`Scene`] snapshot, generic over any copyable node identifier, and
//! return the new positions instead of mutating anything, so they can be
//! driven by any graph store.
//!
//! # Layout Engines
//!
//! - [`ArrangeLayout`]: heuristic left-to-right dependency layout
//! - [`AlignLayout`]: line nodes up on a row or a column
//!
//! # Example
//!
//! ```
//! use nodewrangler_layout::{ArrangeLayout, LayoutEngine, NodeBox, Point, Scene, Vec2};
//!
//! // Snapshot the nodes to arrange, y grows upward
//! let mut scene = Scene::new();
//! scene.add_node("texture", NodeBox::new(Point::new(0.0, 0.0), Vec2::new(140.0, 200.0)));
//! scene.add_node("shader", NodeBox::new(Point::new(30.0, 10.0), Vec2::new(150.0, 120.0)));
//! scene.add_link("texture", "shader");
//!
//! let engine = ArrangeLayout::new(80.0);
//! let positions = engine.layout(&scene).unwrap();
//!
//! assert!(positions["texture"].x + 140.0 < positions["shader"].x);
//! ```

mod align;
mod arrange;
mod engine;
mod geometry;
mod overlap;
mod scene;

// Re-export core types and traits
pub use engine::LayoutEngine;
pub use geometry::{Point, Vec2};
pub use overlap::{midpoint, overlaps};
pub use scene::{LayoutError, NodeBox, Scene};

pub use align::{AlignLayout, Axis};
pub use arrange::{ArrangeLayout, ColumnStrategy, FrameHandling};
